use super::*;
use grlk_core::{Constraint, ConstraintParse, Version};

fn constraint(expr: &str) -> Constraint {
    match Constraint::parse(expr).unwrap() {
        ConstraintParse::Parsed(c) => c,
        ConstraintParse::Skipped => panic!("unexpected skip"),
    }
}

fn registry_lib(name: &str, version: Version, deps: &[&str]) -> ResolvedLibrary {
    ResolvedLibrary {
        name: name.to_string(),
        version,
        source: Source::Registry,
        dependency_names: deps.iter().map(|d| d.to_string()).collect(),
    }
}

#[test]
fn test_empty_resolution_keeps_gem_and_dependencies_sections() {
    let rendered = render(&Resolution::new(), &[], None);

    assert!(rendered.starts_with("GEM\n  remote: https://rubygems.org/\n  specs:\n"));
    assert!(rendered.contains("\nDEPENDENCIES\n"));
    assert!(rendered.contains("\nPLATFORMS\n"));
    assert!(rendered.contains("\nBUNDLED WITH\n"));
    assert!(!rendered.contains("GIT"));
    assert!(!rendered.contains("PATH"));
}

#[test]
fn test_registry_url_from_manifest() {
    let rendered = render(&Resolution::new(), &[], Some("https://registry.example/"));
    assert!(rendered.contains("  remote: https://registry.example/\n"));
}

#[test]
fn test_gem_section_sorted_with_nested_deps() {
    let mut resolution = Resolution::new();
    resolution.insert(registry_lib(
        "rails",
        Version::new(7, 0, 0),
        &["activesupport"],
    ));
    resolution.insert(registry_lib("activesupport", Version::new(7, 0, 0), &[]));

    let roots = vec![RootRequirement::new("rails").with_constraint(constraint("= 7.0.0"))];
    let rendered = render(&resolution, &roots, None);

    let expected = "\
GEM
  remote: https://rubygems.org/
  specs:
    activesupport (7.0.0)
    rails (7.0.0)
      activesupport (= 7.0.0)
";
    assert!(rendered.starts_with(expected));
    assert!(rendered.contains("\nDEPENDENCIES\n  rails (= 7.0.0)\n"));
}

#[test]
fn test_nested_dep_absent_from_resolution_is_omitted() {
    let mut resolution = Resolution::new();
    resolution.insert(registry_lib(
        "sidekiq",
        Version::new(7, 2, 4),
        &["redis", "ghost"],
    ));
    resolution.insert(registry_lib("redis", Version::new(5, 2, 0), &[]));

    let rendered = render(&resolution, &[], None);
    assert!(rendered.contains("      redis (= 5.2.0)\n"));
    assert!(!rendered.contains("ghost"));
}

#[test]
fn test_git_section_block() {
    let mut resolution = Resolution::new();
    resolution.insert(ResolvedLibrary {
        name: "widget".to_string(),
        version: Version::ZERO,
        source: Source::github("acme/widget"),
        dependency_names: Vec::new(),
    });

    let roots = vec![RootRequirement::new("widget").with_source(Source::github("acme/widget"))];
    let rendered = render(&resolution, &roots, None);

    assert!(rendered.contains("GIT\n  remote: https://github.com/acme/widget.git\n  revision: "));
    assert!(rendered.contains("  specs:\n    widget (0.0.0)\n"));
    assert!(rendered.contains("\nDEPENDENCIES\n  widget!\n"));
}

#[test]
fn test_git_section_optional_fields() {
    let mut resolution = Resolution::new();
    resolution.insert(ResolvedLibrary {
        name: "widget".to_string(),
        version: Version::ZERO,
        source: Source::Vcs {
            url: "https://example.com/widget.git".to_string(),
            branch: Some("main".to_string()),
            tag: None,
            reference: Some("abc123".to_string()),
        },
        dependency_names: Vec::new(),
    });

    let rendered = render(&resolution, &[], None);
    assert!(rendered.contains("  branch: main\n"));
    assert!(rendered.contains("  ref: abc123\n"));
    assert!(!rendered.contains("  tag:"));
}

#[test]
fn test_path_section_block() {
    let mut resolution = Resolution::new();
    resolution.insert(ResolvedLibrary {
        name: "local_lib".to_string(),
        version: Version::new(0, 1, 0),
        source: Source::Path {
            local_path: "../local_lib".to_string(),
        },
        dependency_names: Vec::new(),
    });

    let rendered = render(&resolution, &[], None);
    assert!(rendered.contains("PATH\n  remote: ../local_lib\n  specs:\n    local_lib (0.1.0)\n"));
}

#[test]
fn test_synth_revision_deterministic_and_commit_shaped() {
    let a = synth_revision("https://github.com/acme/widget.git");
    let b = synth_revision("https://github.com/acme/widget.git");
    let c = synth_revision("https://github.com/acme/other.git");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 40);
    assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn test_dependencies_constraints_preserve_spelling() {
    let roots = vec![
        RootRequirement::new("pg")
            .with_constraint(constraint(">= 1.0"))
            .with_constraint(constraint("< 2.0")),
        RootRequirement::new("rack").with_constraint(constraint("~> 3.0")),
    ];
    let rendered = render(&Resolution::new(), &roots, None);

    assert!(rendered.contains("  pg (>= 1.0, < 2.0)\n"));
    assert!(rendered.contains("  rack (~> 3.0)\n"));
}

#[test]
fn test_dependencies_merge_repeated_names() {
    let roots = vec![
        RootRequirement::new("pg").with_constraint(constraint(">= 1.0")),
        RootRequirement::new("pg").with_constraint(constraint("< 2.0")),
    ];
    let rendered = render(&Resolution::new(), &roots, None);
    assert!(rendered.contains("  pg (>= 1.0, < 2.0)\n"));
    assert_eq!(rendered.matches("  pg ").count(), 1);
}

#[test]
fn test_fixed_tail_sections() {
    let rendered = render(&Resolution::new(), &[], None);

    assert!(rendered.contains("PLATFORMS\n  arm64-darwin-23\n  ruby\n  x86_64-linux\n"));
    assert!(rendered.contains("RUBY VERSION\n   ruby 3.3.0p0\n"));
    assert!(rendered.ends_with("BUNDLED WITH\n   2.5.9\n"));
}

#[test]
fn test_render_is_deterministic() {
    let mut resolution = Resolution::new();
    resolution.insert(registry_lib("rack", Version::new(3, 0, 8), &[]));
    resolution.insert(registry_lib("pg", Version::new(1, 5, 4), &[]));
    let roots = vec![
        RootRequirement::new("rack").with_constraint(constraint("~> 3.0")),
        RootRequirement::new("pg"),
    ];

    let first = render(&resolution, &roots, None);
    let second = render(&resolution, &roots, None);
    assert_eq!(first, second);
}

#[test]
fn test_insertion_order_does_not_leak_into_output() {
    let mut forward = Resolution::new();
    forward.insert(registry_lib("pg", Version::new(1, 5, 4), &[]));
    forward.insert(registry_lib("rack", Version::new(3, 0, 8), &[]));

    let mut reverse = Resolution::new();
    reverse.insert(registry_lib("rack", Version::new(3, 0, 8), &[]));
    reverse.insert(registry_lib("pg", Version::new(1, 5, 4), &[]));

    let roots = vec![RootRequirement::new("pg"), RootRequirement::new("rack")];
    assert_eq!(
        render(&forward, &roots, None),
        render(&reverse, &roots, None)
    );
}

#[test]
fn test_write_lock_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Gemfile.lock");

    let mut resolution = Resolution::new();
    resolution.insert(registry_lib("rack", Version::new(3, 0, 8), &[]));

    write_lock_file(&path, &resolution, &[RootRequirement::new("rack")], None).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("    rack (3.0.8)\n"));
}

#[test]
fn test_mixed_resolution_golden_output() {
    let mut resolution = Resolution::new();
    resolution.insert(registry_lib("sinatra", Version::new(4, 0, 0), &["rack", "tilt"]));
    resolution.insert(registry_lib("rack", Version::new(3, 0, 8), &[]));
    resolution.insert(ResolvedLibrary {
        name: "widget".to_string(),
        version: Version::ZERO,
        source: Source::Vcs {
            url: "https://github.com/acme/widget.git".to_string(),
            branch: Some("main".to_string()),
            tag: None,
            reference: None,
        },
        dependency_names: Vec::new(),
    });
    resolution.insert(ResolvedLibrary {
        name: "local_lib".to_string(),
        version: Version::new(0, 1, 0),
        source: Source::Path {
            local_path: "../local_lib".to_string(),
        },
        dependency_names: Vec::new(),
    });

    let roots = vec![
        RootRequirement::new("rack").with_constraint(constraint("~> 3.0")),
        RootRequirement::new("sinatra"),
        RootRequirement::new("widget").with_source(Source::Vcs {
            url: "https://github.com/acme/widget.git".to_string(),
            branch: Some("main".to_string()),
            tag: None,
            reference: None,
        }),
        RootRequirement::new("local_lib").with_source(Source::Path {
            local_path: "../local_lib".to_string(),
        }),
    ];

    let expected = format!(
        "\
GEM
  remote: https://rubygems.org/
  specs:
    rack (3.0.8)
    sinatra (4.0.0)
      rack (= 3.0.8)

GIT
  remote: https://github.com/acme/widget.git
  revision: {}
  branch: main
  specs:
    widget (0.0.0)

PATH
  remote: ../local_lib
  specs:
    local_lib (0.1.0)

PLATFORMS
  arm64-darwin-23
  ruby
  x86_64-linux

RUBY VERSION
   ruby 3.3.0p0

DEPENDENCIES
  local_lib!
  rack (~> 3.0)
  sinatra
  widget!

BUNDLED WITH
   2.5.9
",
        synth_revision("https://github.com/acme/widget.git")
    );

    assert_eq!(render(&resolution, &roots, None), expected);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Alphabetical invariant: GEM specs and DEPENDENCIES entries are
    // byte-lexicographically sorted whatever the insertion order
    proptest! {
        #[test]
        fn emitted_sections_are_sorted(
            names in prop::collection::hash_set("[a-z]{2,8}", 1..12),
        ) {
            let mut resolution = Resolution::new();
            let mut roots = Vec::new();
            for name in &names {
                resolution.insert(registry_lib(name, Version::new(1, 0, 0), &[]));
                roots.push(RootRequirement::new(name.clone()));
            }

            let rendered = render(&resolution, &roots, None);

            let spec_lines: Vec<&str> = rendered
                .lines()
                .filter(|l| l.starts_with("    ") && !l.starts_with("      "))
                .collect();
            let mut sorted = spec_lines.clone();
            sorted.sort();
            prop_assert_eq!(&spec_lines, &sorted);

            let dep_start = rendered.find("DEPENDENCIES\n").unwrap();
            let dep_block: Vec<&str> = rendered[dep_start..]
                .lines()
                .skip(1)
                .take_while(|l| l.starts_with("  "))
                .collect();
            let mut dep_sorted = dep_block.clone();
            dep_sorted.sort();
            prop_assert_eq!(dep_block, dep_sorted);
        }
    }
}
