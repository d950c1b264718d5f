//! Textual lock file emitter.
//!
//! Produces the Bundler lock format with a fixed section order: GEM,
//! GIT, PATH, PLATFORMS, RUBY VERSION, DEPENDENCIES, BUNDLED WITH.
//! All orderings are byte-lexicographic and the emitter re-sorts, so
//! the output is independent of resolution insertion order.

use grlk_core::{GrlkError, GrlkResult, InputDigest, Resolution, ResolvedLibrary, RootRequirement, Source};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_REMOTE: &str = "https://rubygems.org/";
pub const PLATFORMS: [&str; 3] = ["arm64-darwin-23", "ruby", "x86_64-linux"];
pub const RUBY_VERSION_LINE: &str = "ruby 3.3.0p0";
pub const BUNDLED_WITH: &str = "2.5.9";

/// Render the lock text for a resolution.
///
/// `registry_url` is the manifest's captured `source` URL; the GEM
/// section falls back to the public registry when it is absent.
pub fn render(
    resolution: &Resolution,
    roots: &[RootRequirement],
    registry_url: Option<&str>,
) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(gem_section(resolution, registry_url));

    let mut vcs_libs: Vec<&ResolvedLibrary> = resolution
        .libraries()
        .iter()
        .filter(|l| matches!(l.source, Source::Vcs { .. }))
        .collect();
    vcs_libs.sort_by(|a, b| a.name.cmp(&b.name));
    for lib in vcs_libs {
        sections.push(git_section(lib));
    }

    let mut path_libs: Vec<&ResolvedLibrary> = resolution
        .libraries()
        .iter()
        .filter(|l| matches!(l.source, Source::Path { .. }))
        .collect();
    path_libs.sort_by(|a, b| a.name.cmp(&b.name));
    for lib in path_libs {
        sections.push(path_section(lib));
    }

    sections.push(platforms_section());
    sections.push(format!("RUBY VERSION\n   {}\n", RUBY_VERSION_LINE));
    sections.push(dependencies_section(roots));
    sections.push(format!("BUNDLED WITH\n   {}\n", BUNDLED_WITH));

    sections.join("\n")
}

/// Render and write the lock file
pub fn write_lock_file(
    path: &Path,
    resolution: &Resolution,
    roots: &[RootRequirement],
    registry_url: Option<&str>,
) -> GrlkResult<()> {
    let content = render(resolution, roots, registry_url);
    std::fs::write(path, content.as_bytes()).map_err(|source| GrlkError::LockWrite {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "wrote lock file");
    Ok(())
}

fn gem_section(resolution: &Resolution, registry_url: Option<&str>) -> String {
    let mut out = String::from("GEM\n");
    out.push_str(&format!(
        "  remote: {}\n",
        registry_url.unwrap_or(DEFAULT_REMOTE)
    ));
    out.push_str("  specs:\n");

    let mut libs: Vec<&ResolvedLibrary> = resolution
        .libraries()
        .iter()
        .filter(|l| l.source.is_registry())
        .collect();
    libs.sort_by(|a, b| a.name.cmp(&b.name));

    for lib in libs {
        out.push_str(&format!("    {} ({})\n", lib.name, lib.version));

        let mut deps: Vec<&String> = lib
            .dependency_names
            .iter()
            .filter(|d| resolution.contains(d))
            .collect();
        deps.sort();
        for dep in deps {
            // The invariant guarantees the version is present
            if let Some(version) = resolution.version_of(dep) {
                out.push_str(&format!("      {} (= {})\n", dep, version));
            }
        }
    }
    out
}

fn git_section(lib: &ResolvedLibrary) -> String {
    let Source::Vcs {
        url,
        branch,
        tag,
        reference,
    } = &lib.source
    else {
        return String::new();
    };

    let mut out = String::from("GIT\n");
    out.push_str(&format!("  remote: {}\n", url));
    out.push_str(&format!("  revision: {}\n", synth_revision(url)));
    if let Some(branch) = branch {
        out.push_str(&format!("  branch: {}\n", branch));
    }
    if let Some(tag) = tag {
        out.push_str(&format!("  tag: {}\n", tag));
    }
    if let Some(reference) = reference {
        out.push_str(&format!("  ref: {}\n", reference));
    }
    out.push_str("  specs:\n");
    out.push_str(&format!("    {} ({})\n", lib.name, lib.version));
    out
}

fn path_section(lib: &ResolvedLibrary) -> String {
    let Source::Path { local_path } = &lib.source else {
        return String::new();
    };

    let mut out = String::from("PATH\n");
    out.push_str(&format!("  remote: {}\n", local_path));
    out.push_str("  specs:\n");
    out.push_str(&format!("    {} ({})\n", lib.name, lib.version));
    out
}

fn platforms_section() -> String {
    let mut out = String::from("PLATFORMS\n");
    for platform in PLATFORMS {
        out.push_str(&format!("  {}\n", platform));
    }
    out
}

fn dependencies_section(roots: &[RootRequirement]) -> String {
    let mut out = String::from("DEPENDENCIES\n");

    // One line per name; repeated declarations merge their constraints
    // in declaration order
    let mut seen: Vec<(&str, &RootRequirement, Vec<String>)> = Vec::new();
    for root in roots {
        let rendered: Vec<String> = root.constraints.iter().map(|c| c.to_string()).collect();
        if let Some(existing) = seen.iter_mut().find(|(name, ..)| *name == root.name) {
            existing.2.extend(rendered);
        } else {
            seen.push((&root.name, root, rendered));
        }
    }
    seen.sort_by(|a, b| a.0.cmp(b.0));

    for (name, root, constraints) in seen {
        out.push_str(&format!("  {}", name));
        if !constraints.is_empty() {
            out.push_str(&format!(" ({})", constraints.join(", ")));
        }
        if !root.source.is_registry() {
            out.push('!');
        }
        out.push('\n');
    }
    out
}

/// Synthesized placeholder revision: deterministic, commit-shaped hex
/// derived from the remote URL
fn synth_revision(url: &str) -> String {
    let mut hex = InputDigest::compute(url.as_bytes()).to_hex();
    hex.truncate(40);
    hex
}

#[cfg(test)]
mod tests;
