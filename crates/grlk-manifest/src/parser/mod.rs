//! Manifest parser: token lines to root requirements.
//!
//! Directive handling follows the manifest DSL rules: `source` is
//! captured for the lock header but contributes no requirement,
//! `gemspec` and `ruby` are skipped, `group … do … end` blocks tag
//! their requirements with group symbols, and `gem` lines produce one
//! `RootRequirement` each.

use crate::lexer::{lex_line, Token};
use grlk_core::{Constraint, ConstraintParse, GrlkError, GrlkResult, RootRequirement, Source};
use std::path::Path;
use tracing::{debug, warn};

/// Parsed manifest: the captured registry URL plus all root
/// requirements in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    /// URL of the first `source` directive, if any
    pub registry_url: Option<String>,
    pub requirements: Vec<RootRequirement>,
}

impl Manifest {
    /// Requirements that participate in resolution (ungrouped ones)
    pub fn work_set(&self) -> Vec<RootRequirement> {
        self.requirements
            .iter()
            .filter(|r| r.in_work_set())
            .cloned()
            .collect()
    }
}

/// Parse the manifest file at `path`
pub fn parse_manifest(path: &Path) -> GrlkResult<Manifest> {
    let content = std::fs::read_to_string(path).map_err(|source| GrlkError::ManifestRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_manifest_str(&content)
}

/// Parse manifest text
pub fn parse_manifest_str(input: &str) -> GrlkResult<Manifest> {
    let mut manifest = Manifest::default();
    let mut group_stack: Vec<Vec<String>> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let tokens = lex_line(line).map_err(|e| GrlkError::ManifestSyntax {
            line: line_no,
            message: e.to_string(),
        })?;
        if tokens.is_empty() {
            continue;
        }

        let head = match &tokens[0] {
            Token::Word(w) => w.as_str(),
            _ => {
                return Err(GrlkError::ManifestSyntax {
                    line: line_no,
                    message: "expected a directive".to_string(),
                })
            },
        };

        match head {
            "source" => {
                if manifest.registry_url.is_none() {
                    if let Some(Token::Str(url)) = tokens.get(1) {
                        manifest.registry_url = Some(url.clone());
                    }
                }
            },
            "gemspec" | "ruby" => {},
            "group" => {
                let symbols = parse_group_open(&tokens, line_no)?;
                group_stack.push(symbols);
            },
            "end" => {
                if group_stack.pop().is_none() {
                    return Err(GrlkError::ManifestSyntax {
                        line: line_no,
                        message: "'end' without an open group".to_string(),
                    });
                }
            },
            "gem" => {
                let groups: Vec<String> = group_stack.iter().flatten().cloned().collect();
                let requirement = parse_requirement(&tokens, groups, line_no)?;
                manifest.requirements.push(requirement);
            },
            other => {
                return Err(GrlkError::ManifestSyntax {
                    line: line_no,
                    message: format!("unknown directive '{}'", other),
                });
            },
        }
    }

    if !group_stack.is_empty() {
        return Err(GrlkError::ManifestSyntax {
            line: input.lines().count(),
            message: "unclosed group block".to_string(),
        });
    }

    debug!(
        requirements = manifest.requirements.len(),
        "parsed manifest"
    );
    Ok(manifest)
}

fn parse_group_open(tokens: &[Token], line_no: usize) -> GrlkResult<Vec<String>> {
    let mut symbols = Vec::new();
    for token in &tokens[1..] {
        match token {
            Token::Symbol(s) => symbols.push(s.clone()),
            Token::Comma => {},
            Token::Word(w) if w == "do" => return Ok(symbols),
            other => {
                return Err(GrlkError::ManifestSyntax {
                    line: line_no,
                    message: format!("unexpected token {:?} in group header", other),
                })
            },
        }
    }
    Err(GrlkError::ManifestSyntax {
        line: line_no,
        message: "group header missing 'do'".to_string(),
    })
}

fn parse_requirement(
    tokens: &[Token],
    groups: Vec<String>,
    line_no: usize,
) -> GrlkResult<RootRequirement> {
    // The leading form after `gem` must be a quoted string
    let name = match tokens.get(1) {
        Some(Token::Str(name)) => name.clone(),
        _ => {
            return Err(GrlkError::ManifestSyntax {
                line: line_no,
                message: "expected quoted gem name".to_string(),
            })
        },
    };

    let mut requirement = RootRequirement::new(name);
    requirement.groups = groups;

    let mut rest = tokens[2..].iter().peekable();
    while let Some(token) = rest.next() {
        match token {
            Token::Comma | Token::Arrow => {},
            Token::Str(s) => {
                // A quoted argument is a constraint expression unless it
                // carries option-ish punctuation
                if s.contains(':') || s.contains('/') {
                    continue;
                }
                match Constraint::parse(s) {
                    Ok(ConstraintParse::Parsed(c)) => requirement.constraints.push(c),
                    Ok(ConstraintParse::Skipped) => {
                        warn!(gem = %requirement.name, constraint = %s, "skipping '!=' constraint");
                    },
                    Err(e) => {
                        warn!(gem = %requirement.name, constraint = %s, error = %e, "skipping malformed constraint");
                    },
                }
            },
            Token::Key(key) => {
                let value = rest.next();
                apply_option(&mut requirement, key, value);
            },
            Token::Symbol(key) => {
                // Hash-rocket option: `:require => false`
                if matches!(rest.peek(), Some(Token::Arrow)) {
                    rest.next();
                    let value = rest.next();
                    apply_option(&mut requirement, key, value);
                }
            },
            Token::Word(_) => {},
        }
    }

    Ok(requirement)
}

fn apply_option(requirement: &mut RootRequirement, key: &str, value: Option<&Token>) {
    match (key, value) {
        ("require", Some(Token::Word(w))) if w == "false" => {
            requirement.optional = true;
        },
        ("github", Some(Token::Str(repo))) => {
            requirement.source = Source::github(repo);
        },
        ("git", Some(Token::Str(url))) => {
            requirement.source = Source::git(url.clone());
        },
        ("path", Some(Token::Str(p))) => {
            requirement.source = Source::Path {
                local_path: p.clone(),
            };
        },
        ("branch", Some(Token::Str(v))) => {
            if let Source::Vcs { branch, .. } = &mut requirement.source {
                *branch = Some(v.clone());
            }
        },
        ("tag", Some(Token::Str(v))) => {
            if let Source::Vcs { tag, .. } = &mut requirement.source {
                *tag = Some(v.clone());
            }
        },
        ("ref", Some(Token::Str(v))) => {
            if let Source::Vcs { reference, .. } = &mut requirement.source {
                *reference = Some(v.clone());
            }
        },
        // All other options are ignored
        _ => {},
    }
}
