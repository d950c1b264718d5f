//! Constraint operators and satisfaction checks.
//!
//! A constraint pairs an operator with an operand version and remembers
//! how many components the manifest spelled out, so `~> 3.0` keeps its
//! two-component semantics and display form.

use super::version::{Version, VersionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintOp {
    Eq,         // = 1.0.0
    Gt,         // > 1.0.0
    Gte,        // >= 1.0.0
    Lt,         // < 1.0.0
    Lte,        // <= 1.0.0
    Compatible, // ~> 1.0
}

/// A single `(operator, version)` predicate on versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub op: ConstraintOp,
    pub version: Version,
    /// How many components the constraint expression spelled out (1..=3)
    pub precision: u8,
}

/// Outcome of parsing a constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintParse {
    Parsed(Constraint),
    /// Recognized operator with no selection semantics (`!=`)
    Skipped,
}

impl Constraint {
    /// Create a constraint with full three-component precision
    pub fn new(op: ConstraintOp, version: Version) -> Self {
        Self {
            op,
            version,
            precision: 3,
        }
    }

    /// Parse a constraint expression such as `~> 3.0` or `>= 1.2.3`.
    ///
    /// A bare version means exact equality. `!=` is recognized but
    /// carries no selection semantics and parses to `Skipped`.
    pub fn parse(input: &str) -> Result<ConstraintParse, VersionError> {
        let input = input.trim();

        if let Some(rest) = input.strip_prefix("!=") {
            // Validate the operand so a mangled expression still errors
            Version::from_str(rest)?;
            return Ok(ConstraintParse::Skipped);
        }

        let (op, version_str) = if let Some(stripped) = input.strip_prefix("~>") {
            (ConstraintOp::Compatible, stripped)
        } else if let Some(stripped) = input.strip_prefix(">=") {
            (ConstraintOp::Gte, stripped)
        } else if let Some(stripped) = input.strip_prefix("<=") {
            (ConstraintOp::Lte, stripped)
        } else if let Some(stripped) = input.strip_prefix('>') {
            (ConstraintOp::Gt, stripped)
        } else if let Some(stripped) = input.strip_prefix('<') {
            (ConstraintOp::Lt, stripped)
        } else if let Some(stripped) = input.strip_prefix('=') {
            (ConstraintOp::Eq, stripped)
        } else {
            (ConstraintOp::Eq, input)
        };

        let version_str = version_str.trim();
        let version = Version::from_str(version_str)?;
        let precision = version_str.split('.').count().min(3) as u8;

        Ok(ConstraintParse::Parsed(Constraint {
            op,
            version,
            precision,
        }))
    }

    /// Check whether `v` satisfies this constraint.
    ///
    /// Non-compatible operators reduce to integer comparison of the
    /// packed forms. `~>` locks every component left of the rightmost
    /// one the constraint spelled out.
    pub fn satisfies(&self, v: Version) -> bool {
        let lhs = v.packed();
        let rhs = self.version.packed();
        match self.op {
            ConstraintOp::Eq => lhs == rhs,
            ConstraintOp::Gt => lhs > rhs,
            ConstraintOp::Gte => lhs >= rhs,
            ConstraintOp::Lt => lhs < rhs,
            ConstraintOp::Lte => lhs <= rhs,
            ConstraintOp::Compatible => {
                if self.precision >= 3 {
                    v.major == self.version.major
                        && v.minor == self.version.minor
                        && v.patch >= self.version.patch
                } else {
                    v.major == self.version.major && v.minor >= self.version.minor
                }
            },
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintOp::Eq => "=",
            ConstraintOp::Gt => ">",
            ConstraintOp::Gte => ">=",
            ConstraintOp::Lt => "<",
            ConstraintOp::Lte => "<=",
            ConstraintOp::Compatible => "~>",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.version.major)?;
        if self.precision >= 2 {
            write!(f, ".{}", self.version.minor)?;
        }
        if self.precision >= 3 {
            write!(f, ".{}", self.version.patch)?;
        }
        Ok(())
    }
}
