use crate::path::ValidationPath;
use crate::value::{describe, Value};
use std::fmt;

const PREFIX: &str = "validation error: ";

/// A failed check, with the rendered path of the value that failed it.
#[derive(Clone, Debug, PartialEq)]
pub enum Failure {
    /// The value wasn't of the expected kind.
    WrongType {
        path: String,
        expected: &'static str,
        found: String,
    },
    /// The value, or its length if `length` is set, was outside the allowed bounds.
    OutOfRange {
        path: String,
        min: Option<String>,
        max: Option<String>,
        found: String,
        length: bool,
    },
    /// A string didn't match the required regular expression.
    NoMatch { path: String, pattern: String },
    /// A custom predicate returned false or failed.
    Custom { path: String },
    /// Every alternative of a union failed. Holds each alternative's failure, in order.
    AnyOf { path: String, failures: Vec<Failure> },
}

impl Failure {
    /// The rendered path the failure occurred at.
    pub fn path(&self) -> &str {
        match self {
            Failure::WrongType { path, .. }
            | Failure::OutOfRange { path, .. }
            | Failure::NoMatch { path, .. }
            | Failure::Custom { path }
            | Failure::AnyOf { path, .. } => path,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Failure::WrongType {
                path,
                expected,
                found,
            } => write!(f, "{}expected {} at {}, found {}", PREFIX, expected, path, found),
            Failure::OutOfRange {
                path,
                min,
                max,
                found,
                length,
            } => {
                write!(f, "{}{}{} must be ", PREFIX, if *length { "length of " } else { "" }, path)?;
                match (min, max) {
                    (Some(min), Some(max)) if min == max => f.write_str(min)?,
                    (Some(min), Some(max)) => write!(f, "between {} and {}", min, max)?,
                    (Some(min), None) => write!(f, "greater than {}", min)?,
                    (None, Some(max)) => write!(f, "less than {}", max)?,
                    (None, None) => f.write_str("in range")?,
                }
                write!(f, ", found {}", found)
            }
            Failure::NoMatch { path, pattern } => write!(
                f,
                "{}{} must match regular expression /{}/",
                PREFIX, path, pattern
            ),
            Failure::Custom { path } => write!(f, "{}{} must pass custom check", PREFIX, path),
            Failure::AnyOf { failures, .. } => {
                write!(f, "{}any of these errors must be fixed:", PREFIX)?;
                for failure in failures {
                    write!(f, "\n{}", failure)?;
                }
                Ok(())
            }
        }
    }
}

/// The place a check is running, used to build [`Failure`]s for it.
pub(crate) struct Site<'a> {
    pub(crate) path: &'a ValidationPath,
    pub(crate) root_marker: &'a str,
}

impl<'a> Site<'a> {
    fn at(&self) -> String {
        self.path.render(self.root_marker)
    }

    pub(crate) fn wrong_type(&self, expected: &'static str, found: Option<&Value>) -> Failure {
        Failure::WrongType {
            path: self.at(),
            expected,
            found: describe(found),
        }
    }

    pub(crate) fn out_of_range(
        &self,
        min: Option<String>,
        max: Option<String>,
        found: String,
        length: bool,
    ) -> Failure {
        Failure::OutOfRange {
            path: self.at(),
            min,
            max,
            found,
            length,
        }
    }

    pub(crate) fn no_match(&self, pattern: &str) -> Failure {
        Failure::NoMatch {
            path: self.at(),
            pattern: pattern.to_string(),
        }
    }

    pub(crate) fn custom(&self) -> Failure {
        Failure::Custom { path: self.at() }
    }

    pub(crate) fn any_of(&self, failures: Vec<Failure>) -> Failure {
        Failure::AnyOf {
            path: self.at(),
            failures,
        }
    }
}
