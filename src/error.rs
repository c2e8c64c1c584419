use crate::validator::Failure;
use std::fmt;

use serde::de;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug)]
pub enum Error {
    /// Occurs when a schema was authored incorrectly: a marker holds the wrong type of value, a
    /// length or range specifier is malformed, or a fragment matches no known kind. The root node
    /// is checked when compiling; nested nodes are checked the first time a value reaches them, in
    /// which case `path` names where that happened.
    BadSchema {
        path: Option<String>,
        reason: String,
    },
    /// A value failed validation. Expected, and recoverable by the caller.
    FailValidate(Failure),
    /// Validation hit the configured nesting limit.
    ParseLimit(String),
    /// Occurs when serde deserialization of a schema or of [`Options`][crate::Options] fails.
    SerdeFail(String),
}

impl Error {
    pub(crate) fn bad_schema(reason: impl Into<String>) -> Self {
        Error::BadSchema {
            path: None,
            reason: reason.into(),
        }
    }

    /// Attach the location a lazily-checked schema node was reached at. Errors that already have a
    /// location, and non-schema errors, pass through untouched.
    pub(crate) fn at(self, location: impl FnOnce() -> String) -> Self {
        match self {
            Error::BadSchema { path: None, reason } => Error::BadSchema {
                path: Some(location()),
                reason,
            },
            other => other,
        }
    }

    /// True if this error is a defect in the schema rather than in the checked value.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::BadSchema { .. })
    }

    /// Get the validation failure, if this is one.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Error::FailValidate(failure) => Some(failure),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BadSchema {
                path: Some(ref path),
                ref reason,
            } => write!(f, "Invalid schema at {}: {}", path, reason),
            Error::BadSchema {
                path: None,
                ref reason,
            } => write!(f, "Invalid schema: {}", reason),
            Error::FailValidate(ref failure) => failure.fmt(f),
            Error::ParseLimit(ref err) => write!(f, "Hit parsing limit: {}", err),
            Error::SerdeFail(ref msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::convert::From<Failure> for Error {
    fn from(e: Failure) -> Self {
        Self::FailValidate(e)
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::SerdeFail(msg.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn location_is_attached_once() {
        let err = Error::bad_schema("invalid length specifier")
            .at(|| "body.sets".to_string())
            .at(|| "body".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid schema at body.sets: invalid length specifier"
        );
        assert!(err.is_schema_error());
        assert!(err.failure().is_none());
    }

    #[test]
    fn limit_passes_through() {
        let err = Error::ParseLimit("depth limit exceeded".into()).at(|| "x".into());
        assert_eq!(err.to_string(), "Hit parsing limit: depth limit exceeded");
        assert!(!err.is_schema_error());
    }
}
