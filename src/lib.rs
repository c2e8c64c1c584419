//! lift-schema is a small declarative language for describing the shape of structured input, and
//! a recursive checker that verifies values against it. It was built to guard the request bodies
//! of an exercise-log service: every lift appended to a log, every account sign-up, and every
//! exercise lookup passes through a schema before the service touches it.
//!
//! It provides:
//!
//! - A schema format that is plain nested data, with `$`-prefixed marker keys for constraints
//! 	- Numbers and big integers with exclusive bounds and an optional whole-number check
//! 	- Strings with an inclusive length and an optional regular expression
//! 	- Arrays, tuples, objects with an optional schema for undeclared keys, and unions
//! 	- Custom predicates, synchronous or asynchronous, attached to any record-shaped node
//! - Builders for the common nodes, so a schema can be written in Rust without the markers
//! - Schemas loaded from JSON, with bare `"Number"`, `"String"`, `"BigInt"` strings as type markers
//! - Path-qualified diagnostics, like `validation error: body.weight must be between 0 and 1000,
//! 	found -1`
//! - A validator that is `Send + Sync`, shareable between tasks, and whose checks are `Send`
//! 	futures
//!
//! Schemas are checked for authoring mistakes when compiled, but only at the root. Nested nodes are
//! checked the first time a value reaches them. See [`Validator`] for how to check a whole schema
//! up front.
//!
//! # Example
//!
//! ```
//! # use lift_schema::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let username = StrSchema::new()
//!     .len_range(2, 24)
//!     .regex(regex::Regex::new(r"^\w+$")?)
//!     .build();
//! let validator = compile(username)?;
//!
//! futures_executor::block_on(validator.run(Some(&Value::from("lifter_01")), "username"))?;
//! let err = futures_executor::block_on(validator.run(Some(&Value::from("a")), "username"))
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "validation error: length of username must be between 2 and 24, found 1"
//! );
//! # Ok(())
//! # }
//! ```

mod classify;
mod error;
mod options;
mod path;
mod sanity;
mod value;

pub mod schema;
pub mod validator;

pub use self::classify::{classify, Kind};
pub use self::error::{Error, Result};
pub use self::options::Options;
pub use self::path::{Segment, ValidationPath};
pub use self::sanity::{check_schema, check_schema_deep};
pub use self::schema::{is_marker, Schema, TypeMarker};
pub use self::validator::*;
pub use self::value::Value;

/// The default maximum nesting depth of a validated value. Deeper values fail with
/// [`Error::ParseLimit`] instead of being checked.
pub const MAX_DEPTH: usize = 100;
/// What an empty validation path renders as in diagnostics, by default.
pub const ROOT_MARKER: &str = "<root>";
