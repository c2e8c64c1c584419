//! Schema builders, and the [`Validator`] that runs a schema against values.
//!
//! A schema is plain data (see [`Schema`]), so it can be written out by hand. The builders here
//! are a shorter way to write the common record-shaped nodes, each of which ends in `build()`:
//!
//! - [`NumberSchema`] and [`BigIntSchema`] - for numbers, with exclusive bounds.
//! - [`StrSchema`] - for strings, with an inclusive length and an optional regular expression.
//! - [`ArraySchema`] - for sequences whose elements share one schema.
//! - [`ObjectSchema`] - for records with declared keys and an optional `$rest` schema.
//! - [`UnionSchema`] - for matching any one of several schemas.
//!
//! Any of them can carry a [`Predicate`] that runs after the structural checks.
//!
//! # Examples
//!
//! A lift appended to an exercise log: the exercise must exist, the weight is a positive number
//! below 1000, and sets and reps are whole numbers.
//!
//! ```
//! # use lift_schema::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let exercise_exists = Predicate::sync(|v| v.and_then(Value::as_str) == Some("bench"));
//! let lift = ObjectSchema::new()
//!     .field("exerciseId", StrSchema::new().func(exercise_exists).build())
//!     .field("weight", NumberSchema::new().range(0.0, 1000.0).build())
//!     .field("sets", NumberSchema::new().range(0.0, 100.0).integer(true).build())
//!     .field("reps", NumberSchema::new().range(0.0, 1000.0).integer(true).build())
//!     .build();
//! let validator = compile(lift)?;
//!
//! let value = Value::from(serde_json::json!({
//!     "exerciseId": "bench", "weight": 80, "sets": 3, "reps": 5
//! }));
//! futures_executor::block_on(validator.run(Some(&value), "body"))?;
//! # Ok(())
//! # }
//! ```

mod array;
mod diagnostic;
mod func;
mod multi;
mod number;
mod object;
mod string;

pub use self::array::*;
pub use self::diagnostic::*;
pub use self::func::*;
pub use self::multi::*;
pub use self::number::*;
pub use self::object::*;
pub use self::string::*;

use crate::classify::Kind;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::path::ValidationPath;
use crate::sanity::{check_schema, check_schema_deep};
use crate::schema::*;
use crate::value::{format_number, Value};
use futures_core::future::BoxFuture;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Inclusive length bounds read from a `$length` marker. An exact count `n` becomes `[n, n]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LengthBounds {
    min: f64,
    max: f64,
}

impl LengthBounds {
    pub(crate) fn read(schema: &Schema) -> Option<Self> {
        match schema.get(LENGTH)? {
            Schema::Number(n) => Some(Self { min: *n, max: *n }),
            Schema::List(pair) => match pair.as_slice() {
                [Schema::Number(min), Schema::Number(max)] => Some(Self {
                    min: *min,
                    max: *max,
                }),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn check(&self, site: &Site, len: usize) -> Result<(), Failure> {
        let len_f = len as f64;
        if self.min <= len_f && len_f <= self.max {
            Ok(())
        } else {
            Err(site.out_of_range(
                Some(format_number(self.min)),
                Some(format_number(self.max)),
                len.to_string(),
                true,
            ))
        }
    }
}

/// A schema node read into one arm per kind, after its authoring checks have passed.
#[derive(Clone, Debug)]
pub(crate) enum Shape<'a> {
    Null,
    Number(NumberRules),
    BigInt(BigIntRules),
    Str(StrRules<'a>),
    Array {
        element: &'a Schema,
        length: Option<LengthBounds>,
    },
    Tuple(&'a [Schema]),
    Object {
        fields: &'a BTreeMap<String, Schema>,
        rest: Option<&'a Schema>,
    },
    Union(&'a [Schema]),
    Func,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<'a> {
    pub(crate) shape: Shape<'a>,
    pub(crate) func: Option<&'a Predicate>,
}

impl<'a> Node<'a> {
    /// Check a schema node for authoring mistakes, then read it.
    pub(crate) fn read(schema: &'a Schema) -> Result<Self> {
        let kind = check_schema(schema)?;
        let shape = match (kind, schema) {
            (Kind::Null, _) => Shape::Null,
            (Kind::Number, _) => Shape::Number(NumberRules::read(schema)),
            (Kind::BigInt, _) => Shape::BigInt(BigIntRules::read(schema)),
            (Kind::String, _) => Shape::Str(StrRules::read(schema)),
            (Kind::Array, Schema::List(items)) => Shape::Array {
                element: items
                    .first()
                    .ok_or_else(|| Error::bad_schema("array schema has no element schema"))?,
                length: None,
            },
            (Kind::Array, _) => Shape::Array {
                element: schema
                    .get(ALL)
                    .ok_or_else(|| Error::bad_schema("array schema has no `$all`"))?,
                length: LengthBounds::read(schema),
            },
            (Kind::Tuple, Schema::List(items)) => Shape::Tuple(items),
            (Kind::Object, Schema::Record(fields)) => Shape::Object {
                fields,
                rest: fields.get(REST),
            },
            (Kind::Union, _) => Shape::Union(
                schema
                    .get(UNION)
                    .and_then(Schema::as_list)
                    .ok_or_else(|| Error::bad_schema("`$union` must be a list of schemas"))?,
            ),
            (Kind::Func, _) => Shape::Func,
            (kind, _) => {
                return Err(Error::bad_schema(format!(
                    "a {} can't describe a {} schema",
                    schema.shape_name(),
                    kind
                )))
            }
        };
        let func = match schema.get(FUNC) {
            Some(Schema::Func(func)) => Some(func),
            _ => None,
        };
        Ok(Self { shape, func })
    }
}

/// Everything a single validation call shares across its recursion.
pub(crate) struct Context<'c> {
    options: &'c Options,
}

impl<'c> Context<'c> {
    pub(crate) fn site<'p>(&'p self, path: &'p ValidationPath) -> Site<'p> {
        Site {
            path,
            root_marker: &self.options.root_marker,
        }
    }

    /// Check a value against a schema node. Nodes are checked depth-first, in order, and the first
    /// failure ends the check.
    pub(crate) fn check<'a>(
        &'a self,
        schema: &'a Schema,
        path: ValidationPath,
        value: Option<&'a Value>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if path.depth() > self.options.max_depth {
                return Err(Error::ParseLimit(format!(
                    "depth limit of {} exceeded at {}",
                    self.options.max_depth,
                    path.render(&self.options.root_marker)
                )));
            }
            let node =
                Node::read(schema).map_err(|e| e.at(|| path.render(&self.options.root_marker)))?;

            match node.shape {
                Shape::Null => {
                    if !matches!(value, None | Some(Value::Null)) {
                        return Err(self.site(&path).wrong_type("null | undefined", value).into());
                    }
                }
                Shape::Number(ref rules) => rules.validate(&self.site(&path), value)?,
                Shape::BigInt(ref rules) => rules.validate(&self.site(&path), value)?,
                Shape::Str(ref rules) => rules.validate(&self.site(&path), value)?,
                Shape::Array { element, length } => {
                    self.check_array(element, length, &path, value).await?
                }
                Shape::Tuple(elements) => self.check_tuple(elements, &path, value).await?,
                Shape::Object { fields, rest } => {
                    self.check_object(fields, rest, &path, value).await?
                }
                Shape::Union(alternatives) => self.check_union(alternatives, &path, value).await?,
                Shape::Func => (),
            }

            if let Some(func) = node.func {
                self.check_func(func, &path, value).await?;
            }
            Ok(())
        })
    }
}

/// A compiled schema, ready to validate values.
///
/// Compiling checks the root node of the schema for authoring mistakes. Nested nodes are checked
/// the first time a value reaches them, so a mistake deep inside a schema shows up as an
/// [`Error::BadSchema`] from [`run`][Validator::run] rather than from [`compile`]. Use
/// [`deep_check`][Validator::deep_check], or turn on
/// [`eager_schema_check`][Options::eager_schema_check], to find them all up front.
///
/// A `Validator` holds no state between calls: it may be shared freely, and running it twice on
/// the same value gives the same result.
#[derive(Clone, Debug)]
pub struct Validator {
    schema: Schema,
    options: Options,
    kind: Kind,
}

impl Validator {
    /// Compile a schema with the default [`Options`].
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_options(schema, Options::default())
    }

    /// Compile a schema with the given [`Options`].
    pub fn with_options(schema: Schema, options: Options) -> Result<Self> {
        if options.eager_schema_check {
            check_schema_deep(&schema)?;
        }
        let kind = check_schema(&schema)?;
        debug!(%kind, eager = options.eager_schema_check, "compiled schema");
        Ok(Self {
            schema,
            options,
            kind,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The kind of the schema's root node.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Check every node of the schema for authoring mistakes.
    pub fn deep_check(&self) -> Result<()> {
        check_schema_deep(&self.schema)
    }

    /// Validate a value, which may be absent. `label` names the value's root in diagnostics; an
    /// empty label shows as the configured root marker.
    pub async fn run(&self, value: Option<&Value>, label: &str) -> Result<()> {
        let context = Context {
            options: &self.options,
        };
        let result = context
            .check(&self.schema, ValidationPath::new(label), value)
            .await;
        if let Err(ref err) = result {
            debug!(label, error = %err, "validation failed");
        }
        result
    }

    /// Validate a present value, with an empty root label.
    pub async fn check(&self, value: &Value) -> Result<()> {
        self.run(Some(value), "").await
    }
}

/// Compile a schema with the default [`Options`]. See [`Validator`].
pub fn compile(schema: Schema) -> Result<Validator> {
    Validator::new(schema)
}
