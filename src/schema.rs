//! Schemas as plain nested data.
//!
//! A [`Schema`] is written the same way a value is: records, sequences and scalars. What kind of
//! check a fragment describes is decided by its shape (see [`classify`][crate::classify]):
//!
//! - [`Schema::Absent`] accepts only a missing value or null.
//! - A bare [`TypeMarker`] accepts any value of that type.
//! - A one-element [`Schema::List`] is an array whose every element matches the inner schema.
//! - A longer [`Schema::List`] is a tuple of that length.
//! - A [`Schema::Record`] is an object schema, unless it carries a marker key that makes it
//!   something else. Marker keys start with `$`:
//!     - `$type`: [`TypeMarker::Number`], [`TypeMarker::BigInt`], [`TypeMarker::String`], or
//!       [`TypeMarker::Array`]
//!     - `$union`: a list of alternative schemas
//!     - `$min`, `$max`, `$range`: exclusive numeric bounds
//!     - `$integer`: require a whole number
//!     - `$length`: a count, or an inclusive `[min, max]` pair
//!     - `$regex`: a pattern a string must match. Patterns use the [`regex`] crate's syntax, which
//!       has no look-around: `^(?!.*\W)` is written `^\w*$`, and "contains each of" rules are
//!       written as an alternation over the orders the parts can appear in
//!     - `$all`: the element schema of a `$type: Array` record
//!     - `$rest`: the schema for undeclared keys of an object
//!     - `$func`: a [`Predicate`] run after all structural checks pass
//!
//! Schemas can also be built with the builders in [`validator`][crate::validator], or loaded from
//! JSON with [`Schema::from_json`].

use crate::error::{Error, Result};
use crate::validator::Predicate;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub const TYPE: &str = "$type";
pub const UNION: &str = "$union";
pub const MIN: &str = "$min";
pub const MAX: &str = "$max";
pub const RANGE: &str = "$range";
pub const INTEGER: &str = "$integer";
pub const LENGTH: &str = "$length";
pub const REGEX: &str = "$regex";
pub const ALL: &str = "$all";
pub const REST: &str = "$rest";
pub const FUNC: &str = "$func";

/// Keys starting with this character are markers, not declared object keys.
pub const MARKER_PREFIX: char = '$';

/// A bare type, usable on its own or as the value of a `$type` marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeMarker {
    Number,
    BigInt,
    String,
    Array,
}

impl TypeMarker {
    pub fn name(&self) -> &'static str {
        match self {
            TypeMarker::Number => "Number",
            TypeMarker::BigInt => "BigInt",
            TypeMarker::String => "String",
            TypeMarker::Array => "Array",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Number" => Some(TypeMarker::Number),
            "BigInt" => Some(TypeMarker::BigInt),
            "String" => Some(TypeMarker::String),
            "Array" => Some(TypeMarker::Array),
            _ => None,
        }
    }
}

/// A schema fragment. See the [module-level documentation][crate::schema] for how each shape is
/// interpreted.
#[derive(Clone, Debug)]
pub enum Schema {
    Absent,
    Type(TypeMarker),
    Number(f64),
    BigInt(i128),
    Bool(bool),
    Text(String),
    Pattern(Box<Regex>),
    Func(Predicate),
    List(Vec<Schema>),
    Record(BTreeMap<String, Schema>),
}

/// True if a record key is a marker rather than a declared key.
pub fn is_marker(key: &str) -> bool {
    key.starts_with(MARKER_PREFIX)
}

impl Schema {
    /// An empty record, to be filled with [`with`][Schema::with].
    pub fn record() -> Self {
        Schema::Record(BTreeMap::new())
    }

    /// A one-element list: an array whose elements all match `element`.
    pub fn array_of(element: impl Into<Schema>) -> Self {
        Schema::List(vec![element.into()])
    }

    /// A list of two or more schemas: a tuple of exactly that many elements.
    pub fn tuple(elements: impl IntoIterator<Item = Schema>) -> Self {
        Schema::List(elements.into_iter().collect())
    }

    /// A record whose only marker is `$union`.
    pub fn union(alternatives: impl IntoIterator<Item = Schema>) -> Self {
        Schema::record().with(UNION, Schema::List(alternatives.into_iter().collect()))
    }

    /// A record carrying only a predicate.
    pub fn func(func: Predicate) -> Self {
        Schema::record().with(FUNC, func)
    }

    /// Add a key to a record, replacing any previous value under that key. A bare type marker is
    /// first turned into a record holding it as `$type`.
    ///
    /// # Panics
    ///
    /// Panics if the schema is anything other than a record or a type marker. Lists, absent
    /// schemas and scalars can't carry keys; see [`try_with`][Schema::try_with] for a version that
    /// returns an error instead.
    pub fn with(self, key: impl Into<String>, value: impl Into<Schema>) -> Self {
        match self.try_with(key, value) {
            Ok(schema) => schema,
            Err(err) => panic!("{}", err),
        }
    }

    /// Add a key to a record, like [`with`][Schema::with], failing with [`Error::BadSchema`] if
    /// the schema can't carry keys.
    pub fn try_with(self, key: impl Into<String>, value: impl Into<Schema>) -> Result<Self> {
        let mut fields = match self {
            Schema::Record(fields) => fields,
            Schema::Type(marker) => {
                let mut fields = BTreeMap::new();
                fields.insert(TYPE.to_string(), Schema::Type(marker));
                fields
            }
            other => {
                let key = key.into();
                return Err(Error::bad_schema(format!(
                    "can't add `{}` to a {}: only records and type markers carry keys",
                    key,
                    other.shape_name()
                )));
            }
        };
        fields.insert(key.into(), value.into());
        Ok(Schema::Record(fields))
    }

    /// Look up a key (declared or marker) of a record.
    pub fn get(&self, key: &str) -> Option<&Schema> {
        match self {
            Schema::Record(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, Schema>> {
        match self {
            Schema::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Schema]> {
        match self {
            Schema::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Short description of the fragment's shape, for schema errors.
    pub(crate) fn shape_name(&self) -> &'static str {
        match self {
            Schema::Absent => "absent",
            Schema::Type(_) => "type marker",
            Schema::Number(_) => "number",
            Schema::BigInt(_) => "bigint",
            Schema::Bool(_) => "boolean",
            Schema::Text(_) => "string",
            Schema::Pattern(_) => "regular expression",
            Schema::Func(_) => "predicate",
            Schema::List(_) => "list",
            Schema::Record(_) => "record",
        }
    }

    /// Build a schema from JSON.
    ///
    /// JSON `null` is [`Schema::Absent`], and the strings `"Number"`, `"BigInt"`, `"String"`, and
    /// `"Array"` are type markers. Inside a record, a string under `$regex` is compiled into a
    /// pattern, and when `$type` is `"BigInt"` the integer values of `$min`, `$max`, and `$range`
    /// become big integers. Predicates can't be expressed in JSON; add them afterwards with
    /// [`with`][Schema::with].
    ///
    /// A `$regex` the [`regex`] crate can't compile, including any pattern with look-around, fails
    /// with [`Error::BadSchema`].
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;
        Ok(match json {
            Json::Null => Schema::Absent,
            Json::Bool(v) => Schema::Bool(*v),
            Json::Number(n) => Schema::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => match TypeMarker::from_name(s) {
                Some(marker) => Schema::Type(marker),
                None => Schema::Text(s.clone()),
            },
            Json::Array(items) => Schema::List(
                items
                    .iter()
                    .map(Schema::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Json::Object(map) => {
                let bigint = map.get(TYPE).and_then(Json::as_str) == Some("BigInt");
                let mut fields = BTreeMap::new();
                for (key, value) in map {
                    let schema = match (key.as_str(), value) {
                        (REGEX, Json::String(source)) => {
                            let regex = Regex::new(source)
                                .map_err(|e| Error::bad_schema(format!("bad `$regex`: {}", e)))?;
                            Schema::Pattern(Box::new(regex))
                        }
                        (MIN, _) | (MAX, _) | (RANGE, _) if bigint => json_bigint(value)?,
                        _ => Schema::from_json(value)?,
                    };
                    fields.insert(key.clone(), schema);
                }
                Schema::Record(fields)
            }
        })
    }
}

fn json_bigint(json: &serde_json::Value) -> Result<Schema> {
    use serde_json::Value as Json;
    match json {
        Json::Number(n) => match n.as_i64() {
            Some(v) => Ok(Schema::BigInt(i128::from(v))),
            None => Ok(Schema::from_json(json)?),
        },
        Json::Array(items) => Ok(Schema::List(
            items.iter().map(json_bigint).collect::<Result<Vec<_>>>()?,
        )),
        _ => Schema::from_json(json),
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let json = serde_json::Value::deserialize(deserializer)?;
        Schema::from_json(&json).map_err(|e| D::Error::custom(e.to_string()))
    }
}

macro_rules! impl_schema_from {
    ($t: ty, $p: ident) => {
        impl From<$t> for Schema {
            fn from(v: $t) -> Self {
                Schema::$p(v)
            }
        }
    };
}

impl_schema_from!(TypeMarker, Type);
impl_schema_from!(f64, Number);
impl_schema_from!(i128, BigInt);
impl_schema_from!(bool, Bool);
impl_schema_from!(String, Text);
impl_schema_from!(Predicate, Func);
impl_schema_from!(Vec<Schema>, List);
impl_schema_from!(BTreeMap<String, Schema>, Record);

impl From<u32> for Schema {
    fn from(v: u32) -> Self {
        Schema::Number(f64::from(v))
    }
}

impl From<i32> for Schema {
    fn from(v: i32) -> Self {
        Schema::Number(f64::from(v))
    }
}

impl<'a> From<&'a str> for Schema {
    fn from(v: &str) -> Self {
        Schema::Text(v.to_string())
    }
}

impl From<Regex> for Schema {
    fn from(v: Regex) -> Self {
        Schema::Pattern(Box::new(v))
    }
}

impl From<()> for Schema {
    fn from((): ()) -> Self {
        Schema::Absent
    }
}
