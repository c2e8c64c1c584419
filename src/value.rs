use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// A candidate value, as handed to a [`Validator`][crate::Validator].
///
/// Absence is not a variant: a missing value is `None` wherever an `Option<&Value>` is taken, and
/// is distinct from an explicit [`Value::Null`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Name of this value's runtime kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<i128> {
        match *self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(ref val) = *self {
            Some(val.as_str())
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        if let Value::Array(ref val) = *self {
            Some(val.as_slice())
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        if let Value::Map(ref val) = *self {
            Some(val)
        } else {
            None
        }
    }

    /// Look up a key in a map value. `None` if this isn't a map or the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl std::default::Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

static NULL: Value = Value::Null;

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_array().and_then(|v| v.get(index)).unwrap_or(&NULL)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, index: &str) -> &Self::Output {
        self.get(index).unwrap_or(&NULL)
    }
}

/// Format a number the way diagnostics show it: whole numbers without a fractional part, and
/// infinities spelled out.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_infinite() {
        String::from(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Number(v) => f.write_str(&format_number(*v)),
            Value::BigInt(v) => write!(f, "{}n", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Array(v) => {
                f.write_str("[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Value::Map(v) => {
                f.write_str("{")?;
                for (i, (key, item)) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, item)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Longest rendering of a value a diagnostic will hold, in characters.
const DESCRIBE_LIMIT: usize = 64;

/// Render a possibly-absent value for a diagnostic. Long renderings are cut short and end in `...`.
pub(crate) fn describe(value: Option<&Value>) -> String {
    let value = match value {
        Some(value) => value,
        None => return "undefined".to_string(),
    };
    let mut rendered = value.to_string();
    if let Some((cut, _)) = rendered.char_indices().nth(DESCRIBE_LIMIT) {
        rendered.truncate(cut);
        rendered.push_str("...");
    }
    rendered
}

macro_rules! impl_value_from_number {
    ($t: ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Number(v as f64)
            }
        }
    };
}

macro_rules! impl_value_from {
    ($t: ty, $p: ident) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$p(v)
            }
        }
    };
}

impl_value_from!(bool, Bool);
impl_value_from!(f64, Number);
impl_value_from!(i128, BigInt);
impl_value_from!(String, Str);
impl_value_from!(Vec<Value>, Array);
impl_value_from!(BTreeMap<String, Value>, Map);
impl_value_from_number!(f32);
impl_value_from_number!(u8);
impl_value_from_number!(u16);
impl_value_from_number!(u32);
impl_value_from_number!(u64);
impl_value_from_number!(usize);
impl_value_from_number!(i8);
impl_value_from_number!(i16);
impl_value_from_number!(i32);
impl_value_from_number!(i64);
impl_value_from_number!(isize);

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(v: Cow<'a, str>) -> Self {
        Value::Str(v.into_owned())
    }
}

impl<V: Into<Value>> std::iter::FromIterator<V> for Value {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let v: Vec<Value> = iter.into_iter().map(Into::into).collect();
        Value::Array(v)
    }
}

/// Parsed request bodies arrive as JSON. Every JSON number becomes a [`Value::Number`], since JSON
/// has no separate big-integer type.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(v) => Value::Str(v),
            Json::Array(v) => Value::Array(v.into_iter().map(Value::from).collect()),
            Json::Object(v) => Value::Map(v.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}

impl<'a> From<&'a serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        Value::from(v.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json() {
        let value = Value::from(json!({
            "exerciseId": "bench",
            "weight": 80.5,
            "sets": 3,
            "tags": ["heavy", null],
        }));
        assert_eq!(value["exerciseId"], Value::from("bench"));
        assert_eq!(value["weight"].as_f64(), Some(80.5));
        assert_eq!(value["sets"], Value::Number(3.0));
        assert!(value["tags"][1].is_null());
        assert!(value["missing"].is_null());
        assert!(value.get("missing").is_none());
    }

    #[test]
    fn display() {
        let value = Value::from(json!({ "a": [1, 2.5, "x"], "b": null }));
        assert_eq!(value.to_string(), r#"{"a": [1, 2.5, "x"], "b": null}"#);
        assert_eq!(Value::BigInt(12).to_string(), "12n");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(describe(None), "undefined");
        assert_eq!(describe(Some(&Value::Bool(true))), "true");
    }

    #[test]
    fn describe_is_bounded() {
        let big: Value = (0..100_000).collect();
        let rendered = describe(Some(&big));
        assert_eq!(rendered.chars().count(), DESCRIBE_LIMIT + 3);
        assert!(rendered.starts_with("[0, 1, 2, "));
        assert!(rendered.ends_with("..."));

        let text = Value::from("é".repeat(DESCRIBE_LIMIT));
        let rendered = describe(Some(&text));
        assert!(rendered.starts_with("\"é"));
        assert!(rendered.ends_with("é..."));

        let short = Value::from("x".repeat(DESCRIBE_LIMIT - 2));
        assert_eq!(describe(Some(&short)), format!("{:?}", "x".repeat(DESCRIBE_LIMIT - 2)));
    }
}
