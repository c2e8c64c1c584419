//! Schema-authoring checks, run before any value is validated against a node.

use crate::classify::{classify, Kind};
use crate::error::{Error, Result};
use crate::schema::*;

fn check_length(length: Option<&Schema>, kind: Kind) -> Result<()> {
    match length {
        None | Some(Schema::Number(_)) => Ok(()),
        Some(Schema::List(pair)) => match pair.as_slice() {
            [Schema::Number(min), Schema::Number(max)] if min < max => Ok(()),
            _ => Err(Error::bad_schema(format!(
                "invalid length specifier for {}: expected a count or an ordered [min, max] pair",
                kind
            ))),
        },
        Some(other) => Err(Error::bad_schema(format!(
            "invalid length specifier for {}: got a {}",
            kind,
            other.shape_name()
        ))),
    }
}

fn same_numeric_kind(bound: &Schema, kind: Kind) -> bool {
    matches!(
        (bound, kind),
        (Schema::Number(_), Kind::Number) | (Schema::BigInt(_), Kind::BigInt)
    )
}

fn check_bounds(schema: &Schema, kind: Kind) -> Result<()> {
    if let Some(range) = schema.get(RANGE) {
        let ordered = match range.as_list() {
            Some([Schema::Number(min), Schema::Number(max)]) if kind == Kind::Number => min < max,
            Some([Schema::BigInt(min), Schema::BigInt(max)]) if kind == Kind::BigInt => min < max,
            _ => false,
        };
        if !ordered {
            return Err(Error::bad_schema(format!(
                "invalid range specifier for {}: expected an ordered [min, max] pair",
                kind
            )));
        }
    }
    for marker in [MIN, MAX] {
        if let Some(bound) = schema.get(marker) {
            if !same_numeric_kind(bound, kind) {
                return Err(Error::bad_schema(format!(
                    "`{}` of a {} schema can't be a {}",
                    marker,
                    kind,
                    bound.shape_name()
                )));
            }
        }
    }
    match schema.get(INTEGER) {
        None | Some(Schema::Bool(_)) => Ok(()),
        Some(other) => Err(Error::bad_schema(format!(
            "`$integer` must be a boolean, got a {}",
            other.shape_name()
        ))),
    }
}

/// Check a single schema node for authoring mistakes, returning its kind.
///
/// Only this node is inspected: nested schemas are checked when a value first reaches them, or
/// all at once with [`check_schema_deep`]. Fails with [`Error::BadSchema`] if:
///
/// - The node can't be classified.
/// - A `$length` is neither a count nor a strictly ordered `[min, max]` pair.
/// - A `$range` isn't a strictly ordered pair, or it or `$min`/`$max` hold a different numeric
///   type than the node checks.
/// - A `$regex` isn't a regular expression.
/// - An array node is neither a list nor carries `$all`.
/// - A `$func` isn't a predicate.
/// - A record holds both `$union` and `$type`, a `$union` that isn't a non-empty list, or a
///   `$type` that doesn't name a kind.
pub fn check_schema(schema: &Schema) -> Result<Kind> {
    let kind = classify(schema)?;
    match kind {
        Kind::Array => {
            check_length(schema.get(LENGTH), kind)?;
            if !matches!(schema, Schema::List(_)) && schema.get(ALL).is_none() {
                return Err(Error::bad_schema(
                    "an array schema needs either a one-element list or an `$all` schema",
                ));
            }
        }
        Kind::Number | Kind::BigInt => check_bounds(schema, kind)?,
        Kind::String => {
            check_length(schema.get(LENGTH), kind)?;
            match schema.get(REGEX) {
                None | Some(Schema::Pattern(_)) => (),
                Some(other) => {
                    return Err(Error::bad_schema(format!(
                        "`$regex` must be a regular expression, got a {}",
                        other.shape_name()
                    )))
                }
            }
        }
        Kind::Union => {
            if matches!(schema.get(UNION).and_then(Schema::as_list), Some([])) {
                return Err(Error::bad_schema("`$union` has no alternatives"));
            }
        }
        Kind::Null | Kind::Tuple | Kind::Func | Kind::Object => (),
    }

    if let Schema::Record(fields) = schema {
        if fields.contains_key(UNION) && fields.contains_key(TYPE) {
            return Err(Error::bad_schema(
                "a schema can't carry both `$union` and `$type`",
            ));
        }
        match fields.get(UNION) {
            None | Some(Schema::List(_)) => (),
            Some(other) => {
                return Err(Error::bad_schema(format!(
                    "`$union` must be a list of schemas, got a {}",
                    other.shape_name()
                )))
            }
        }
        match fields.get(TYPE) {
            None | Some(Schema::Type(_)) => (),
            Some(other) => {
                return Err(Error::bad_schema(format!(
                    "`$type` must be Number, BigInt, String, or Array, got a {}",
                    other.shape_name()
                )))
            }
        }
        match fields.get(FUNC) {
            None | Some(Schema::Func(_)) => (),
            Some(other) => {
                return Err(Error::bad_schema(format!(
                    "`$func` must be a predicate, got a {}",
                    other.shape_name()
                )))
            }
        }
    }
    Ok(kind)
}

/// The schemas nested directly inside a node, in the order a value would reach them.
pub(crate) fn children<'a>(schema: &'a Schema, kind: Kind) -> Vec<&'a Schema> {
    match (kind, schema) {
        (Kind::Union, _) => schema
            .get(UNION)
            .and_then(Schema::as_list)
            .map(|alts| alts.iter().collect())
            .unwrap_or_default(),
        (Kind::Array, Schema::List(items)) | (Kind::Tuple, Schema::List(items)) => {
            items.iter().collect()
        }
        (Kind::Array, _) => schema.get(ALL).into_iter().collect(),
        (Kind::Object, Schema::Record(fields)) => fields
            .iter()
            .filter(|(key, _)| !is_marker(key))
            .map(|(_, child)| child)
            .chain(fields.get(REST))
            .collect(),
        _ => Vec::new(),
    }
}

/// Check a schema and every schema nested inside it, failing on the first authoring mistake.
pub fn check_schema_deep(schema: &Schema) -> Result<()> {
    let kind = check_schema(schema)?;
    children(schema, kind)
        .into_iter()
        .try_for_each(check_schema_deep)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::validator::Predicate;
    use regex::Regex;

    fn string() -> Schema {
        Schema::record().with(TYPE, TypeMarker::String)
    }

    fn number() -> Schema {
        Schema::record().with(TYPE, TypeMarker::Number)
    }

    #[test]
    fn length_specifiers() {
        assert!(check_schema(&string().with(LENGTH, 3)).is_ok());
        assert!(check_schema(&string().with(LENGTH, vec![Schema::from(2), 24.into()])).is_ok());
        assert!(check_schema(&string().with(LENGTH, vec![Schema::from(8), f64::INFINITY.into()])).is_ok());
        assert!(check_schema(&string().with(LENGTH, vec![Schema::from(5), 5.into()])).is_err());
        assert!(check_schema(&string().with(LENGTH, vec![Schema::from(6), 5.into()])).is_err());
        assert!(check_schema(&string().with(LENGTH, vec![Schema::from(1)])).is_err());
        assert!(check_schema(&string().with(LENGTH, "3")).is_err());

        let array = Schema::record().with(TYPE, TypeMarker::Array).with(ALL, number());
        assert!(check_schema(&array.clone().with(LENGTH, vec![Schema::from(0), 4.into()])).is_ok());
        assert!(check_schema(&array.with(LENGTH, vec![Schema::from(4), 0.into()])).is_err());
    }

    #[test]
    fn bound_types() {
        assert!(check_schema(&number().with(MIN, 0).with(MAX, 10)).is_ok());
        assert!(check_schema(&number().with(RANGE, vec![Schema::from(0), 10.into()])).is_ok());
        assert!(check_schema(&number().with(RANGE, vec![Schema::from(10), 0.into()])).is_err());
        assert!(check_schema(&number().with(RANGE, vec![Schema::from(0)])).is_err());
        assert!(check_schema(&number().with(MIN, 0i128)).is_err());
        assert!(check_schema(&number().with(MAX, "10")).is_err());
        assert!(check_schema(&number().with(INTEGER, 1)).is_err());

        let bigint = Schema::record().with(TYPE, TypeMarker::BigInt);
        assert!(check_schema(&bigint.clone().with(MIN, 0i128)).is_ok());
        assert!(check_schema(&bigint.clone().with(MIN, 0)).is_err());
        assert!(check_schema(&bigint.with(RANGE, vec![Schema::BigInt(0), Schema::BigInt(9)])).is_ok());
    }

    #[test]
    fn regex_marker() {
        let re = Regex::new(r"^\w+$").unwrap();
        assert!(check_schema(&string().with(REGEX, re)).is_ok());
        assert!(check_schema(&string().with(REGEX, r"^\w+$")).is_err());
    }

    #[test]
    fn array_needs_elements() {
        let bare = Schema::record().with(TYPE, TypeMarker::Array);
        assert!(check_schema(&bare).is_err());
        assert!(check_schema(&bare.with(ALL, number())).is_ok());
        assert!(check_schema(&Schema::array_of(number())).is_ok());
    }

    #[test]
    fn func_marker() {
        assert!(check_schema(&number().with(FUNC, Predicate::sync(|_| true))).is_ok());
        let err = check_schema(&number().with(FUNC, true)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid schema: `$func` must be a predicate, got a boolean"
        );
    }

    #[test]
    fn func_beside_other_markers() {
        let func = Predicate::sync(|_| true);
        let rest = Schema::func(func.clone()).with(REST, number());
        assert_eq!(check_schema(&rest).unwrap(), Kind::Object);
        let length = Schema::func(func.clone()).with(LENGTH, 3);
        assert_eq!(check_schema(&length).unwrap(), Kind::Object);
        assert_eq!(check_schema(&Schema::func(func)).unwrap(), Kind::Func);

        let bad_rest = Schema::func(Predicate::sync(|_| true)).with(REST, number().with(MIN, "0"));
        assert!(check_schema_deep(&bad_rest).is_err());
    }

    #[test]
    fn ambiguous_records() {
        let union = Schema::union([number()]);
        assert!(check_schema(&union).is_ok());
        assert!(check_schema(&union.with(TYPE, TypeMarker::Number)).is_err());
        assert!(check_schema(&Schema::union([])).is_err());
        assert!(check_schema(&Schema::record().with(UNION, number())).is_err());
        assert!(check_schema(&Schema::record().with(TYPE, "Boolean")).is_err());
    }

    #[test]
    fn shallow_and_deep() {
        let bad_child = string().with(LENGTH, vec![Schema::from(3), 1.into()]);
        let schema = Schema::record()
            .with("name", bad_child.clone())
            .with("tags", Schema::array_of(Schema::union([bad_child])));
        assert_eq!(check_schema(&schema).unwrap(), Kind::Object);
        assert!(check_schema_deep(&schema).unwrap_err().is_schema_error());

        let rest = Schema::record().with(REST, number().with(MIN, "0"));
        assert!(check_schema(&rest).is_ok());
        assert!(check_schema_deep(&rest).is_err());
    }
}
