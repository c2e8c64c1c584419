use crate::error::{Error, Result};
use crate::schema::{Schema, TypeMarker, FUNC, TYPE, UNION};
use std::fmt;

/// The structural kind a schema fragment describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Null,
    Union,
    Array,
    Tuple,
    Number,
    String,
    BigInt,
    Func,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "Null",
            Kind::Union => "Union",
            Kind::Array => "Array",
            Kind::Tuple => "Tuple",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::BigInt => "BigInt",
            Kind::Func => "Func",
            Kind::Object => "Object",
        })
    }
}

fn has_type(schema: &Schema, marker: TypeMarker) -> bool {
    match schema {
        Schema::Type(t) => *t == marker,
        Schema::Record(_) => matches!(schema.get(TYPE), Some(Schema::Type(t)) if *t == marker),
        _ => false,
    }
}

/// Determine which kind a schema fragment is.
///
/// Shapes overlap, so the order of the checks matters: absent, then `$union`, then array (a
/// one-element list or `$type: Array`), then tuple (a longer list), then the scalar types, then a
/// record holding nothing but a `$func`, and finally any other record as an object. Fragments matching
/// none of these fail with [`Error::BadSchema`].
pub fn classify(schema: &Schema) -> Result<Kind> {
    let kind = match schema {
        Schema::Absent => Kind::Null,
        Schema::Record(_) if matches!(schema.get(UNION), Some(Schema::List(_))) => Kind::Union,
        Schema::List(items) if items.len() == 1 => Kind::Array,
        _ if has_type(schema, TypeMarker::Array) && !matches!(schema, Schema::Type(_)) => {
            Kind::Array
        }
        Schema::List(items) if items.len() > 1 => Kind::Tuple,
        _ if has_type(schema, TypeMarker::Number) => Kind::Number,
        _ if has_type(schema, TypeMarker::String) => Kind::String,
        _ if has_type(schema, TypeMarker::BigInt) => Kind::BigInt,
        Schema::Record(fields)
            if fields.len() == 1 && matches!(fields.get(FUNC), Some(Schema::Func(_))) =>
        {
            Kind::Func
        }
        Schema::Record(_) => Kind::Object,
        Schema::List(_) => {
            return Err(Error::bad_schema(
                "an empty list is neither an array nor a tuple schema",
            ))
        }
        Schema::Type(TypeMarker::Array) => {
            return Err(Error::bad_schema(
                "a bare `Array` marker has no element schema; use a one-element list or `$all`",
            ))
        }
        other => {
            return Err(Error::bad_schema(format!(
                "a bare {} is not a schema",
                other.shape_name()
            )))
        }
    };
    Ok(kind)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::{LENGTH, MIN, REST};
    use crate::validator::Predicate;
    use regex::Regex;

    #[test]
    fn decision_order() {
        let num = Schema::Type(TypeMarker::Number);
        assert_eq!(classify(&Schema::Absent).unwrap(), Kind::Null);
        assert_eq!(classify(&num).unwrap(), Kind::Number);
        assert_eq!(classify(&TypeMarker::String.into()).unwrap(), Kind::String);
        assert_eq!(classify(&TypeMarker::BigInt.into()).unwrap(), Kind::BigInt);
        assert_eq!(classify(&Schema::array_of(num.clone())).unwrap(), Kind::Array);
        assert_eq!(
            classify(&Schema::tuple([num.clone(), num.clone()])).unwrap(),
            Kind::Tuple
        );
        assert_eq!(
            classify(&Schema::record().with(TYPE, TypeMarker::Array)).unwrap(),
            Kind::Array
        );
        assert_eq!(
            classify(&Schema::record().with(TYPE, TypeMarker::Number).with("$min", 0)).unwrap(),
            Kind::Number
        );
        assert_eq!(classify(&Schema::union([num.clone()])).unwrap(), Kind::Union);
        assert_eq!(
            classify(&Schema::func(Predicate::sync(|_| true))).unwrap(),
            Kind::Func
        );
        assert_eq!(classify(&Schema::record().with("a", num)).unwrap(), Kind::Object);
        assert_eq!(classify(&Schema::record()).unwrap(), Kind::Object);
    }

    #[test]
    fn union_wins_over_type() {
        let schema = Schema::union([TypeMarker::Number.into()]).with(TYPE, TypeMarker::String);
        assert_eq!(classify(&schema).unwrap(), Kind::Union);
    }

    #[test]
    fn func_with_declared_keys_is_object() {
        let schema = Schema::func(Predicate::sync(|_| true)).with("name", TypeMarker::String);
        assert_eq!(classify(&schema).unwrap(), Kind::Object);
    }

    #[test]
    fn func_with_other_markers_is_object() {
        let func = || Predicate::sync(|_| true);
        let rest = Schema::func(func()).with(REST, TypeMarker::Number);
        assert_eq!(classify(&rest).unwrap(), Kind::Object);
        let length = Schema::func(func()).with(LENGTH, 3);
        assert_eq!(classify(&length).unwrap(), Kind::Object);
        let min = Schema::func(func()).with(MIN, 0);
        assert_eq!(classify(&min).unwrap(), Kind::Object);
        // Bad `$func` values are left to the sanity check
        assert_eq!(classify(&Schema::record().with(FUNC, true)).unwrap(), Kind::Object);
    }

    #[test]
    fn non_list_union_is_object() {
        let schema = Schema::record().with(UNION, TypeMarker::Number);
        assert_eq!(classify(&schema).unwrap(), Kind::Object);
    }

    #[test]
    fn unclassifiable() {
        for schema in [
            Schema::Number(5.0),
            Schema::Text("Number".into()),
            Schema::Bool(true),
            Schema::List(Vec::new()),
            Schema::Type(TypeMarker::Array),
            Schema::Func(Predicate::sync(|_| true)),
            Schema::from(Regex::new("a").unwrap()),
        ] {
            let err = classify(&schema).unwrap_err();
            assert!(err.is_schema_error(), "{:?} should not classify", schema);
        }
    }
}
