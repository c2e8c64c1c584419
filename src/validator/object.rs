use super::*;

static ABSENT: Schema = Schema::Absent;

/// Builder for an object schema.
///
/// Validation passes if:
///
/// - The value is a map.
/// - The value held by each declared key passes that key's schema. A missing key is checked as an
///   absent value, so it only passes schemas that accept absence (like [`Schema::Absent`] or a
///   union including it).
/// - The value held by each undeclared key passes the `$rest` schema.
///
/// Without a `$rest` schema, undeclared keys are checked against [`Schema::Absent`]: any
/// undeclared key holding something other than null fails.
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: BTreeMap<String, Schema>,
    rest: Option<Schema>,
    func: Option<Predicate>,
}

impl ObjectSchema {
    /// Make a new builder with no declared keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key.
    ///
    /// Keys starting with `$` are markers, not declared keys, and `build` leaves them out. Use
    /// [`rest`][ObjectSchema::rest] and [`func`][ObjectSchema::func] to set the object's markers.
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.insert(key.into(), schema.into());
        self
    }

    /// Set the schema for undeclared keys.
    pub fn rest(mut self, rest: impl Into<Schema>) -> Self {
        self.rest = Some(rest.into());
        self
    }

    /// Set a custom check to run after the others pass.
    pub fn func(mut self, func: Predicate) -> Self {
        self.func = Some(func);
        self
    }

    /// Build this into a [`Schema`].
    pub fn build(self) -> Schema {
        let mut fields = self.fields;
        fields.retain(|key, _| !is_marker(key));
        let mut schema = Schema::Record(fields);
        if let Some(rest) = self.rest {
            schema = schema.with(REST, rest);
        }
        if let Some(func) = self.func {
            schema = schema.with(FUNC, func);
        }
        schema
    }
}

impl<'c> Context<'c> {
    pub(crate) async fn check_object(
        &self,
        fields: &BTreeMap<String, Schema>,
        rest: Option<&Schema>,
        path: &ValidationPath,
        value: Option<&Value>,
    ) -> Result<()> {
        let map = match value {
            Some(Value::Map(map)) => map,
            _ => return Err(self.site(path).wrong_type("object", value).into()),
        };
        let declared = fields.iter().filter(|(key, _)| !is_marker(key));
        for (key, schema) in declared {
            self.check(schema, path.key(key.as_str()), map.get(key)).await?;
        }
        let rest = rest.unwrap_or(&ABSENT);
        let undeclared = map
            .iter()
            .filter(|(key, _)| is_marker(key) || !fields.contains_key(key.as_str()));
        for (key, item) in undeclared {
            self.check(rest, path.key(key.as_str()), Some(item)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures_executor::block_on;
    use serde_json::json;

    fn run(schema: Schema, value: serde_json::Value) -> Result<()> {
        let validator = compile(schema).unwrap();
        block_on(validator.run(Some(&Value::from(value)), "body"))
    }

    fn log() -> Schema {
        ObjectSchema::new()
            .field("startTime", NumberSchema::new().min(0.0).build())
            .field(
                "endTime",
                Schema::union([Schema::Absent, NumberSchema::new().min(0.0).build()]),
            )
            .build()
    }

    #[test]
    fn declared_keys() {
        run(log(), json!({ "startTime": 1 })).unwrap();
        run(log(), json!({ "startTime": 1, "endTime": 2 })).unwrap();
        run(log(), json!({ "startTime": 1, "endTime": null })).unwrap();
        assert_eq!(
            run(log(), json!({ "endTime": 2 })).unwrap_err().to_string(),
            "validation error: expected number at body.startTime, found undefined"
        );
    }

    #[test]
    fn not_a_map() {
        for value in [json!([]), json!(null), json!("x"), json!(1)] {
            let err = run(log(), value).unwrap_err();
            assert!(
                matches!(err.failure(), Some(Failure::WrongType { expected: "object", .. })),
                "{}",
                err
            );
        }
    }

    #[test]
    fn extra_keys_forbidden_by_default() {
        assert_eq!(
            run(log(), json!({ "startTime": 1, "notes": "x" })).unwrap_err().to_string(),
            "validation error: expected null | undefined at body.notes, found \"x\""
        );
        // A null is indistinguishable from an absent value here
        run(log(), json!({ "startTime": 1, "notes": null })).unwrap();
    }

    #[test]
    fn rest_schema() {
        let tags = ObjectSchema::new()
            .field("name", TypeMarker::String)
            .rest(TypeMarker::Number)
            .build();
        run(tags.clone(), json!({ "name": "a", "x": 1, "y": 2 })).unwrap();
        assert_eq!(
            run(tags, json!({ "name": "a", "x": 1, "y": "2" })).unwrap_err().to_string(),
            "validation error: expected number at body.y, found \"2\""
        );
    }

    #[test]
    fn rest_with_func() {
        let schema = ObjectSchema::new()
            .rest(TypeMarker::Number)
            .func(Predicate::sync(|_| true))
            .build();
        assert_eq!(compile(schema.clone()).unwrap().kind(), Kind::Object);
        run(schema.clone(), json!({ "a": 1 })).unwrap();
        assert_eq!(
            run(schema.clone(), json!({ "a": "x" })).unwrap_err().to_string(),
            "validation error: expected number at body.a, found \"x\""
        );
        assert_eq!(
            run(schema, json!(5)).unwrap_err().to_string(),
            "validation error: expected object at body, found 5"
        );
    }

    #[test]
    fn marker_keys_in_values_are_undeclared() {
        let schema = ObjectSchema::new()
            .field("name", TypeMarker::String)
            .rest(TypeMarker::Number)
            .build();
        assert!(run(schema, json!({ "name": "a", "$rest": "x" })).is_err());
    }

    #[test]
    fn builder_drops_marker_keys() {
        let schema = ObjectSchema::new().field("$min", 3).field("a", TypeMarker::Number).build();
        assert!(schema.get(MIN).is_none());
        assert!(schema.get("a").is_some());
    }

    #[test]
    fn object_func() {
        let ordered = Predicate::sync(|v| {
            let start = v.and_then(|v| v.get("startTime")).and_then(Value::as_f64);
            let end = v.and_then(|v| v.get("endTime")).and_then(Value::as_f64);
            match (start, end) {
                (Some(start), Some(end)) => start <= end,
                _ => true,
            }
        });
        let schema = log().with(FUNC, ordered);
        run(schema.clone(), json!({ "startTime": 1, "endTime": 2 })).unwrap();
        assert_eq!(
            run(schema, json!({ "startTime": 3, "endTime": 2 })).unwrap_err().to_string(),
            "validation error: body must pass custom check"
        );
    }
}
