use super::*;

/// Builder for a `$type: Number` schema.
///
/// Bounds are exclusive on both ends: a value passes if it is greater than `min` and less than
/// `max`. If `integer` is set, the value must also be a whole number.
#[derive(Clone, Debug, Default)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
    func: Option<Predicate>,
}

impl NumberSchema {
    /// Make a new builder with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclusive minimum.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the exclusive maximum.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set both exclusive bounds.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Set whether the number must be whole.
    pub fn integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    /// Set a custom check to run after the others pass.
    pub fn func(mut self, func: Predicate) -> Self {
        self.func = Some(func);
        self
    }

    /// Build this into a [`Schema`].
    pub fn build(self) -> Schema {
        let mut schema = Schema::record().with(TYPE, TypeMarker::Number);
        if let Some(min) = self.min {
            schema = schema.with(MIN, min);
        }
        if let Some(max) = self.max {
            schema = schema.with(MAX, max);
        }
        if self.integer {
            schema = schema.with(INTEGER, true);
        }
        if let Some(func) = self.func {
            schema = schema.with(FUNC, func);
        }
        schema
    }
}

/// Builder for a `$type: BigInt` schema. Bounds are exclusive, as for [`NumberSchema`].
#[derive(Clone, Debug, Default)]
pub struct BigIntSchema {
    min: Option<i128>,
    max: Option<i128>,
    func: Option<Predicate>,
}

impl BigIntSchema {
    /// Make a new builder with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclusive minimum.
    pub fn min(mut self, min: i128) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the exclusive maximum.
    pub fn max(mut self, max: i128) -> Self {
        self.max = Some(max);
        self
    }

    /// Set a custom check to run after the others pass.
    pub fn func(mut self, func: Predicate) -> Self {
        self.func = Some(func);
        self
    }

    /// Build this into a [`Schema`].
    pub fn build(self) -> Schema {
        let mut schema = Schema::record().with(TYPE, TypeMarker::BigInt);
        if let Some(min) = self.min {
            schema = schema.with(MIN, min);
        }
        if let Some(max) = self.max {
            schema = schema.with(MAX, max);
        }
        if let Some(func) = self.func {
            schema = schema.with(FUNC, func);
        }
        schema
    }
}

/// `$range` replaces `$min` and `$max` when present.
fn read_bounds<T: Copy>(schema: &Schema, get: impl Fn(&Schema) -> Option<T>) -> (Option<T>, Option<T>) {
    if let Some([min, max]) = schema.get(RANGE).and_then(Schema::as_list) {
        return (get(min), get(max));
    }
    (
        schema.get(MIN).and_then(&get),
        schema.get(MAX).and_then(&get),
    )
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NumberRules {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

impl NumberRules {
    pub(crate) fn read(schema: &Schema) -> Self {
        let (min, max) = read_bounds(schema, |s| match s {
            Schema::Number(n) => Some(*n),
            _ => None,
        });
        Self {
            min,
            max,
            integer: matches!(schema.get(INTEGER), Some(Schema::Bool(true))),
        }
    }

    pub(crate) fn validate(&self, site: &Site, value: Option<&Value>) -> Result<(), Failure> {
        let n = match value {
            Some(Value::Number(n)) => *n,
            _ => return Err(site.wrong_type("number", value)),
        };
        let below = self.min.map_or(false, |min| !(min < n));
        let above = self.max.map_or(false, |max| !(n < max));
        if below || above {
            return Err(site.out_of_range(
                self.min.map(format_number),
                self.max.map(format_number),
                format_number(n),
                false,
            ));
        }
        if self.integer && !(n.is_finite() && n.fract() == 0.0) {
            return Err(site.wrong_type("integer", value));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BigIntRules {
    min: Option<i128>,
    max: Option<i128>,
}

impl BigIntRules {
    pub(crate) fn read(schema: &Schema) -> Self {
        let (min, max) = read_bounds(schema, |s| match s {
            Schema::BigInt(n) => Some(*n),
            _ => None,
        });
        Self { min, max }
    }

    pub(crate) fn validate(&self, site: &Site, value: Option<&Value>) -> Result<(), Failure> {
        let n = match value {
            Some(Value::BigInt(n)) => *n,
            _ => return Err(site.wrong_type("bigint", value)),
        };
        let below = self.min.map_or(false, |min| min >= n);
        let above = self.max.map_or(false, |max| n >= max);
        if below || above {
            return Err(site.out_of_range(
                self.min.map(|v| v.to_string()),
                self.max.map(|v| v.to_string()),
                n.to_string(),
                false,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    fn validate(schema: &Schema, value: impl Into<Value>) -> Result<(), Failure> {
        let path = ValidationPath::new("");
        let site = Site {
            path: &path,
            root_marker: "<root>",
        };
        let value = value.into();
        match check_schema(schema).unwrap() {
            Kind::Number => NumberRules::read(schema).validate(&site, Some(&value)),
            Kind::BigInt => BigIntRules::read(schema).validate(&site, Some(&value)),
            kind => panic!("not a numeric schema: {}", kind),
        }
    }

    #[test]
    fn any_number() {
        let schema = Schema::from(TypeMarker::Number);
        assert!(validate(&schema, 0).is_ok());
        assert!(validate(&schema, -1.5).is_ok());
        assert!(validate(&schema, f64::NAN).is_ok());
        assert!(validate(&schema, "1").is_err());
        assert!(validate(&schema, 1i128).is_err());
        assert!(validate(&schema, ()).is_err());
    }

    #[test]
    fn exclusive_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let a: f64 = rng.gen_range(-1000.0..1000.0);
            let b: f64 = a + rng.gen_range(1.0..1000.0);
            let schema = NumberSchema::new().range(a, b).build();
            let v = rng.gen_range(a..b);
            if v > a {
                assert!(validate(&schema, v).is_ok(), "{} < {} < {}", a, v, b);
            }
            assert!(validate(&schema, a).is_err());
            assert!(validate(&schema, b).is_err());
            assert!(validate(&schema, a - 1.0).is_err());
            assert!(validate(&schema, b + 1.0).is_err());
        }
    }

    #[test]
    fn one_sided() {
        let schema = NumberSchema::new().min(0.0).build();
        assert!(validate(&schema, 0.5).is_ok());
        assert!(validate(&schema, 1e300).is_ok());
        assert_eq!(
            validate(&schema, 0).unwrap_err().to_string(),
            "validation error: <root> must be greater than 0, found 0"
        );
        assert!(validate(&schema, f64::NAN).is_err());
    }

    #[test]
    fn range_marker_overrides() {
        let schema = Schema::record()
            .with(TYPE, TypeMarker::Number)
            .with(RANGE, vec![Schema::from(0), 10.into()])
            .with(MAX, 100);
        assert!(validate(&schema, 5).is_ok());
        assert!(validate(&schema, 50).is_err());
    }

    #[test]
    fn integer() {
        let schema = NumberSchema::new().integer(true).build();
        assert!(validate(&schema, 3).is_ok());
        assert!(validate(&schema, -0.0).is_ok());
        assert_eq!(
            validate(&schema, 3.5).unwrap_err().to_string(),
            "validation error: expected integer at <root>, found 3.5"
        );
        assert!(validate(&schema, f64::INFINITY).is_err());
    }

    #[test]
    fn bigint() {
        let schema = BigIntSchema::new().min(-1).max(1 << 100).build();
        assert!(validate(&schema, 0i128).is_ok());
        assert!(validate(&schema, (1i128 << 100) - 1).is_ok());
        assert!(validate(&schema, 1i128 << 100).is_err());
        assert!(validate(&schema, -1i128).is_err());
        assert_eq!(
            validate(&schema, 0).unwrap_err().to_string(),
            "validation error: expected bigint at <root>, found 0"
        );
    }
}
