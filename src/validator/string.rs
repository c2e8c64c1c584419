use super::*;

/// Builder for a `$type: String` schema.
///
/// Validation passes if:
///
/// - The value is a string.
/// - The number of characters is within the inclusive `$length` bounds, if set.
/// - The string matches the regular expression in `$regex`, if set.
#[derive(Clone, Debug, Default)]
pub struct StrSchema {
    length: Option<(f64, f64)>,
    regex: Option<Regex>,
    func: Option<Predicate>,
}

impl StrSchema {
    /// Make a new builder with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require exactly `len` characters.
    pub fn len(mut self, len: usize) -> Self {
        self.length = Some((len as f64, len as f64));
        self
    }

    /// Require between `min` and `max` characters, inclusive. `min` must be less than `max`.
    pub fn len_range(mut self, min: usize, max: usize) -> Self {
        self.length = Some((min as f64, max as f64));
        self
    }

    /// Require at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.length = Some((min as f64, f64::INFINITY));
        self
    }

    /// Set the regular expression the string must match. Matching is unanchored unless the
    /// pattern anchors itself. The [`regex`] crate has no look-around, so rules like "contains a
    /// digit and an uppercase letter" need an alternation over the orders they can appear in.
    pub fn regex(mut self, regex: Regex) -> Self {
        self.regex = Some(regex);
        self
    }

    /// Set a custom check to run after the others pass.
    pub fn func(mut self, func: Predicate) -> Self {
        self.func = Some(func);
        self
    }

    /// Build this into a [`Schema`].
    pub fn build(self) -> Schema {
        let mut schema = Schema::record().with(TYPE, TypeMarker::String);
        if let Some(length) = self.length {
            schema = schema.with(LENGTH, length_marker(length));
        }
        if let Some(regex) = self.regex {
            schema = schema.with(REGEX, regex);
        }
        if let Some(func) = self.func {
            schema = schema.with(FUNC, func);
        }
        schema
    }
}

/// An exact count is written as a single number, a span as a pair.
pub(crate) fn length_marker((min, max): (f64, f64)) -> Schema {
    if min == max {
        Schema::Number(min)
    } else {
        Schema::List(vec![Schema::Number(min), Schema::Number(max)])
    }
}

#[derive(Clone, Debug)]
pub(crate) struct StrRules<'a> {
    length: Option<LengthBounds>,
    regex: Option<&'a Regex>,
}

impl<'a> StrRules<'a> {
    pub(crate) fn read(schema: &'a Schema) -> Self {
        Self {
            length: LengthBounds::read(schema),
            regex: match schema.get(REGEX) {
                Some(Schema::Pattern(regex)) => Some(&**regex),
                _ => None,
            },
        }
    }

    pub(crate) fn validate(&self, site: &Site, value: Option<&Value>) -> Result<(), Failure> {
        let val = match value {
            Some(Value::Str(val)) => val,
            _ => return Err(site.wrong_type("string", value)),
        };
        if let Some(ref length) = self.length {
            length.check(site, bytecount::num_chars(val.as_bytes()))?;
        }
        if let Some(regex) = self.regex {
            if !regex.is_match(val) {
                return Err(site.no_match(regex.as_str()));
            }
        }
        Ok(())
    }
}
