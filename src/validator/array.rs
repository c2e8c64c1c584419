use super::*;

/// Builder for a `$type: Array` schema.
///
/// Validation passes if:
///
/// - The value is an array.
/// - The array's length is within the inclusive `$length` bounds, if set.
/// - Every item passes the `$all` schema.
///
/// An array schema without a length can also be written as a one-element list; see
/// [`Schema::array_of`]. Lists of two or more schemas are tuples, which only check their length
/// unless [`strict_tuples`][crate::Options::strict_tuples] is set.
#[derive(Clone, Debug)]
pub struct ArraySchema {
    all: Schema,
    length: Option<(f64, f64)>,
    func: Option<Predicate>,
}

impl ArraySchema {
    /// Make a new builder whose items must all pass `all`.
    pub fn new(all: impl Into<Schema>) -> Self {
        Self {
            all: all.into(),
            length: None,
            func: None,
        }
    }

    /// Require exactly `len` items.
    pub fn len(mut self, len: usize) -> Self {
        self.length = Some((len as f64, len as f64));
        self
    }

    /// Require between `min` and `max` items, inclusive. `min` must be less than `max`.
    pub fn len_range(mut self, min: usize, max: usize) -> Self {
        self.length = Some((min as f64, max as f64));
        self
    }

    /// Set a custom check to run after the others pass.
    pub fn func(mut self, func: Predicate) -> Self {
        self.func = Some(func);
        self
    }

    /// Build this into a [`Schema`].
    pub fn build(self) -> Schema {
        let mut schema = Schema::record()
            .with(TYPE, TypeMarker::Array)
            .with(ALL, self.all);
        if let Some(length) = self.length {
            schema = schema.with(LENGTH, length_marker(length));
        }
        if let Some(func) = self.func {
            schema = schema.with(FUNC, func);
        }
        schema
    }
}

impl<'c> Context<'c> {
    pub(crate) async fn check_array(
        &self,
        element: &Schema,
        length: Option<LengthBounds>,
        path: &ValidationPath,
        value: Option<&Value>,
    ) -> Result<()> {
        let items = match value {
            Some(Value::Array(items)) => items,
            _ => return Err(self.site(path).wrong_type("array", value).into()),
        };
        if let Some(length) = length {
            length.check(&self.site(path), items.len())?;
        }
        for (i, item) in items.iter().enumerate() {
            self.check(element, path.index(i), Some(item)).await?;
        }
        Ok(())
    }

    pub(crate) async fn check_tuple(
        &self,
        elements: &[Schema],
        path: &ValidationPath,
        value: Option<&Value>,
    ) -> Result<()> {
        let items = match value {
            Some(Value::Array(items)) => items,
            _ => return Err(self.site(path).wrong_type("array (tuple)", value).into()),
        };
        if items.len() != elements.len() {
            let arity = elements.len().to_string();
            return Err(self
                .site(path)
                .out_of_range(Some(arity.clone()), Some(arity), items.len().to_string(), true)
                .into());
        }
        if self.options.strict_tuples {
            for (i, (element, item)) in elements.iter().zip(items).enumerate() {
                self.check(element, path.index(i), Some(item)).await?;
            }
        }
        Ok(())
    }
}
