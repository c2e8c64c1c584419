use super::*;

/// Builder for a union schema, which passes if any one of its alternatives does.
///
/// Alternatives are tried in the order they were added, and the first one to pass ends the
/// check. If they all fail, the failure lists each alternative's failure in order.
///
/// An alternative that turns out to be a malformed schema stops the check right away with an
/// [`Error::BadSchema`], rather than being counted as a failed alternative.
#[derive(Clone, Debug, Default)]
pub struct UnionSchema {
    alternatives: Vec<Schema>,
    func: Option<Predicate>,
}

impl UnionSchema {
    /// Make a new builder with no alternatives. At least one must be added before it is used.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alternative.
    pub fn add(mut self, schema: impl Into<Schema>) -> Self {
        self.alternatives.push(schema.into());
        self
    }

    /// Set a custom check to run after one of the alternatives passes.
    pub fn func(mut self, func: Predicate) -> Self {
        self.func = Some(func);
        self
    }

    /// Build this into a [`Schema`].
    pub fn build(self) -> Schema {
        let schema = Schema::union(self.alternatives);
        match self.func {
            Some(func) => schema.with(FUNC, func),
            None => schema,
        }
    }
}

impl<'c> Context<'c> {
    pub(crate) async fn check_union(
        &self,
        alternatives: &[Schema],
        path: &ValidationPath,
        value: Option<&Value>,
    ) -> Result<()> {
        let mut failures = Vec::with_capacity(alternatives.len());
        for (i, alternative) in alternatives.iter().enumerate() {
            match self.check(alternative, path.clone(), value).await {
                Ok(()) => return Ok(()),
                Err(Error::FailValidate(failure)) => {
                    trace!(path = %path, alternative = i, %failure, "union alternative failed");
                    failures.push(failure);
                }
                Err(err) => return Err(err),
            }
        }
        Err(self.site(path).any_of(failures).into())
    }
}
