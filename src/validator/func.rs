use super::*;
use futures_core::future::BoxFuture;
use std::sync::Arc;

/// Error type an asynchronous predicate may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type SyncFn = dyn Fn(Option<&Value>) -> bool + Send + Sync;
type AsyncFn =
    dyn for<'a> Fn(Option<&'a Value>) -> BoxFuture<'a, std::result::Result<bool, BoxError>>
        + Send
        + Sync;

/// A custom check, carried in a schema under the `$func` marker.
///
/// A predicate runs only after the node's own structural checks pass, and receives the value
/// (`None` if it was absent). Returning `false`, or for asynchronous predicates failing with an
/// error, fails validation with a "must pass custom check" failure.
///
/// Asynchronous predicates are how external lookups get into a schema: the closure captures
/// whatever handle it needs, and the validator awaits it in place.
///
/// ```
/// # use lift_schema::{Predicate, Value};
/// # use std::collections::HashSet;
/// # use std::sync::Arc;
/// let known: Arc<HashSet<String>> = Arc::new(["bench".to_string()].into_iter().collect());
/// let exists = Predicate::future(move |value| {
///     let known = known.clone();
///     let id = value.and_then(Value::as_str).map(str::to_owned);
///     Box::pin(async move { Ok(id.map_or(false, |id| known.contains(&id))) })
/// });
/// ```
#[derive(Clone)]
pub enum Predicate {
    Sync(Arc<SyncFn>),
    Async(Arc<AsyncFn>),
}

impl Predicate {
    /// Wrap a synchronous predicate.
    pub fn sync<F>(func: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Predicate::Sync(Arc::new(func))
    }

    /// Wrap a predicate that returns a future.
    pub fn future<F>(func: F) -> Self
    where
        F: for<'a> Fn(Option<&'a Value>) -> BoxFuture<'a, std::result::Result<bool, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        Predicate::Async(Arc::new(func))
    }

    /// Run the predicate on a value, awaiting it if needed.
    pub async fn call(&self, value: Option<&Value>) -> std::result::Result<bool, BoxError> {
        match self {
            Predicate::Sync(func) => Ok(func(value)),
            Predicate::Async(func) => func(value).await,
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::Sync(_) => f.write_str("Predicate::Sync(..)"),
            Predicate::Async(_) => f.write_str("Predicate::Async(..)"),
        }
    }
}

impl<'c> Context<'c> {
    pub(crate) async fn check_func(
        &self,
        func: &Predicate,
        path: &ValidationPath,
        value: Option<&Value>,
    ) -> Result<()> {
        match func.call(value).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.site(path).custom().into()),
            Err(err) => {
                trace!(path = %path, error = %err, "custom check failed with an error");
                Err(self.site(path).custom().into())
            }
        }
    }
}
