use crate::error::{Error, Result};
use crate::{MAX_DEPTH, ROOT_MARKER};
use educe::Educe;
use serde::{Deserialize, Serialize};

#[inline]
fn is_false(v: &bool) -> bool {
    !v
}

#[inline]
fn depth_is_default(v: &usize) -> bool {
    *v == MAX_DEPTH
}

#[inline]
fn marker_is_default(v: &String) -> bool {
    v == ROOT_MARKER
}

/// Settings for compiling and running a [`Validator`][crate::Validator].
///
/// # Defaults
///
/// Fields that aren't specified use their defaults instead. The defaults for each field are:
///
/// - max_depth: [`MAX_DEPTH`]
/// - strict_tuples: false
/// - eager_schema_check: false
/// - root_marker: [`ROOT_MARKER`]
///
#[derive(Educe, Clone, Debug, Serialize, Deserialize)]
#[educe(PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Options {
    /// The deepest a check may recurse into a value before failing with
    /// [`Error::ParseLimit`].
    #[educe(Default = MAX_DEPTH)]
    #[serde(skip_serializing_if = "depth_is_default")]
    pub max_depth: usize,
    /// If true, tuples check each element against the schema at the same position. Otherwise only
    /// the tuple's length is checked.
    #[serde(skip_serializing_if = "is_false")]
    pub strict_tuples: bool,
    /// If true, compiling checks the entire schema tree instead of only its root node.
    #[serde(skip_serializing_if = "is_false")]
    pub eager_schema_check: bool,
    /// Text used in diagnostics in place of an empty path.
    #[educe(Default(expression = String::from(ROOT_MARKER)))]
    #[serde(skip_serializing_if = "marker_is_default")]
    pub root_marker: String,
}

impl Options {
    /// Make a new set of options with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SerdeFail(e.to_string()))
    }

    /// Set the maximum recursion depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set whether tuples check their elements.
    pub fn strict_tuples(mut self, strict_tuples: bool) -> Self {
        self.strict_tuples = strict_tuples;
        self
    }

    /// Set whether compiling checks the whole schema tree.
    pub fn eager_schema_check(mut self, eager_schema_check: bool) -> Self {
        self.eager_schema_check = eager_schema_check;
        self
    }

    /// Set the text shown for an empty path.
    pub fn root_marker(mut self, root_marker: impl Into<String>) -> Self {
        self.root_marker = root_marker.into();
        self
    }
}
