use std::fmt;

/// One step into a value: a map key or an array index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Where inside a candidate value a check is happening. Only used for diagnostics.
///
/// A path is a caller-chosen root label followed by `.key` and `[index]` segments, so the `weight`
/// field of the third lift under a root labelled `body` renders as `body.lifts[2].weight`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationPath {
    label: String,
    segments: Vec<Segment>,
}

impl ValidationPath {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            segments: Vec::new(),
        }
    }

    /// Extend the path by a map key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Key(key.into()));
        path
    }

    /// Extend the path by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Index(index));
        path
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the path, substituting `root_marker` when it would otherwise be empty.
    pub fn render(&self, root_marker: &str) -> String {
        let rendered = self.to_string();
        if rendered.is_empty() {
            root_marker.to_string()
        } else {
            rendered
        }
    }
}

impl fmt::Display for ValidationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.label)?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn render() {
        let root = ValidationPath::new("");
        assert_eq!(root.render("<root>"), "<root>");
        assert_eq!(root.key("weight").render("<root>"), ".weight");

        let body = ValidationPath::new("body");
        let path = body.key("lifts").index(2).key("reps");
        assert_eq!(path.render("<root>"), "body.lifts[2].reps");
        assert_eq!(path.depth(), 3);
        assert_eq!(body.depth(), 0);
    }
}
