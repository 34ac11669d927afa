use std::{fmt, str::FromStr};

/// Dot-separated address into a document tree.
///
/// Segments stay as text; whether a segment is a sequence index or a mapping
/// key depends on the node it is applied to. An empty string addresses the
/// root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The path with no segments.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a dot-separated string into a path.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path with `segment` appended.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Push a segment onto this path.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Dotted form of the first `len` segments, for error messages.
    pub(crate) fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())].join(".")
    }
}

/// Interpret a segment as a sequence index: non-empty, ASCII digits only.
pub(crate) fn sequence_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for NodePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for NodePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<&String> for NodePath {
    fn from(value: &String) -> Self {
        Self::parse(value)
    }
}

impl From<String> for NodePath {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&NodePath> for NodePath {
    fn from(value: &NodePath) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = NodePath::parse("VanillaEntity.E1.Materials");
        assert_eq!(path.segments(), ["VanillaEntity", "E1", "Materials"]);
        assert_eq!(path.to_string(), "VanillaEntity.E1.Materials");
        assert_eq!(path.join("B1").last(), Some("B1"));
    }

    #[test]
    fn test_empty_is_root() {
        assert!(NodePath::parse("").is_root());
        assert_eq!(NodePath::root().to_string(), "");
    }

    #[test]
    fn test_sequence_index() {
        assert_eq!(sequence_index("0"), Some(0));
        assert_eq!(sequence_index("12"), Some(12));
        assert_eq!(sequence_index("+1"), None);
        assert_eq!(sequence_index("-1"), None);
        assert_eq!(sequence_index("a1"), None);
        assert_eq!(sequence_index(""), None);
    }
}
