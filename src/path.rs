use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gpui::SharedString;

/// One step in a field path: a map key or an array index.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Dot/bracket field address, e.g. `sections[2].tags[0]`.
///
/// Paths key everything the form-state store tracks (values, touched flags,
/// errors), so two distinct fields always have distinct paths and a row path
/// is derived deterministically from its array path and index.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(name.into())],
        }
    }

    pub fn key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Human-facing fallback label: the innermost key, or the full path when
    /// the path ends in an index.
    pub fn leaf_name(&self) -> SharedString {
        for segment in self.segments.iter().rev() {
            if let PathSegment::Key(name) = segment {
                return name.clone().into();
            }
        }
        self.to_string().into()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePathError {
    pub input: String,
    pub position: usize,
}

impl Display for ParsePathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid field path {:?} at byte {}",
            self.input, self.position
        )
    }
}

impl std::error::Error for ParsePathError {}

impl FromStr for FieldPath {
    type Err = ParsePathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = |position: usize| ParsePathError {
            input: input.to_string(),
            position,
        };

        let mut segments = Vec::new();
        let bytes = input.as_bytes();
        let mut cursor = 0;

        while cursor < bytes.len() {
            match bytes[cursor] {
                b'[' => {
                    let close = input[cursor..]
                        .find(']')
                        .map(|offset| cursor + offset)
                        .ok_or_else(|| error(cursor))?;
                    let index = input[cursor + 1..close]
                        .parse::<usize>()
                        .map_err(|_| error(cursor + 1))?;
                    segments.push(PathSegment::Index(index));
                    cursor = close + 1;
                }
                b'.' => {
                    if segments.is_empty() {
                        return Err(error(cursor));
                    }
                    cursor += 1;
                    if cursor >= bytes.len() || matches!(bytes[cursor], b'.' | b'[' | b']') {
                        return Err(error(cursor));
                    }
                }
                b']' => return Err(error(cursor)),
                _ => {
                    let end = input[cursor..]
                        .find(['.', '[', ']'])
                        .map(|offset| cursor + offset)
                        .unwrap_or(input.len());
                    segments.push(PathSegment::Key(input[cursor..end].to_string()));
                    cursor = end;
                }
            }
        }

        if segments.is_empty() {
            return Err(error(0));
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_paths_derive_from_array_path_and_index() {
        let list = FieldPath::root("tags");
        assert_eq!(list.index(0).to_string(), "tags[0]");
        assert_eq!(list.index(1).to_string(), "tags[1]");
        assert_ne!(list.index(0), list.index(1));
    }

    #[test]
    fn nested_paths_render_dot_bracket_notation() {
        let path = FieldPath::root("sections").index(2).key("tags").index(0);
        assert_eq!(path.to_string(), "sections[2].tags[0]");
    }

    #[test]
    fn parse_round_trips_display() {
        for raw in ["name", "tags[0]", "sections[2].tags[0]", "a.b.c"] {
            let parsed: FieldPath = raw.parse().expect("path should parse");
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for raw in ["", ".name", "a..b", "a[", "a[x]", "a]", "a.[0]"] {
            assert!(raw.parse::<FieldPath>().is_err(), "{raw:?} should fail");
        }
    }

    #[test]
    fn starts_with_matches_prefixes_only() {
        let row = FieldPath::root("tags").index(3);
        assert!(row.starts_with(&FieldPath::root("tags")));
        assert!(!row.starts_with(&FieldPath::root("tag")));
        assert!(!FieldPath::root("tags").starts_with(&row));
    }

    #[test]
    fn leaf_name_skips_trailing_indices() {
        let row = FieldPath::root("sections").index(2).key("tags").index(0);
        assert_eq!(row.leaf_name().as_ref(), "tags");
        assert_eq!(FieldPath::root("title").leaf_name().as_ref(), "title");
    }

    #[test]
    fn parent_drops_one_segment() {
        let row = FieldPath::root("tags").index(3);
        assert_eq!(row.parent(), Some(FieldPath::root("tags")));
        assert_eq!(FieldPath::root("tags").parent(), None);
    }
}
