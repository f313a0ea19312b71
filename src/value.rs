use std::collections::BTreeMap;

use gpui::SharedString;
use rust_decimal::Decimal;

use crate::path::{FieldPath, PathSegment};

/// Dynamic form value tree. The schema decides how a node is rendered; the
/// tree itself is untyped so one store can hold any schema's data.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Decimal),
    Text(SharedString),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn text(value: impl Into<SharedString>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: impl Into<Decimal>) -> Self {
        Self::Number(value.into())
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    pub fn map<K>(entries: impl IntoIterator<Item = (K, Value)>) -> Self
    where
        K: Into<String>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&SharedString> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Absent-equivalent classification used by `required` checks and by the
    /// array widget's empty branch.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(value) => value.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn at(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (PathSegment::Key(name), Value::Map(entries)) => entries.get(name)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn at_mut(&mut self, path: &FieldPath) -> Option<&mut Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (PathSegment::Key(name), Value::Map(entries)) => entries.get_mut(name)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Writes through the path, creating intermediate maps and arrays as
    /// needed. Arrays are padded with `Null` up to the written index.
    pub fn set_at(&mut self, path: &FieldPath, value: Value) {
        *self.ensure_at_mut(path) = value;
    }

    pub fn array_push(&mut self, path: &FieldPath, item: Value) {
        self.ensure_array_at(path).push(item);
    }

    /// Index-based removal; following elements shift up by one. Out-of-range
    /// indices are a no-op.
    pub fn array_remove(&mut self, path: &FieldPath, index: usize) {
        if let Some(Value::Array(items)) = self.at_mut(path) {
            if index < items.len() {
                items.remove(index);
            }
        }
    }

    /// Inserts at `index` (clamped to the current length); following elements
    /// shift down by one.
    pub fn array_insert(&mut self, path: &FieldPath, index: usize, item: Value) {
        let items = self.ensure_array_at(path);
        let index = index.min(items.len());
        items.insert(index, item);
    }

    fn ensure_array_at(&mut self, path: &FieldPath) -> &mut Vec<Value> {
        let slot = self.ensure_at_mut(path);
        if !matches!(slot, Value::Array(_)) {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => items,
            _ => unreachable!("slot was coerced to an array above"),
        }
    }

    fn ensure_at_mut(&mut self, path: &FieldPath) -> &mut Value {
        let mut current = self;
        for segment in path.segments() {
            match segment {
                PathSegment::Key(name) => {
                    if !matches!(current, Value::Map(_)) {
                        *current = Value::Map(BTreeMap::new());
                    }
                    current = match current {
                        Value::Map(entries) => entries.entry(name.clone()).or_default(),
                        _ => unreachable!("slot was coerced to a map above"),
                    };
                }
                PathSegment::Index(index) => {
                    if !matches!(current, Value::Array(_)) {
                        *current = Value::Array(Vec::new());
                    }
                    current = match current {
                        Value::Array(items) => {
                            if items.len() <= *index {
                                items.resize(*index + 1, Value::Null);
                            }
                            &mut items[*index]
                        }
                        _ => unreachable!("slot was coerced to an array above"),
                    };
                }
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_path() -> FieldPath {
        FieldPath::root("tags")
    }

    #[test]
    fn set_at_creates_intermediate_containers() {
        let mut root = Value::Null;
        let path = FieldPath::root("sections").index(1).key("title");
        root.set_at(&path, Value::text("second"));

        assert_eq!(root.at(&path), Some(&Value::text("second")));
        // Index 0 was padded in.
        assert_eq!(
            root.at(&FieldPath::root("sections").index(0)),
            Some(&Value::Null)
        );
        assert_eq!(root.at(&FieldPath::root("sections").index(2)), None);
    }

    #[test]
    fn push_on_absent_path_creates_the_array() {
        let mut root = Value::map([("tags", Value::Null)]);
        root.array_push(&tags_path(), Value::Null);
        assert_eq!(root.at(&tags_path()), Some(&Value::array([Value::Null])));
    }

    #[test]
    fn remove_shifts_following_elements_up() {
        let mut root = Value::map([(
            "tags",
            Value::array([Value::text("a"), Value::text("b"), Value::text("c")]),
        )]);
        root.array_remove(&tags_path(), 0);
        assert_eq!(
            root.at(&tags_path()),
            Some(&Value::array([Value::text("b"), Value::text("c")]))
        );
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut root = Value::map([("tags", Value::array([Value::text("a")]))]);
        root.array_remove(&tags_path(), 5);
        assert_eq!(root.at(&tags_path()), Some(&Value::array([Value::text("a")])));
    }

    #[test]
    fn insert_shifts_following_elements_down() {
        let mut root = Value::map([(
            "tags",
            Value::array([Value::text("a"), Value::text("c")]),
        )]);
        root.array_insert(&tags_path(), 1, Value::text("b"));
        assert_eq!(
            root.at(&tags_path()),
            Some(&Value::array([
                Value::text("a"),
                Value::text("b"),
                Value::text("c")
            ]))
        );
    }

    #[test]
    fn insert_index_clamps_to_length() {
        let mut root = Value::map([("tags", Value::array([Value::text("a")]))]);
        root.array_insert(&tags_path(), 9, Value::text("b"));
        assert_eq!(
            root.at(&tags_path()),
            Some(&Value::array([Value::text("a"), Value::text("b")]))
        );
    }

    #[test]
    fn empty_value_classification() {
        assert!(Value::Null.is_empty_value());
        assert!(Value::text("").is_empty_value());
        assert!(Value::array([]).is_empty_value());
        assert!(!Value::Bool(false).is_empty_value());
        assert!(!Value::text("x").is_empty_value());
        assert!(!Value::array([Value::Null]).is_empty_value());
    }
}
