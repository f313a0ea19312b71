use std::fmt::{Display, Formatter};

use gpui::{ElementId, SharedString};

/// Stable component identity derived from the construction callsite, so the
/// same widget keeps the same id across re-renders without the caller having
/// to name it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentId(SharedString);

impl ComponentId {
    #[track_caller]
    pub fn auto(prefix: &str) -> Self {
        Self(stable_auto_id(prefix).into())
    }

    pub fn named(value: impl Into<SharedString>) -> Self {
        Self(value.into())
    }

    pub fn slot(&self, name: &str) -> Self {
        Self(format!("{}::{name}", self.0).into())
    }

    pub fn slot_index(&self, name: &str, index: usize) -> Self {
        Self(format!("{}::{name}[{index}]", self.0).into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_ref())
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self::named(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self::named(value)
    }
}

impl From<ComponentId> for ElementId {
    fn from(value: ComponentId) -> Self {
        ElementId::Name(value.0)
    }
}

#[track_caller]
pub fn stable_auto_id(prefix: &str) -> String {
    let location = std::panic::Location::caller();
    let seed = format!(
        "{prefix}:{}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    );
    format!("{prefix}-{:016x}", fnv1a64(seed.as_bytes()))
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn call_once() -> ComponentId {
        ComponentId::auto("field")
    }

    #[test]
    fn id_is_stable_for_same_callsite() {
        let ids = (0..3).map(|_| call_once()).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn id_differs_for_different_callsites() {
        let first = call_once();
        // Same prefix, different line.
        let second = ComponentId::auto("field");
        assert_ne!(first, second);
    }

    #[test]
    fn slot_ids_nest_under_the_parent() {
        let id = ComponentId::named("list");
        assert_eq!(id.slot("add").as_str(), "list::add");
        assert_eq!(id.slot_index("row", 2).as_str(), "list::row[2]");
    }
}
