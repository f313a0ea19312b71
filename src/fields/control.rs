use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

use crate::id::ComponentId;

static BOOL_STATE: LazyLock<Mutex<HashMap<String, bool>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static TEXT_STATE: LazyLock<Mutex<HashMap<String, String>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub(super) const FOCUSED_SLOT: &str = "focused";

fn key(id: &ComponentId, slot: &str) -> String {
    format!("{id}::{slot}")
}

pub(super) fn focused_state(id: &ComponentId) -> bool {
    let composed = key(id, FOCUSED_SLOT);
    if let Ok(mut state) = BOOL_STATE.lock() {
        return *state.entry(composed).or_insert(false);
    }
    false
}

pub(super) fn set_focused_state(id: &ComponentId, value: bool) {
    let composed = key(id, FOCUSED_SLOT);
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.insert(composed, value);
    }
}

/// Ephemeral per-widget text buffer, e.g. a number field's in-progress edit
/// that does not yet parse. Falls back to `default` on first read.
pub(super) fn text_state(id: &ComponentId, slot: &str, default: &str) -> String {
    let composed = key(id, slot);
    if let Ok(mut state) = TEXT_STATE.lock() {
        return state.entry(composed).or_insert_with(|| default.to_string()).clone();
    }
    default.to_string()
}

pub(super) fn set_text_state(id: &ComponentId, slot: &str, value: String) {
    let composed = key(id, slot);
    if let Ok(mut state) = TEXT_STATE.lock() {
        state.insert(composed, value);
    }
}

pub(super) fn clear_text_state(id: &ComponentId, slot: &str) {
    let composed = key(id, slot);
    if let Ok(mut state) = TEXT_STATE.lock() {
        state.remove(&composed);
    }
}

pub(super) fn is_activation_key(key: &str) -> bool {
    key == "space" || key == "enter"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_state_round_trips_per_id() {
        let first = ComponentId::named("control-test-a");
        let second = ComponentId::named("control-test-b");

        assert!(!focused_state(&first));
        set_focused_state(&first, true);
        assert!(focused_state(&first));
        assert!(!focused_state(&second));
    }

    #[test]
    fn text_state_seeds_from_default_then_sticks() {
        let id = ComponentId::named("control-test-buffer");
        assert_eq!(text_state(&id, "buffer", "1.5"), "1.5");
        set_text_state(&id, "buffer", "1.52".to_string());
        // Later defaults no longer apply once a value was stored.
        assert_eq!(text_state(&id, "buffer", "0"), "1.52");
        clear_text_state(&id, "buffer");
        assert_eq!(text_state(&id, "buffer", "0"), "0");
    }
}
