use std::str::FromStr;

use gpui::{
    IntoElement, InteractiveElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, div, px,
};
use rust_decimal::Decimal;

use crate::form::FormStateStore;
use crate::id::ComponentId;
use crate::path::FieldPath;
use crate::provider::FormProvider;
use crate::schema::Property;
use crate::style::{FieldLayout, Size};
use crate::value::Value;

use super::chrome::{FieldChrome, field_block};
use super::control;

const BUFFER_SLOT: &str = "buffer";

/// Decimal-valued field. Keystrokes edit a per-widget text buffer; the store
/// only sees the buffer once it parses (or `Null` once it is cleared), so a
/// half-typed `-` or `1.` never corrupts the value tree.
#[derive(IntoElement)]
pub struct NumberField {
    id: ComponentId,
    store: FormStateStore,
    path: FieldPath,
    property: Property,
    include_description: bool,
    size: Size,
    layout: FieldLayout,
}

impl NumberField {
    #[track_caller]
    pub fn new(store: FormStateStore, path: FieldPath, property: Property) -> Self {
        Self {
            id: ComponentId::auto("number-field"),
            store,
            path,
            property,
            include_description: false,
            size: Size::default(),
            layout: FieldLayout::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn include_description(mut self, value: bool) -> Self {
        self.include_description = value;
        self
    }

    pub fn with_size(mut self, value: Size) -> Self {
        self.size = value;
        self
    }

    pub fn layout(mut self, value: FieldLayout) -> Self {
        self.layout = value;
        self
    }
}

fn buffer_edit(current: &str, key: &str, key_char: Option<&str>) -> Option<String> {
    match key {
        "backspace" => {
            let mut edited = current.to_string();
            edited.pop();
            Some(edited)
        }
        _ => {
            let inserted = key_char?;
            if !inserted.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.' | ',')) {
                return None;
            }
            Some(format!("{current}{inserted}"))
        }
    }
}

fn buffer_value(buffer: &str) -> Option<Value> {
    if buffer.is_empty() {
        return Some(Value::Null);
    }
    Decimal::from_str(&buffer.replace(',', "."))
        .ok()
        .map(Value::Number)
}

/// Returns the replacement text when an unfocused buffer has drifted from the
/// stored value, e.g. after `reset_to_initial` or an array row shift moved a
/// different element under this widget's path. A focused buffer is mid-edit
/// and an unparseable one is waiting for its blur resync, so both stay.
fn synced_buffer(stored: &str, buffer: &str, focused: bool) -> Option<String> {
    if focused || buffer == stored {
        return None;
    }
    buffer_value(buffer).is_some().then(|| stored.to_string())
}

impl RenderOnce for NumberField {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = FormProvider::theme(cx);
        let tokens = &theme.tokens;

        let stored = self
            .store
            .value_at(&self.path)
            .ok()
            .flatten()
            .and_then(|value| value.as_number())
            .map(|number| number.to_string())
            .unwrap_or_default();
        let error = self.store.display_error(&self.path).ok().flatten();
        let focused = control::focused_state(&self.id);
        let mut buffer = control::text_state(&self.id, BUFFER_SLOT, &stored);
        if let Some(resynced) = synced_buffer(&stored, &buffer, focused) {
            control::set_text_state(&self.id, BUFFER_SLOT, resynced.clone());
            buffer = resynced;
        }

        let border = if error.is_some() {
            tokens.border_error
        } else if focused {
            tokens.border_focus
        } else {
            tokens.border
        };

        let mut field = div()
            .id(self.id.clone())
            .w_full()
            .min_h(px(self.size.control_height()))
            .px_2()
            .py_1()
            .bg(tokens.control_bg)
            .border_1()
            .border_color(border)
            .rounded_md()
            .text_color(tokens.text_primary)
            .cursor_text()
            .child(SharedString::from(buffer.clone()));

        if error.is_none() && !focused {
            let hover_border = tokens.border_hover;
            field = field.hover(move |style| style.border_color(hover_border));
        }

        let id_for_click = self.id.clone();
        let id_for_key = self.id.clone();
        let id_for_blur = self.id.clone();
        let store_for_key = self.store.clone();
        let store_for_blur = self.store.clone();
        let path_for_key = self.path.clone();
        let path_for_blur = self.path.clone();

        let field = field
            .on_click(move |_, window, _cx| {
                control::set_focused_state(&id_for_click, true);
                window.refresh();
            })
            .on_key_down(move |event, window, _cx| {
                if !control::focused_state(&id_for_key) {
                    return;
                }
                let keystroke = &event.keystroke;
                let Some(next) = buffer_edit(
                    &buffer,
                    keystroke.key.as_str(),
                    keystroke.key_char.as_deref(),
                ) else {
                    return;
                };
                control::set_text_state(&id_for_key, BUFFER_SLOT, next.clone());
                if let Some(value) = buffer_value(&next) {
                    if store_for_key.set_value(&path_for_key, value).is_err() {
                        return;
                    }
                }
                window.refresh();
            })
            .on_mouse_down_out(move |_, window, _cx| {
                if !control::focused_state(&id_for_blur) {
                    return;
                }
                control::set_focused_state(&id_for_blur, false);
                // An unparseable leftover buffer resyncs from the store.
                let committed = store_for_blur
                    .value_at(&path_for_blur)
                    .ok()
                    .flatten()
                    .and_then(|value| value.as_number());
                let leftover = control::text_state(&id_for_blur, BUFFER_SLOT, "");
                if buffer_value(&leftover).is_none() {
                    match committed {
                        Some(number) => control::set_text_state(
                            &id_for_blur,
                            BUFFER_SLOT,
                            number.to_string(),
                        ),
                        None => control::clear_text_state(&id_for_blur, BUFFER_SLOT),
                    }
                }
                if store_for_blur.touch(&path_for_blur).is_ok() {
                    window.refresh();
                }
            });

        let chrome = FieldChrome {
            label: Some(
                self.property
                    .title
                    .clone()
                    .unwrap_or_else(|| self.path.leaf_name()),
            ),
            required: self.property.validation.required,
            description: self
                .include_description
                .then(|| self.property.description.clone())
                .flatten(),
            error,
            layout: self.layout,
        };
        field_block(&theme, chrome, field.into_any_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_edits_accept_digits_and_separators_only() {
        assert_eq!(buffer_edit("1", "a", Some("2")), Some("12".to_string()));
        assert_eq!(buffer_edit("1", "period", Some(".")), Some("1.".to_string()));
        assert_eq!(buffer_edit("", "minus", Some("-")), Some("-".to_string()));
        assert_eq!(buffer_edit("1", "a", Some("a")), None);
        assert_eq!(buffer_edit("12", "backspace", None), Some("1".to_string()));
    }

    #[test]
    fn unfocused_buffer_resyncs_when_the_store_moves() {
        // Store advanced underneath the widget (reset, row shift).
        assert_eq!(synced_buffer("7", "5", false), Some("7".to_string()));
        assert_eq!(synced_buffer("", "5", false), Some(String::new()));
        // Mid-edit buffers are left alone.
        assert_eq!(synced_buffer("7", "5", true), None);
        // Unparseable leftovers resync on blur instead.
        assert_eq!(synced_buffer("7", "-", false), None);
        assert_eq!(synced_buffer("7", "7", false), None);
    }

    #[test]
    fn buffer_parses_to_decimal_or_null() {
        assert_eq!(buffer_value(""), Some(Value::Null));
        assert_eq!(buffer_value("1.5"), Some(Value::number(Decimal::new(15, 1))));
        assert_eq!(buffer_value("1,5"), Some(Value::number(Decimal::new(15, 1))));
        assert_eq!(buffer_value("-"), None);
    }
}
