use gpui::{
    IntoElement, InteractiveElement, ParentElement, RenderOnce, StatefulInteractiveElement,
    Styled, div, px,
};

use crate::form::FormStateStore;
use crate::id::ComponentId;
use crate::path::FieldPath;
use crate::provider::FormProvider;
use crate::schema::Property;
use crate::style::FieldLayout;
use crate::value::Value;

use super::chrome::{FieldChrome, field_block};
use super::control;

/// Checkbox bound to one store path. An absent value renders unchecked;
/// toggling always writes an explicit `Bool`.
#[derive(IntoElement)]
pub struct BooleanField {
    id: ComponentId,
    store: FormStateStore,
    path: FieldPath,
    property: Property,
    include_description: bool,
    layout: FieldLayout,
}

impl BooleanField {
    #[track_caller]
    pub fn new(store: FormStateStore, path: FieldPath, property: Property) -> Self {
        Self {
            id: ComponentId::auto("boolean-field"),
            store,
            path,
            property,
            include_description: false,
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

    pub fn layout(mut self, value: FieldLayout) -> Self {
        self.layout = value;
        self
    }
}

impl RenderOnce for BooleanField {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = FormProvider::theme(cx);
        let tokens = &theme.tokens;

        let checked = self
            .store
            .value_at(&self.path)
            .ok()
            .flatten()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        let error = self.store.display_error(&self.path).ok().flatten();
        let focused = control::focused_state(&self.id);

        let border = if error.is_some() {
            tokens.border_error
        } else if focused {
            tokens.border_focus
        } else {
            tokens.border
        };

        let mut check = div()
            .w(px(16.0))
            .h(px(16.0))
            .flex()
            .items_center()
            .justify_center()
            .border_1()
            .border_color(border)
            .bg(if checked {
                tokens.accent
            } else {
                tokens.control_bg
            })
            .rounded_md();
        if checked {
            check = check.child(div().text_sm().text_color(tokens.accent_fg).child("✓"));
        }

        let label = self
            .property
            .title
            .clone()
            .unwrap_or_else(|| self.path.leaf_name());

        let id_for_click = self.id.clone();
        let id_for_key = self.id.clone();
        let id_for_blur = self.id.clone();
        let store_for_click = self.store.clone();
        let store_for_key = self.store.clone();
        let store_for_blur = self.store.clone();
        let path_for_click = self.path.clone();
        let path_for_key = self.path.clone();
        let path_for_blur = self.path.clone();

        let row = div()
            .id(self.id.clone())
            .flex()
            .flex_row()
            .items_center()
            .gap_2()
            .cursor_pointer()
            .child(check)
            .child(div().text_color(tokens.text_primary).child(label))
            .on_click(move |_, window, _cx| {
                control::set_focused_state(&id_for_click, true);
                if store_for_click
                    .set_value(&path_for_click, Value::Bool(!checked))
                    .is_ok()
                {
                    window.refresh();
                }
            })
            .on_key_down(move |event, window, _cx| {
                if !control::is_activation_key(event.keystroke.key.as_str()) {
                    return;
                }
                control::set_focused_state(&id_for_key, true);
                if store_for_key
                    .set_value(&path_for_key, Value::Bool(!checked))
                    .is_ok()
                {
                    window.refresh();
                }
            })
            .on_mouse_down_out(move |_, window, _cx| {
                if !control::focused_state(&id_for_blur) {
                    return;
                }
                control::set_focused_state(&id_for_blur, false);
                if store_for_blur.touch(&path_for_blur).is_ok() {
                    window.refresh();
                }
            });

        let chrome = FieldChrome {
            // The label already sits next to the control.
            label: None,
            required: self.property.validation.required,
            description: self
                .include_description
                .then(|| self.property.description.clone())
                .flatten(),
            error,
            layout: self.layout,
        };
        field_block(&theme, chrome, row.into_any_element())
    }
}
