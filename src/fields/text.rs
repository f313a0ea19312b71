use gpui::{
    IntoElement, InteractiveElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, div, px,
};

use crate::form::FormStateStore;
use crate::id::ComponentId;
use crate::path::FieldPath;
use crate::provider::FormProvider;
use crate::schema::Property;
use crate::style::{FieldLayout, Size};
use crate::value::Value;

use super::chrome::{FieldChrome, field_block};
use super::control;

/// Single-line text field bound to one store path. Edits write through on
/// every keystroke; clearing the field stores `Null` rather than an empty
/// string.
#[derive(IntoElement)]
pub struct TextField {
    id: ComponentId,
    store: FormStateStore,
    path: FieldPath,
    property: Property,
    include_description: bool,
    size: Size,
    layout: FieldLayout,
}

impl TextField {
    #[track_caller]
    pub fn new(store: FormStateStore, path: FieldPath, property: Property) -> Self {
        Self {
            id: ComponentId::auto("text-field"),
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

impl RenderOnce for TextField {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = FormProvider::theme(cx);
        let tokens = &theme.tokens;

        let text = self
            .store
            .value_at(&self.path)
            .ok()
            .flatten()
            .and_then(|value| value.as_text().cloned())
            .unwrap_or_default();
        let error = self.store.display_error(&self.path).ok().flatten();
        let focused = control::focused_state(&self.id);

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
            .child(SharedString::from(text.to_string()));

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
        let current = text.to_string();

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
                let next = match keystroke.key.as_str() {
                    "backspace" => {
                        let mut edited = current.clone();
                        edited.pop();
                        Some(edited)
                    }
                    _ => keystroke
                        .key_char
                        .clone()
                        .map(|inserted| format!("{current}{inserted}")),
                };
                let Some(next) = next else {
                    return;
                };
                let value = if next.is_empty() {
                    Value::Null
                } else {
                    Value::text(next)
                };
                if store_for_key.set_value(&path_for_key, value).is_ok() {
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
