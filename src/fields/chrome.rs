use std::rc::Rc;

use gpui::{
    AnyElement, App, Div, FontWeight, InteractiveElement, IntoElement, ParentElement, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::id::ComponentId;
use crate::style::FieldLayout;
use crate::theme::Theme;

/// Display metadata shared by every field widget: label row, helper line, and
/// the touched-gated error that replaces the helper line when present.
pub(super) struct FieldChrome {
    pub(super) label: Option<SharedString>,
    pub(super) required: bool,
    pub(super) description: Option<SharedString>,
    pub(super) error: Option<SharedString>,
    pub(super) layout: FieldLayout,
}

fn label_row(theme: &Theme, label: SharedString, required: bool) -> Div {
    let tokens = &theme.tokens;
    let mut row = div().flex().flex_row().gap_1().child(
        div()
            .font_weight(FontWeight::MEDIUM)
            .text_color(tokens.label)
            .child(label),
    );
    if required {
        row = row.child(div().text_color(tokens.required_marker).child("*"));
    }
    row
}

fn helper_line(theme: &Theme, chrome: &FieldChrome) -> Option<Div> {
    let tokens = &theme.tokens;
    if let Some(error) = &chrome.error {
        return Some(div().text_sm().text_color(tokens.error).child(error.clone()));
    }
    chrome.description.as_ref().map(|description| {
        div()
            .text_sm()
            .text_color(tokens.description)
            .child(description.clone())
    })
}

/// Wraps a rendered control in the standard chrome: label above (or in a
/// fixed left column for horizontal layouts), error or description below.
pub(super) fn field_block(theme: &Theme, chrome: FieldChrome, control: AnyElement) -> Div {
    let helper = helper_line(theme, &chrome);
    let label = chrome
        .label
        .clone()
        .map(|label| label_row(theme, label, chrome.required));

    match chrome.layout {
        FieldLayout::Vertical => {
            let mut block = div().flex().flex_col().gap_1().w_full();
            if let Some(label) = label {
                block = block.child(label);
            }
            block = block.child(control);
            if let Some(helper) = helper {
                block = block.child(helper);
            }
            block
        }
        FieldLayout::Horizontal => {
            let mut body = div().flex().flex_col().gap_1().flex_1();
            body = body.child(control);
            if let Some(helper) = helper {
                body = body.child(helper);
            }
            let mut block = div().flex().flex_row().items_start().gap_3().w_full();
            if let Some(label) = label {
                block = block.child(div().w(px(168.0)).child(label));
            }
            block.child(body)
        }
    }
}

/// Small square click target used for the array row controls.
pub(super) fn control_button(
    id: ComponentId,
    glyph: impl Into<SharedString>,
    theme: &Theme,
    on_click: Rc<dyn Fn(&mut Window, &mut App)>,
) -> impl IntoElement {
    let tokens = &theme.tokens;
    let hover_border = tokens.border_hover;
    div()
        .id(id)
        .w(px(22.0))
        .h(px(22.0))
        .flex()
        .items_center()
        .justify_center()
        .border_1()
        .border_color(tokens.border)
        .bg(tokens.control_bg)
        .rounded_md()
        .text_sm()
        .text_color(tokens.text_muted)
        .cursor_pointer()
        .hover(move |style| style.border_color(hover_border))
        .child(glyph.into())
        .on_click(move |_, window, cx| {
            (on_click)(window, cx);
        })
}
