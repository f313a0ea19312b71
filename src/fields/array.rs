use std::rc::Rc;

use gpui::{
    App, Hsla, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div,
};

use crate::form::FormStateStore;
use crate::id::ComponentId;
use crate::path::FieldPath;
use crate::provider::FormProvider;
use crate::schema::Property;
use crate::style::FieldLayout;
use crate::theme::ThemeTokens;
use crate::value::Value;

use super::chrome::{FieldChrome, control_button, field_block};
use super::factory::FieldRenderer;

/// One rendered row of an array field. `path` addresses the element in the
/// store; `insert_at` is where the row's insert control adds a sibling (right
/// after the row itself).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArrayRowPlan {
    pub index: usize,
    pub path: FieldPath,
    pub insert_at: usize,
}

/// Layout decision for an array field: either one row per element, or the
/// single add control when the value is absent or empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArrayFieldPlan {
    Empty,
    Rows(Vec<ArrayRowPlan>),
}

impl ArrayFieldPlan {
    pub fn compute(path: &FieldPath, value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) if !items.is_empty() => Self::Rows(
                (0..items.len())
                    .map(|index| ArrayRowPlan {
                        index,
                        path: path.index(index),
                        insert_at: index + 1,
                    })
                    .collect(),
            ),
            _ => Self::Empty,
        }
    }
}

/// Dynamic list-of-values field. Every element renders through the field
/// renderer at `path[index]` with the array's element descriptor, flanked by
/// remove and insert-after controls; an absent or empty value renders a
/// single add control instead.
#[derive(IntoElement)]
pub struct ArrayField {
    id: ComponentId,
    store: FormStateStore,
    path: FieldPath,
    property: Property,
    renderer: Rc<dyn FieldRenderer>,
    include_description: bool,
    layout: FieldLayout,
}

impl ArrayField {
    #[track_caller]
    pub fn new(
        store: FormStateStore,
        path: FieldPath,
        property: Property,
        renderer: Rc<dyn FieldRenderer>,
    ) -> Self {
        Self {
            id: ComponentId::auto("array-field"),
            store,
            path,
            property,
            renderer,
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

    /// Each control performs exactly one store mutation, then repaints.
    fn structural_edit(
        store: &FormStateStore,
        path: &FieldPath,
        window: &mut Window,
        edit: impl FnOnce(&FormStateStore, &FieldPath) -> crate::form::FormResult<()>,
    ) {
        if edit(store, path).is_ok() {
            window.refresh();
        }
    }
}

impl RenderOnce for ArrayField {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = FormProvider::theme(cx);
        let tokens = &theme.tokens;

        let value = self.store.value_at(&self.path).ok().flatten();
        let plan = ArrayFieldPlan::compute(&self.path, value.as_ref());
        let error = self.store.display_error(&self.path).ok().flatten();
        let element_property = self
            .property
            .of()
            .cloned()
            .unwrap_or_else(Property::text);

        let body = match plan {
            ArrayFieldPlan::Empty => {
                let store = self.store.clone();
                let path = self.path.clone();
                let add: Rc<dyn Fn(&mut Window, &mut App)> = Rc::new(move |window, _cx| {
                    Self::structural_edit(&store, &path, window, |store, path| {
                        store.array_push(path, Value::Null)
                    });
                });
                div()
                    .flex()
                    .flex_row()
                    .items_center()
                    .gap_2()
                    .child(control_button(self.id.slot("add"), "+", &theme, add))
                    .child(
                        div()
                            .text_sm()
                            .text_color(tokens.text_muted)
                            .child("Add"),
                    )
            }
            ArrayFieldPlan::Rows(rows) => {
                let mut list = div().flex().flex_col().gap_2();
                for row in rows {
                    let element = self.renderer.render_field(
                        row.path.clone(),
                        &element_property,
                        self.include_description,
                    );

                    let remove: Rc<dyn Fn(&mut Window, &mut App)> = {
                        let store = self.store.clone();
                        let path = self.path.clone();
                        let index = row.index;
                        Rc::new(move |window, _cx| {
                            Self::structural_edit(&store, &path, window, |store, path| {
                                store.array_remove(path, index)
                            });
                        })
                    };
                    let insert: Rc<dyn Fn(&mut Window, &mut App)> = {
                        let store = self.store.clone();
                        let path = self.path.clone();
                        let insert_at = row.insert_at;
                        Rc::new(move |window, _cx| {
                            Self::structural_edit(&store, &path, window, |store, path| {
                                store.array_insert(path, insert_at, Value::Null)
                            });
                        })
                    };

                    list = list.child(
                        div()
                            .flex()
                            .flex_row()
                            .items_start()
                            .gap_2()
                            .child(div().flex_1().child(element))
                            .child(control_button(
                                self.id.slot_index("remove", row.index),
                                "−",
                                &theme,
                                remove,
                            ))
                            .child(control_button(
                                self.id.slot_index("insert", row.index),
                                "+",
                                &theme,
                                insert,
                            )),
                    );
                }
                list
            }
        };

        let surface = div()
            .w_full()
            .p_2()
            .bg(tokens.surface_bg)
            .border_1()
            .border_color(surface_border(tokens, error.is_some()))
            .rounded_md()
            .child(body);

        let chrome = FieldChrome {
            label: Some(field_label(self.property.title.as_ref(), &self.path)),
            required: self.property.validation.required,
            description: self
                .include_description
                .then(|| self.property.description.clone())
                .flatten(),
            error,
            layout: self.layout,
        };
        field_block(&theme, chrome, surface.into_any_element())
    }
}

/// The list surface mirrors the field's error state, not just the helper
/// line below it.
fn surface_border(tokens: &ThemeTokens, errored: bool) -> Hsla {
    if errored {
        tokens.border_error
    } else {
        tokens.border
    }
}

/// Untitled arrays are labeled with the full field path, so a nested array
/// reads as `sections[2].tags` rather than a bare `tags`.
fn field_label(title: Option<&SharedString>, path: &FieldPath) -> SharedString {
    title
        .cloned()
        .unwrap_or_else(|| path.to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> FieldPath {
        FieldPath::root("tags")
    }

    #[test]
    fn plan_is_empty_for_absent_null_or_empty_values() {
        assert_eq!(ArrayFieldPlan::compute(&tags(), None), ArrayFieldPlan::Empty);
        assert_eq!(
            ArrayFieldPlan::compute(&tags(), Some(&Value::Null)),
            ArrayFieldPlan::Empty
        );
        assert_eq!(
            ArrayFieldPlan::compute(&tags(), Some(&Value::array([]))),
            ArrayFieldPlan::Empty
        );
        // A non-array value renders the add control rather than bogus rows.
        assert_eq!(
            ArrayFieldPlan::compute(&tags(), Some(&Value::text("oops"))),
            ArrayFieldPlan::Empty
        );
    }

    #[test]
    fn plan_yields_one_row_per_element() {
        let value = Value::array([Value::text("a"), Value::text("b")]);
        let ArrayFieldPlan::Rows(rows) = ArrayFieldPlan::compute(&tags(), Some(&value)) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].path.to_string(), "tags[0]");
        assert_eq!(rows[1].path.to_string(), "tags[1]");
    }

    #[test]
    fn insert_lands_right_after_the_row() {
        let value = Value::array([Value::Null, Value::Null, Value::Null]);
        let ArrayFieldPlan::Rows(rows) = ArrayFieldPlan::compute(&tags(), Some(&value)) else {
            panic!("expected rows");
        };
        assert_eq!(
            rows.iter().map(|row| row.insert_at).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn surface_border_switches_to_the_error_token() {
        let tokens = crate::theme::Theme::light().tokens;
        assert_eq!(surface_border(&tokens, true), tokens.border_error);
        assert_eq!(surface_border(&tokens, false), tokens.border);
    }

    #[test]
    fn label_falls_back_to_the_full_field_path() {
        let path = FieldPath::root("sections").index(2).key("tags");
        assert_eq!(field_label(None, &path).as_ref(), "sections[2].tags");

        let title = SharedString::from("Tags");
        assert_eq!(field_label(Some(&title), &path).as_ref(), "Tags");
    }

    #[test]
    fn row_paths_nest_under_deep_array_paths() {
        let path = FieldPath::root("sections").index(2).key("tags");
        let value = Value::array([Value::text("x")]);
        let ArrayFieldPlan::Rows(rows) = ArrayFieldPlan::compute(&path, Some(&value)) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].path.to_string(), "sections[2].tags[0]");
    }
}
