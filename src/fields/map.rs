use std::rc::Rc;

use gpui::{IntoElement, ParentElement, RenderOnce, Styled, div};

use crate::form::FormStateStore;
use crate::id::ComponentId;
use crate::path::FieldPath;
use crate::provider::FormProvider;
use crate::schema::Property;
use crate::style::FieldLayout;

use super::chrome::{FieldChrome, field_block};
use super::factory::FieldRenderer;

/// Nested object group: renders each child property through the field
/// renderer at `path.key(name)`, indented under the group label.
#[derive(IntoElement)]
pub struct MapField {
    id: ComponentId,
    store: FormStateStore,
    path: FieldPath,
    property: Property,
    renderer: Rc<dyn FieldRenderer>,
    include_description: bool,
    layout: FieldLayout,
}

impl MapField {
    #[track_caller]
    pub fn new(
        store: FormStateStore,
        path: FieldPath,
        property: Property,
        renderer: Rc<dyn FieldRenderer>,
    ) -> Self {
        Self {
            id: ComponentId::auto("map-field"),
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
}

impl RenderOnce for MapField {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = FormProvider::theme(cx);
        let tokens = &theme.tokens;

        let error = self.store.display_error(&self.path).ok().flatten();

        let mut children = div()
            .flex()
            .flex_col()
            .gap_3()
            .pl_3()
            .border_l_1()
            .border_color(tokens.border);
        if let Some(properties) = self.property.properties() {
            for (name, child) in properties {
                children = children.child(self.renderer.render_field(
                    self.path.key(name.clone()),
                    child,
                    self.include_description,
                ));
            }
        }

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
        field_block(&theme, chrome, children.into_any_element())
    }
}
