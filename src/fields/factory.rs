use std::rc::Rc;

use gpui::{AnyElement, IntoElement, ParentElement, Styled, div};

use crate::form::FormStateStore;
use crate::id::ComponentId;
use crate::path::FieldPath;
use crate::schema::{DataType, Property};

use super::{ArrayField, BooleanField, MapField, NumberField, TextField};

/// Recursive element construction for one field. Container widgets (arrays,
/// maps) hold one of these and call back into it for their children, so a
/// custom renderer can override any subtree while delegating the rest to
/// [`DefaultFieldFactory`].
pub trait FieldRenderer {
    fn render_field(
        &self,
        path: FieldPath,
        property: &Property,
        include_description: bool,
    ) -> AnyElement;
}

/// Schema-driven dispatch: one widget per [`DataType`]. Widget ids derive
/// from the field path, so a row keeps its id as long as it keeps its
/// position.
#[derive(Clone)]
pub struct DefaultFieldFactory {
    store: FormStateStore,
}

impl DefaultFieldFactory {
    pub fn new(store: FormStateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    /// Renders every top-level property of a map schema as a vertical form
    /// body.
    pub fn render_root(&self, schema: &Property, include_description: bool) -> AnyElement {
        let mut body = div().flex().flex_col().gap_4().w_full();
        if let Some(properties) = schema.properties() {
            for (name, property) in properties {
                body = body.child(self.render_field(
                    FieldPath::root(name.clone()),
                    property,
                    include_description,
                ));
            }
        }
        body.into_any_element()
    }

    fn field_id(path: &FieldPath) -> ComponentId {
        ComponentId::named(format!("field:{path}"))
    }
}

impl FieldRenderer for DefaultFieldFactory {
    fn render_field(
        &self,
        path: FieldPath,
        property: &Property,
        include_description: bool,
    ) -> AnyElement {
        let id = Self::field_id(&path);
        match &property.data_type {
            DataType::Text => TextField::new(self.store.clone(), path, property.clone())
                .with_id(id)
                .include_description(include_description)
                .into_any_element(),
            DataType::Number => NumberField::new(self.store.clone(), path, property.clone())
                .with_id(id)
                .include_description(include_description)
                .into_any_element(),
            DataType::Boolean => BooleanField::new(self.store.clone(), path, property.clone())
                .with_id(id)
                .include_description(include_description)
                .into_any_element(),
            DataType::Array { .. } => ArrayField::new(
                self.store.clone(),
                path,
                property.clone(),
                Rc::new(self.clone()),
            )
            .with_id(id)
            .include_description(include_description)
            .into_any_element(),
            DataType::Map { .. } => MapField::new(
                self.store.clone(),
                path,
                property.clone(),
                Rc::new(self.clone()),
            )
            .with_id(id)
            .include_description(include_description)
            .into_any_element(),
        }
    }
}
