//! Single import for building and rendering forms.

pub use crate::fields::{
    ArrayField, ArrayFieldPlan, ArrayRowPlan, BooleanField, DefaultFieldFactory, FieldRenderer,
    MapField, NumberField, TextField,
};
pub use crate::form::{
    FormError, FormOptions, FormResult, FormSnapshot, FormStateStore, ValidationMode,
};
pub use crate::id::ComponentId;
pub use crate::path::{FieldPath, PathSegment};
pub use crate::provider::FormProvider;
pub use crate::schema::{DataType, HasSchema, Property, SchemaType, ValidationRules};
pub use crate::style::{FieldLayout, Size};
pub use crate::theme::{ColorScheme, Theme};
pub use crate::value::Value;

pub use schemaform_derive::FormSchema;
