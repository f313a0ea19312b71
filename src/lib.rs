//! Schema-driven dynamic form widgets for [gpui].
//!
//! A [`schema::Property`] tree describes the form; a [`form::FormStateStore`]
//! holds its values, touched flags, and validation errors keyed by
//! [`path::FieldPath`]; and [`fields::DefaultFieldFactory`] turns the two
//! into widgets, recursing through arrays and nested objects. Array fields
//! get add, remove, and insert-after controls with rows addressed as
//! `name[index]`.
//!
//! ```ignore
//! use schemaform::prelude::*;
//!
//! let schema = Property::map([
//!     ("title", Property::text().title("Title").required(true)),
//!     ("tags", Property::array(Property::text()).title("Tags")),
//! ]);
//! let store = FormStateStore::from_schema(schema.clone(), FormOptions::default());
//! let factory = DefaultFieldFactory::new(store);
//! let body = factory.render_root(&schema, true);
//! ```

pub mod fields;
pub mod form;
pub mod id;
pub mod path;
pub mod prelude;
pub mod provider;
pub mod schema;
pub mod style;
pub mod theme;
pub mod value;

pub use schemaform_derive::FormSchema;
