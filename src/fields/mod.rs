mod array;
mod boolean;
mod chrome;
mod control;
mod factory;
mod map;
mod number;
mod text;

pub use array::{ArrayField, ArrayFieldPlan, ArrayRowPlan};
pub use boolean::BooleanField;
pub use factory::{DefaultFieldFactory, FieldRenderer};
pub use map::MapField;
pub use number::NumberField;
pub use text::TextField;
