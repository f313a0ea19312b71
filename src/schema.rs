use gpui::SharedString;
use rust_decimal::Decimal;

use crate::path::{FieldPath, PathSegment};
use crate::value::Value;

/// Constraints evaluated by the store's validation walk. `required` is the
/// baseline; the rest cover the common string/number/array bounds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationRules {
    pub required: bool,
    pub required_message: Option<SharedString>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataType {
    Text,
    Number,
    Boolean,
    Array { of: Box<Property> },
    Map { properties: Vec<(String, Property)> },
}

/// Schema node describing one field: its type, display metadata, and
/// validation rules. Arrays carry the element descriptor in `of`; maps carry
/// an ordered property list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub data_type: DataType,
    pub title: Option<SharedString>,
    pub description: Option<SharedString>,
    pub validation: ValidationRules,
}

impl Property {
    fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            title: None,
            description: None,
            validation: ValidationRules::default(),
        }
    }

    pub fn text() -> Self {
        Self::new(DataType::Text)
    }

    pub fn number() -> Self {
        Self::new(DataType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(DataType::Boolean)
    }

    pub fn array(of: Property) -> Self {
        Self::new(DataType::Array { of: Box::new(of) })
    }

    pub fn map<K>(properties: impl IntoIterator<Item = (K, Property)>) -> Self
    where
        K: Into<String>,
    {
        Self::new(DataType::Map {
            properties: properties
                .into_iter()
                .map(|(key, property)| (key.into(), property))
                .collect(),
        })
    }

    pub fn title(mut self, value: impl Into<SharedString>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<SharedString>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn required(mut self, value: bool) -> Self {
        self.validation.required = value;
        self
    }

    pub fn required_message(mut self, value: impl Into<SharedString>) -> Self {
        self.validation.required = true;
        self.validation.required_message = Some(value.into());
        self
    }

    pub fn min(mut self, value: impl Into<Decimal>) -> Self {
        self.validation.min = Some(value.into());
        self
    }

    pub fn max(mut self, value: impl Into<Decimal>) -> Self {
        self.validation.max = Some(value.into());
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.validation.min_length = Some(value);
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.validation.max_length = Some(value);
        self
    }

    pub fn min_items(mut self, value: usize) -> Self {
        self.validation.min_items = Some(value);
        self
    }

    pub fn max_items(mut self, value: usize) -> Self {
        self.validation.max_items = Some(value);
        self
    }

    /// Element descriptor for array properties.
    pub fn of(&self) -> Option<&Property> {
        match &self.data_type {
            DataType::Array { of } => Some(of),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<&[(String, Property)]> {
        match &self.data_type {
            DataType::Map { properties } => Some(properties),
            _ => None,
        }
    }

    /// Resolves the schema node addressed by `path`, relative to this node.
    /// Index segments resolve through an array's element descriptor.
    pub fn at(&self, path: &FieldPath) -> Option<&Property> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, &current.data_type) {
                (PathSegment::Key(name), DataType::Map { properties }) => properties
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, property)| property)?,
                (PathSegment::Index(_), DataType::Array { of }) => of,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Value skeleton matching this schema: maps get one entry per property,
    /// every leaf starts as `Null`.
    pub fn initial_value(&self) -> Value {
        match &self.data_type {
            DataType::Map { properties } => Value::Map(
                properties
                    .iter()
                    .map(|(key, property)| (key.clone(), property.initial_value()))
                    .collect(),
            ),
            _ => Value::Null,
        }
    }
}

/// Schema for a whole form model, usually implemented via
/// `#[derive(FormSchema)]`. The returned property is expected to be a map.
pub trait HasSchema {
    fn schema() -> Property;
}

/// Property descriptor for one Rust type, used by the derive to map struct
/// fields onto schema nodes.
pub trait SchemaType {
    fn property() -> Property;
}

impl SchemaType for String {
    fn property() -> Property {
        Property::text()
    }
}

impl SchemaType for SharedString {
    fn property() -> Property {
        Property::text()
    }
}

impl SchemaType for bool {
    fn property() -> Property {
        Property::boolean()
    }
}

impl SchemaType for Decimal {
    fn property() -> Property {
        Property::number()
    }
}

macro_rules! impl_schema_type_number {
    ($($ty:ty),+) => {
        $(
            impl SchemaType for $ty {
                fn property() -> Property {
                    Property::number()
                }
            }
        )+
    };
}

impl_schema_type_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<T: SchemaType> SchemaType for Vec<T> {
    fn property() -> Property {
        Property::array(T::property())
    }
}

impl<T: SchemaType> SchemaType for Option<T> {
    fn property() -> Property {
        T::property()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections_schema() -> Property {
        Property::map([
            ("title", Property::text().title("Title").required(true)),
            (
                "tags",
                Property::array(Property::text().min_length(1))
                    .title("Tags")
                    .min_items(1),
            ),
        ])
    }

    #[test]
    fn schema_resolution_follows_paths() {
        let schema = sections_schema();
        let title = schema
            .at(&FieldPath::root("title"))
            .expect("title should resolve");
        assert_eq!(title.data_type, DataType::Text);

        let row = schema
            .at(&FieldPath::root("tags").index(7))
            .expect("any row index should resolve through `of`");
        assert_eq!(row.validation.min_length, Some(1));

        assert!(schema.at(&FieldPath::root("missing")).is_none());
        assert!(schema.at(&FieldPath::root("title").index(0)).is_none());
    }

    #[test]
    fn initial_value_mirrors_map_shape() {
        let initial = sections_schema().initial_value();
        assert_eq!(
            initial,
            Value::map([("title", Value::Null), ("tags", Value::Null)])
        );
    }

    #[test]
    fn vec_schema_type_nests_element_descriptors() {
        let property = <Vec<Vec<String>> as SchemaType>::property();
        let inner = property.of().and_then(Property::of).expect("nested of");
        assert_eq!(inner.data_type, DataType::Text);
    }
}
