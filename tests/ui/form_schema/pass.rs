use schemaform::prelude::*;

#[derive(FormSchema)]
struct ArticleForm {
    #[schema(title = "Title", required)]
    title: String,
    #[schema(description = "One tag per row")]
    tags: Vec<String>,
    published: bool,
}

fn main() {
    let schema = ArticleForm::schema();

    let title = schema
        .at(&FieldPath::root("title"))
        .expect("title should resolve");
    assert_eq!(title.title.as_deref(), Some("Title"));
    assert!(title.validation.required);

    let tags = schema
        .at(&FieldPath::root("tags"))
        .expect("tags should resolve");
    assert_eq!(tags.description.as_deref(), Some("One tag per row"));
    assert!(matches!(tags.data_type, DataType::Array { .. }));
    assert_eq!(
        tags.at(&FieldPath::default().index(3)).map(|of| &of.data_type),
        Some(&DataType::Text)
    );

    let published = schema
        .at(&FieldPath::root("published"))
        .expect("published should resolve");
    assert_eq!(published.title.as_deref(), Some("Published"));
    assert_eq!(published.data_type, DataType::Boolean);
}
