use schemaform::prelude::*;

fn schema() -> Property {
    Property::map([(
        "tags",
        Property::array(Property::text().min_length(2))
            .title("Tags")
            .description("One tag per row")
            .min_items(1),
    )])
}

fn tags() -> FieldPath {
    FieldPath::root("tags")
}

#[test]
fn empty_array_offers_only_the_add_control() {
    let store = FormStateStore::from_schema(schema(), FormOptions::default());
    let value = store.value_at(&tags()).expect("read");
    assert_eq!(
        ArrayFieldPlan::compute(&tags(), value.as_ref()),
        ArrayFieldPlan::Empty
    );
}

#[test]
fn add_then_edit_then_remove_round_trip() {
    let store = FormStateStore::from_schema(schema(), FormOptions::default());

    // Add control pressed on the empty field.
    store.array_push(&tags(), Value::Null).expect("push");
    store.touch(&tags()).expect("touch");

    let value = store.value_at(&tags()).expect("read");
    let ArrayFieldPlan::Rows(rows) = ArrayFieldPlan::compute(&tags(), value.as_ref()) else {
        panic!("expected one row after add");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].path.to_string(), "tags[0]");

    // The row's sub-field writes through its own path.
    store
        .set_value(&rows[0].path, Value::text("rust"))
        .expect("set");

    // Insert-after on row 0, then fill the new row.
    store
        .array_insert(&tags(), rows[0].insert_at, Value::Null)
        .expect("insert");
    store
        .set_value(&tags().index(1), Value::text("gpui"))
        .expect("set");
    assert_eq!(
        store.value_at(&tags()).expect("read"),
        Some(Value::array([Value::text("rust"), Value::text("gpui")]))
    );

    // Removing row 0 shifts the remaining row up.
    store.array_remove(&tags(), 0).expect("remove");
    assert_eq!(
        store.value_at(&tags()).expect("read"),
        Some(Value::array([Value::text("gpui")]))
    );
}

#[test]
fn structural_edits_alone_leave_the_field_untouched() {
    let store = FormStateStore::from_schema(schema(), FormOptions::default());

    // The add/remove/insert controls perform exactly one mutation each; none
    // of them marks the field touched.
    store.array_push(&tags(), Value::Null).expect("push");
    store.array_insert(&tags(), 1, Value::Null).expect("insert");
    store.array_remove(&tags(), 0).expect("remove");

    assert!(!store.touched_at(&tags()).expect("read"));
    assert_eq!(store.display_error(&tags()).expect("read"), None);
}

#[test]
fn removing_the_last_row_surfaces_min_items_once_touched() {
    let store = FormStateStore::from_schema(schema(), FormOptions::default());
    store.array_push(&tags(), Value::text("rust")).expect("push");
    assert_eq!(store.display_error(&tags()).expect("read"), None);

    store.array_remove(&tags(), 0).expect("remove");
    // Not yet touched, so still quiet.
    assert_eq!(store.display_error(&tags()).expect("read"), None);

    store.touch(&tags()).expect("touch");
    assert_eq!(
        store.display_error(&tags()).expect("read"),
        Some("Should have at least 1 entries".into())
    );
}

#[test]
fn row_errors_track_positions_after_structural_edits() {
    let store = FormStateStore::from_schema(schema(), FormOptions::default());
    store
        .set_value(&tags(), Value::array([Value::text("ok"), Value::text("x")]))
        .expect("set");
    assert!(store.error_at(&tags().index(1)).expect("read").is_some());

    // Inserting before the bad row moves its error down with it.
    store
        .array_insert(&tags(), 1, Value::text("also ok"))
        .expect("insert");
    assert_eq!(store.error_at(&tags().index(1)).expect("read"), None);
    assert!(store.error_at(&tags().index(2)).expect("read").is_some());
}
