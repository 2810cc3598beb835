use super::*;
use serde_json::json;

#[test]
fn from_json_canonicalizes_row_keys() {
    let store = EntityStore::from_json(json!({
        "users": { "3333": { "name": "Nick" }, "4444": { "name": "Derek" } }
    }))
    .expect("decode store");

    let nick = store.get("users", &EntityKey::from(3333)).expect("row 3333");
    assert_eq!(nick.get("name"), Some(&Value::from("Nick")));
    assert_eq!(store.len(), 2);
}

#[test]
fn rows_enumerate_in_index_order() {
    let store = EntityStore::from_json(json!({
        "states": { "10": {}, "2": {}, "draft": {}, "1": {} }
    }))
    .expect("decode store");

    let keys: Vec<&str> = store
        .table("states")
        .expect("states table")
        .keys()
        .map(EntityKey::as_str)
        .collect();
    assert_eq!(keys, vec!["1", "2", "10", "draft"]);
}

#[test]
fn non_object_rows_are_rejected() {
    let err = EntityStore::from_json(json!({ "users": { "1": "Nick" } }))
        .expect_err("scalar row must fail");

    assert!(matches!(
        err,
        StoreError::RowNotAnObject { ref entity, ref id, found: "text" }
            if entity == "users" && id == "1"
    ));
}

#[test]
fn non_object_snapshot_is_rejected() {
    let err = EntityStore::from_json(json!([1, 2])).expect_err("list snapshot must fail");

    assert!(matches!(err, StoreError::NotAnObject { found: "list" }));
}

#[test]
fn deserialize_routes_through_the_same_decoder() {
    let store: EntityStore =
        serde_json::from_str(r#"{ "humans": { "1": { "employeeId": 1, "name": "Fry" } } }"#)
            .expect("deserialize store");

    assert!(store.table("humans").is_some_and(|t| t.contains(&EntityKey::from("1"))));
}

#[test]
fn builder_rows_replace_earlier_rows() {
    let store = EntityStore::new()
        .with_row("users", 1, Record::from([("name".into(), Value::from("a"))]))
        .with_row("users", "1", Record::from([("name".into(), Value::from("b"))]));

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("users", &EntityKey::from(1)).and_then(|r| r.get("name")),
        Some(&Value::from("b"))
    );
}
