use super::*;

#[test]
fn numeric_and_text_ids_share_a_key() {
    let from_int = EntityKey::from_value(&Value::Int(4567)).expect("int key");
    let from_uint = EntityKey::from_value(&Value::Uint(4567)).expect("uint key");
    let from_float = EntityKey::from_value(&Value::Float64(4567.0)).expect("float key");
    let from_text = EntityKey::from_value(&Value::from("4567")).expect("text key");

    assert_eq!(from_int, from_text);
    assert_eq!(from_uint, from_text);
    assert_eq!(from_float, from_text);
    assert_eq!(EntityKey::from(4567), from_text);
}

#[test]
fn non_scalar_or_non_finite_values_are_not_keys() {
    for value in [
        Value::Null,
        Value::Bool(true),
        Value::Float64(f64::NAN),
        Value::Float64(f64::INFINITY),
        Value::List(vec![Value::Int(1)]),
        Value::map([("id", 1)]),
    ] {
        assert!(
            EntityKey::from_value(&value).is_none(),
            "{value:?} must not canonicalize to a key"
        );
    }
}

#[test]
fn floats_keep_their_decimal_form() {
    let key = |f: f64| EntityKey::from_value(&Value::Float64(f)).expect("float key");

    assert_eq!(key(1e20).as_str(), "100000000000000000000");
    assert_ne!(key(1e20), key(1e19));
    assert_ne!(key(1e20), EntityKey::from(i64::MAX));
    assert_eq!(key(1.5), EntityKey::from("1.5"));
    assert_eq!(key(-0.0), EntityKey::from(0));
    assert_eq!(key(-12.0), EntityKey::from(-12));
    assert_eq!(key(9_007_199_254_740_992.0), EntityKey::from(9_007_199_254_740_992_u64));
}

#[test]
fn index_like_keys_sort_numerically_before_text() {
    let mut keys: Vec<EntityKey> = ["b", "10", "a", "2", "01", "9999"]
        .into_iter()
        .map(EntityKey::from)
        .collect();
    keys.sort();

    let order: Vec<&str> = keys.iter().map(EntityKey::as_str).collect();
    assert_eq!(order, vec!["2", "10", "9999", "01", "a", "b"]);
}

#[test]
fn ordering_agrees_with_equality() {
    let a = EntityKey::from("007");
    let b = EntityKey::from("7");

    assert_ne!(a, b);
    assert_ne!(a.cmp(&b), Ordering::Equal);
}
