//! End-to-end resolution over the marketing snapshot.

use denorm_core::{
    CacheMode, DenormalizeConfig, DenormalizeError, Denormalizer, Entity, ResolutionCache,
    Resolved, denormalize, is_resolved,
    obs::{metrics_report, metrics_reset_all},
    value::Value,
};
use denorm_testing_fixtures::marketing::{
    ACCOUNT, AUDIENCE, AUDIENCES, FILE, LIST, PRODUCT, USERS, seed,
};
use serde_json::json;

fn expect_json(resolved: &Resolved<'_>, depth: usize, expected: serde_json::Value) {
    let snapshot = resolved.snapshot(depth).expect("snapshot resolves");

    assert_eq!(serde_json::Value::from(snapshot), expected);
}

fn follow<'s>(entity: &Entity<'s>, field: &str) -> Resolved<'s> {
    entity
        .resolve(field)
        .expect("relation resolves")
        .expect("relation field present")
}

#[test]
fn entity_with_a_dangling_reference() {
    let store = seed();
    let product = denormalize(&PRODUCT, &store, Some(&Value::from(4567)), CacheMode::Fresh)
        .expect("product resolves");

    expect_json(
        &product,
        1,
        json!({ "name": "Solar", "account": { "id": 8910 }, "icon": "solar.svg" }),
    );

    let account = follow(product.as_entity().expect("entity"), "account");
    assert!(!is_resolved(&account));
}

#[test]
fn missing_entity_is_an_unresolved_placeholder() {
    let store = seed();
    let product = denormalize(&PRODUCT, &store, Some(&Value::from(1234)), true)
        .expect("lookup succeeds");

    assert!(!product.is_resolved());
    expect_json(&product, 0, json!({ "id": 1234 }));
}

#[test]
fn nested_relations_expand_through_every_level() {
    let store = seed();
    let audience = denormalize(&AUDIENCE, &store, Some(&Value::from(1234)), true)
        .expect("audience resolves");

    expect_json(
        &audience,
        2,
        json!({
            "name": "Burlington Audience",
            "product": { "name": "Solar", "account": { "id": 8910 }, "icon": "solar.svg" },
            "size": 10000,
            "states": [{ "name": "building", "date": 5432 }]
        }),
    );
}

#[test]
fn omitted_ids_pull_every_entity_of_the_type() {
    let store = seed();
    let users = denormalize(USERS, &store, None, true).expect("users resolve");

    expect_json(
        &users,
        0,
        json!([{ "name": "Nick" }, { "name": "Derek" }, { "name": "Tristan" }]),
    );
}

#[test]
fn listed_ids_resolve_in_order() {
    let store = seed();
    let ids = Value::from(vec![4444, 3333]);
    let users = denormalize(USERS, &store, Some(&ids), true).expect("users resolve");

    expect_json(&users, 0, json!([{ "name": "Derek" }, { "name": "Nick" }]));
}

#[test]
fn one_call_resolves_each_entity_once() {
    let store = seed();
    let audiences = denormalize(AUDIENCES, &store, None, true).expect("audiences resolve");

    let burlington = follow(audiences.entity_at(0).expect("first"), "states");
    let virginia = follow(audiences.entity_at(1).expect("second"), "states");

    let a = burlington.entity_at(0).expect("state 1");
    let b = virginia.entity_at(0).expect("state 1");
    assert!(a.ptr_eq(b));
}

#[test]
fn calls_can_share_a_cache() {
    let store = seed();
    let cache = ResolutionCache::new();

    let users = denormalize(USERS, &store, Some(&Value::from(vec![3333])), &cache)
        .expect("users resolve");
    let account = denormalize(&ACCOUNT, &store, Some(&Value::from(9999)), &cache)
        .expect("account resolves");

    let nick = users.entity_at(0).expect("nick");
    let members = follow(account.as_entity().expect("account"), "users");
    assert!(members.entity_at(0).expect("nick").ptr_eq(nick));
}

#[test]
fn caching_can_be_turned_off() {
    let store = seed();
    let audiences = denormalize(AUDIENCES, &store, None, false).expect("audiences resolve");

    let burlington = follow(audiences.entity_at(0).expect("first"), "states");
    let virginia = follow(audiences.entity_at(1).expect("second"), "states");

    let a = burlington.entity_at(0).expect("state 1");
    let b = virginia.entity_at(0).expect("state 1");
    assert!(!a.ptr_eq(b));
    assert_eq!(a, b);
}

#[test]
fn missing_id_is_rejected() {
    let store = seed();
    let denormalizer =
        Denormalizer::new(&store).with_config(DenormalizeConfig::new().with_check_arguments(true));

    let err = denormalizer
        .denormalize(&AUDIENCE, None)
        .expect_err("id is required");
    assert!(matches!(err, DenormalizeError::MissingArgument { argument: "id" }));
    assert_eq!(err.display_with_class(), "argument: argument id is required");
}

#[test]
fn null_relations_are_kept_as_values() {
    let store = seed();
    let file = denormalize(&FILE, &store, Some(&Value::from("f1")), true)
        .expect("file resolves")
        .into_entity()
        .expect("entity");

    assert_eq!(file.value("report"), Some(&Value::Null));
    let creator = follow(&file, "creator");
    assert_eq!(
        creator.as_entity().and_then(|user| user.value("name")),
        Some(&Value::from("Derek"))
    );
}

#[test]
fn back_references_close_the_cycle() {
    let store = seed();
    let list = denormalize(&LIST, &store, Some(&Value::from(7)), true)
        .expect("list resolves")
        .into_entity()
        .expect("entity");

    let outsources = follow(&list, "outsources");
    for outsource in outsources.as_list().expect("outsources") {
        let outsource = outsource.as_entity().expect("outsource");
        let owner = follow(outsource, "list");

        assert!(owner.as_entity().expect("list").ptr_eq(&list));
    }

    // vendor 2 was never stored
    let second = outsources.entity_at(1).expect("second outsource");
    assert!(!follow(second, "vendor").is_resolved());
}

#[test]
fn counters_track_scans_and_cache_traffic() {
    let store = seed();
    metrics_reset_all();

    let audiences = denormalize(AUDIENCES, &store, None, true).expect("audiences resolve");
    for audience in audiences.as_list().expect("audiences") {
        follow(audience.as_entity().expect("audience"), "states");
    }

    let report = metrics_report();
    assert_eq!(report.entity("audiences").rows_scanned, 2);
    assert_eq!(report.entity("states").store_hits, 2);
    assert_eq!(report.entity("states").cache_hits, 1);
    assert_eq!(report.ops.field_reads, 2);
}
