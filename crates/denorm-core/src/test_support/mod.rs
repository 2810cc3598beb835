//! Shared schemas and seed data for unit tests.
//!
//! The graph is cyclic on purpose: humans belong to a company whose members
//! are a union of humans and robots.

use crate::{
    key::EntityKey,
    model::{EntityModel, RelationModel, Schema, UnionModel, VariantModel},
    resolved::EntityNode,
    store::EntityStore,
    value::{Record, Value},
};
use std::rc::Rc;

pub(crate) static HUMAN: EntityModel =
    EntityModel::new("humans", &HUMAN_RELATIONS).with_id_attribute("employeeId");
pub(crate) static ROBOT: EntityModel = EntityModel::new("robots", &ROBOT_RELATIONS);
pub(crate) static COMPANY: EntityModel = EntityModel::new("companies", &COMPANY_RELATIONS);

pub(crate) static HUMAN_SCHEMA: Schema = Schema::Entity(&HUMAN);
pub(crate) static HUMANS: Schema = Schema::Collection(&HUMAN_SCHEMA);
pub(crate) static MEMBER: Schema = Schema::Union(&MEMBER_UNION);
pub(crate) static MEMBERS: Schema = Schema::Collection(&MEMBER);
pub(crate) static MEMBER_UNION: UnionModel = UnionModel::new("kind", &MEMBER_VARIANTS);

static HUMAN_RELATIONS: [RelationModel; 2] = [
    RelationModel::new("company", Schema::Entity(&COMPANY)),
    RelationModel::new("friends", Schema::Collection(&HUMAN_SCHEMA)),
];
static ROBOT_RELATIONS: [RelationModel; 1] =
    [RelationModel::new("company", Schema::Entity(&COMPANY))];
static COMPANY_RELATIONS: [RelationModel; 1] =
    [RelationModel::new("members", Schema::Collection(&MEMBER))];
static MEMBER_VARIANTS: [VariantModel; 2] = [
    VariantModel::new("human", Schema::Entity(&HUMAN)),
    VariantModel::new("robot", Schema::Entity(&ROBOT)),
];

/// Build a record from `(field, value)` pairs.
pub(crate) fn record<const N: usize>(entries: [(&str, Value); N]) -> Record {
    entries
        .into_iter()
        .map(|(field, value)| (field.to_string(), value))
        .collect()
}

/// Normalized union selector `{ schema, id }`.
pub(crate) fn member(tag: &str, id: impl Into<Value>) -> Value {
    Value::map([("schema", Value::from(tag)), ("id", id.into())])
}

/// Detached node for a human with no relations set.
pub(crate) fn human_node(id: u64) -> Rc<EntityNode> {
    let raw = record([
        ("employeeId", Value::from(id)),
        ("name", Value::from(format!("human {id}"))),
    ]);

    Rc::new(EntityNode::from_record(
        &HUMAN,
        EntityKey::from(id),
        Value::from(id),
        &raw,
    ))
}

/// Two humans, one robot and one company that employs all of them.
/// Human 2 lists a friend (3) that does not exist.
pub(crate) fn seed_store() -> EntityStore {
    EntityStore::new()
        .with_row(
            "humans",
            1,
            record([
                ("employeeId", Value::from(1)),
                ("name", Value::from("Ada")),
                ("company", Value::from(10)),
                ("friends", Value::from(vec![2])),
            ]),
        )
        .with_row(
            "humans",
            2,
            record([
                ("employeeId", Value::from(2)),
                ("name", Value::from("Grace")),
                ("company", Value::from(10)),
                ("friends", Value::from(vec![1, 3])),
            ]),
        )
        .with_row(
            "robots",
            "r2",
            record([
                ("id", Value::from("r2")),
                ("model", Value::from("astromech")),
                ("company", Value::from(10)),
            ]),
        )
        .with_row(
            "companies",
            10,
            record([
                ("id", Value::from(10)),
                ("name", Value::from("Acme")),
                (
                    "members",
                    Value::List(vec![
                        member("human", 1),
                        member("human", 2),
                        member("robot", "r2"),
                    ]),
                ),
            ]),
        )
}
