use super::{Context, dispatch, entity::resolve_key};
use crate::{
    error::DenormalizeError,
    model::Schema,
    obs::sink::{ResolveEvent, record},
    resolved::Resolved,
    value::Value,
};

/// Resolve a list of ids in input order, or the whole item table when no ids
/// are given.
pub(super) fn resolve_collection<'s>(
    ctx: &Context<'s>,
    item: Schema,
    ids: Option<&Value>,
) -> Result<Vec<Resolved<'s>>, DenormalizeError> {
    match ids {
        Some(Value::List(ids)) => ids.iter().map(|id| dispatch(ctx, item, Some(id))).collect(),
        Some(other) => Err(DenormalizeError::InvalidSelector {
            schema: format!("Collection({item})"),
            expected: "list of ids",
            found: other.clone(),
        }),
        None => resolve_all(ctx, item),
    }
}

// Enumerate every row of the item type in store order.
fn resolve_all<'s>(ctx: &Context<'s>, item: Schema) -> Result<Vec<Resolved<'s>>, DenormalizeError> {
    let Some(model) = item.as_entity() else {
        return Err(DenormalizeError::UnknownSchema {
            schema: format!("Collection({item})"),
            reason: "enumerating a collection requires an entity item schema",
        });
    };

    let Some(table) = ctx.store.table(model.name) else {
        record(ResolveEvent::CollectionScan {
            entity: model.name,
            rows: 0,
        });
        return Ok(Vec::new());
    };

    record(ResolveEvent::CollectionScan {
        entity: model.name,
        rows: table.len() as u64,
    });

    table
        .keys()
        .map(|key| {
            let id = Value::Text(key.as_str().to_string());
            resolve_key(ctx, model, key.clone(), &id).map(Resolved::Entity)
        })
        .collect()
}
