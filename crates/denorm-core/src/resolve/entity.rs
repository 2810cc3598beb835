use super::Context;
use crate::{
    error::DenormalizeError,
    key::EntityKey,
    model::{EntityModel, Schema},
    obs::sink::{ResolveEvent, record},
    resolved::{Entity, EntityNode},
    value::Value,
};
use std::rc::Rc;

static NULL_ID: Value = Value::Null;

/// Resolve one entity by id.
///
/// Cache first, then the store; found entities are cached before they are
/// returned, not-found ids yield an uncached placeholder.
pub(super) fn resolve_entity<'s>(
    ctx: &Context<'s>,
    model: &'static EntityModel,
    id: Option<&Value>,
) -> Result<Entity<'s>, DenormalizeError> {
    let id = ctx.require("id", id)?.unwrap_or(&NULL_ID);

    let Some(key) = EntityKey::from_value(id) else {
        if id.is_null() {
            // only reachable with argument checks disabled
            return Ok(placeholder(ctx, model, None, id));
        }

        return Err(DenormalizeError::InvalidSelector {
            schema: Schema::Entity(model).to_string(),
            expected: "entity id",
            found: id.clone(),
        });
    };

    resolve_key(ctx, model, key, id)
}

/// Resolve an already-canonical key; `id` is kept verbatim on the result.
pub(super) fn resolve_key<'s>(
    ctx: &Context<'s>,
    model: &'static EntityModel,
    key: EntityKey,
    id: &Value,
) -> Result<Entity<'s>, DenormalizeError> {
    if let Some(node) = ctx.cache.lookup(model.name, &key) {
        record(ResolveEvent::CacheHit { entity: model.name });
        tracing::trace!(entity = model.name, %key, "cache hit");

        return Ok(Entity::new(ctx.clone(), node));
    }

    let Some(raw) = ctx.store.get(model.name, &key) else {
        record(ResolveEvent::StoreMiss { entity: model.name });
        tracing::debug!(entity = model.name, %key, "entity not found; returning placeholder");

        return Ok(placeholder(ctx, model, Some(key), id));
    };

    record(ResolveEvent::StoreHit { entity: model.name });
    let node = Rc::new(EntityNode::from_record(model, key.clone(), id.clone(), raw));

    // store-then-return so later reads of cyclic references hit this node
    if ctx.cache.insert(model.name, key, Rc::clone(&node)) {
        record(ResolveEvent::CacheInsert { entity: model.name });
    }

    Ok(Entity::new(ctx.clone(), node))
}

fn placeholder<'s>(
    ctx: &Context<'s>,
    model: &'static EntityModel,
    key: Option<EntityKey>,
    id: &Value,
) -> Entity<'s> {
    let node = EntityNode::placeholder(model, key, id.clone());

    Entity::new(ctx.clone(), Rc::new(node))
}
