//! Resolved values handed back to callers.
//!
//! An `Entity` is a shallow copy of its raw record in which relation fields
//! are deferred: nothing behind them is looked up until `resolve` is called,
//! and every read goes back through the engine with the same store and cache.
//! Sharing and cycle termination come from the cache, not from per-field
//! memoization.

use crate::{
    error::DenormalizeError,
    key::EntityKey,
    model::{EntityModel, Schema},
    obs::sink::{ResolveEvent, record},
    resolve::{Context, dispatch},
    value::{Record, Value},
};
use std::{collections::BTreeMap, fmt, rc::Rc};

///
/// Marker
///
/// Out-of-band tag carried by placeholder entities. It lives beside the
/// fields, never among them, so no field name can collide with it.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Marker {
    Unresolved,
}

/// Marker set on entities whose id was not found in the store.
pub const UNRESOLVED: Marker = Marker::Unresolved;

/// False only for values carrying the unresolved marker.
#[must_use]
pub fn is_resolved(value: &Resolved<'_>) -> bool {
    value.is_resolved()
}

///
/// Slot
///

#[derive(Debug, PartialEq)]
pub(crate) enum Slot {
    Plain(Value),
    Deferred {
        field: &'static str,
        schema: Schema,
        selector: Value,
    },
}

impl Slot {
    const fn raw(&self) -> &Value {
        match self {
            Self::Plain(value) | Self::Deferred { selector: value, .. } => value,
        }
    }
}

///
/// EntityNode
///
/// The cached part of a resolved entity. Holds no reference to the store or
/// the cache, so cache entries never form reference cycles.
///

#[derive(Debug)]
pub(crate) struct EntityNode {
    model: &'static EntityModel,
    key: Option<EntityKey>,
    id: Value,
    slots: BTreeMap<String, Slot>,
    marker: Option<Marker>,
}

impl EntityNode {
    /// Shallow-copy a raw record, deferring every non-null relation field.
    pub(crate) fn from_record(
        model: &'static EntityModel,
        key: EntityKey,
        id: Value,
        raw: &Record,
    ) -> Self {
        let slots = raw
            .iter()
            .map(|(name, value)| {
                let slot = match model.relation_model(name) {
                    Some(relation) if !value.is_null() => Slot::Deferred {
                        field: relation.field,
                        schema: relation.schema,
                        selector: value.clone(),
                    },
                    _ => Slot::Plain(value.clone()),
                };

                (name.clone(), slot)
            })
            .collect();

        Self {
            model,
            key: Some(key),
            id,
            slots,
            marker: None,
        }
    }

    /// `{ id_attribute: id }` plus the unresolved marker.
    pub(crate) fn placeholder(
        model: &'static EntityModel,
        key: Option<EntityKey>,
        id: Value,
    ) -> Self {
        let slots = BTreeMap::from([(model.id_attribute.to_string(), Slot::Plain(id.clone()))]);

        Self {
            model,
            key,
            id,
            slots,
            marker: Some(UNRESOLVED),
        }
    }
}

impl PartialEq for EntityNode {
    fn eq(&self, other: &Self) -> bool {
        self.model.name == other.model.name
            && self.key == other.key
            && self.slots == other.slots
            && self.marker == other.marker
    }
}

///
/// Entity
///
/// One resolved entity. Clones are cheap and keep identity; two `Entity`
/// values are the same resolution exactly when `ptr_eq` holds.
/// `==` compares structure.
///

#[derive(Clone)]
pub struct Entity<'s> {
    ctx: Context<'s>,
    node: Rc<EntityNode>,
}

impl<'s> Entity<'s> {
    pub(crate) const fn new(ctx: Context<'s>, node: Rc<EntityNode>) -> Self {
        Self { ctx, node }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.node.model.name
    }

    #[must_use]
    pub fn model(&self) -> &'static EntityModel {
        self.node.model
    }

    /// The id as first resolved: the selector of the call that populated the
    /// cache entry, or the store key (as text) when reached by enumeration.
    #[must_use]
    pub fn id(&self) -> &Value {
        &self.node.id
    }

    /// Canonical key; `None` only for placeholders built without an id.
    #[must_use]
    pub fn key(&self) -> Option<&EntityKey> {
        self.node.key.as_ref()
    }

    #[must_use]
    pub fn marker(&self) -> Option<Marker> {
        self.node.marker
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.node.marker != Some(UNRESOLVED)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.node.slots.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.node.slots.contains_key(field)
    }

    #[must_use]
    pub fn is_deferred(&self, field: &str) -> bool {
        matches!(self.node.slots.get(field), Some(Slot::Deferred { .. }))
    }

    /// Plain (non-relation) field value.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        match self.node.slots.get(field)? {
            Slot::Plain(value) => Some(value),
            Slot::Deferred { .. } => None,
        }
    }

    /// Raw selector stored behind a deferred field.
    #[must_use]
    pub fn selector(&self, field: &str) -> Option<&Value> {
        match self.node.slots.get(field)? {
            Slot::Deferred { selector, .. } => Some(selector),
            Slot::Plain(_) => None,
        }
    }

    /// Read any field; deferred fields are resolved on the way out.
    pub fn get(&self, field: &str) -> Result<Option<Field<'_, 's>>, DenormalizeError> {
        match self.node.slots.get(field) {
            None => Ok(None),
            Some(Slot::Plain(value)) => Ok(Some(Field::Value(value))),
            Some(Slot::Deferred {
                field,
                schema,
                selector,
            }) => self
                .read_deferred(*field, *schema, selector)
                .map(|resolved| Some(Field::Resolved(resolved))),
        }
    }

    /// Resolve a relation field; `None` when absent or not a relation.
    pub fn resolve(&self, field: &str) -> Result<Option<Resolved<'s>>, DenormalizeError> {
        match self.node.slots.get(field) {
            Some(Slot::Deferred {
                field,
                schema,
                selector,
            }) => self.read_deferred(*field, *schema, selector).map(Some),
            _ => Ok(None),
        }
    }

    fn read_deferred(
        &self,
        field: &'static str,
        schema: Schema,
        selector: &Value,
    ) -> Result<Resolved<'s>, DenormalizeError> {
        record(ResolveEvent::FieldRead {
            entity: self.node.model.name,
            field,
        });
        tracing::trace!(entity = self.node.model.name, field, "deferred field read");

        dispatch(&self.ctx, schema, Some(selector))
    }

    /// Shallow copy of the raw record; relation fields keep their raw selectors.
    #[must_use]
    pub fn raw(&self) -> Record {
        self.node
            .slots
            .iter()
            .map(|(name, slot)| (name.clone(), slot.raw().clone()))
            .collect()
    }

    /// Plain copy with relation fields expanded `depth` levels deep.
    ///
    /// At depth 0 relation fields keep their raw selectors, which keeps cyclic
    /// graphs finite.
    pub fn snapshot(&self, depth: usize) -> Result<Value, DenormalizeError> {
        let mut out = Record::new();

        for (name, slot) in &self.node.slots {
            let value = match slot {
                Slot::Plain(value) => value.clone(),
                Slot::Deferred { selector, .. } if depth == 0 => selector.clone(),
                Slot::Deferred {
                    field,
                    schema,
                    selector,
                } => self
                    .read_deferred(*field, *schema, selector)?
                    .snapshot(depth - 1)?,
            };
            out.insert(name.clone(), value);
        }

        Ok(Value::Map(out))
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.node == *other.node
    }
}

impl fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Entity");
        out.field("type", &self.node.model.name)
            .field("id", &self.node.id)
            .field("fields", &self.node.slots);
        if let Some(marker) = self.node.marker {
            out.field("marker", &marker);
        }

        out.finish()
    }
}

///
/// Field
/// One field read from an entity.
///

#[derive(Debug)]
pub enum Field<'a, 's> {
    Value(&'a Value),
    Resolved(Resolved<'s>),
}

///
/// Resolved
///
/// Result of one dispatch: an entity (entity and union schemas) or an ordered
/// list (collection schemas).
///

#[derive(Clone, Debug, PartialEq)]
pub enum Resolved<'s> {
    Entity(Entity<'s>),
    List(Vec<Self>),
}

impl<'s> Resolved<'s> {
    #[must_use]
    pub const fn as_entity(&self) -> Option<&Entity<'s>> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn into_entity(self) -> Option<Entity<'s>> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            Self::Entity(_) => None,
        }
    }

    #[must_use]
    pub fn into_list(self) -> Option<Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            Self::Entity(_) => None,
        }
    }

    /// Entity at `index` of a list result.
    #[must_use]
    pub fn entity_at(&self, index: usize) -> Option<&Entity<'s>> {
        self.as_list()?.get(index)?.as_entity()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Entity(entity) => entity.is_resolved(),
            Self::List(_) => true,
        }
    }

    pub fn snapshot(&self, depth: usize) -> Result<Value, DenormalizeError> {
        match self {
            Self::Entity(entity) => entity.snapshot(depth),
            Self::List(items) => items
                .iter()
                .map(|item| item.snapshot(depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
        }
    }
}
