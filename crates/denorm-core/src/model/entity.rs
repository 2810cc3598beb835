use crate::model::schema::Schema;
use std::fmt;

///
/// EntityModel
/// Runtime model for one entity type.
///

pub struct EntityModel {
    /// Stable type name; top-level key of both the store and the cache.
    pub name: &'static str,
    /// Field holding the entity id; used for not-found placeholders.
    pub id_attribute: &'static str,
    /// Fields whose raw values reference other entities.
    pub relations: &'static [RelationModel],
}

impl EntityModel {
    /// Default id attribute name.
    pub const DEFAULT_ID_ATTRIBUTE: &'static str = "id";

    /// Build a model with the default `id` attribute.
    #[must_use]
    pub const fn new(name: &'static str, relations: &'static [RelationModel]) -> Self {
        Self {
            name,
            id_attribute: Self::DEFAULT_ID_ATTRIBUTE,
            relations,
        }
    }

    #[must_use]
    pub const fn with_id_attribute(mut self, id_attribute: &'static str) -> Self {
        self.id_attribute = id_attribute;
        self
    }

    /// Relation declared on `field`, if any.
    #[must_use]
    pub fn relation_model(&self, field: &str) -> Option<&'static RelationModel> {
        self.relations.iter().find(|relation| relation.field == field)
    }

    /// Nested schema for `field`, if the field is a relation.
    #[must_use]
    pub fn relation(&self, field: &str) -> Option<Schema> {
        self.relation_model(field).map(|relation| relation.schema)
    }
}

// Relations are rendered by name only so cyclic graphs stay printable.
impl fmt::Debug for EntityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.relations.iter().map(|r| r.field).collect();

        f.debug_struct("EntityModel")
            .field("name", &self.name)
            .field("id_attribute", &self.id_attribute)
            .field("relations", &fields)
            .finish()
    }
}

///
/// RelationModel
/// One field of an entity that holds a reference (or references) to other entities.
///

#[derive(Clone, Copy, Debug)]
pub struct RelationModel {
    pub field: &'static str,
    pub schema: Schema,
}

impl RelationModel {
    #[must_use]
    pub const fn new(field: &'static str, schema: Schema) -> Self {
        Self { field, schema }
    }
}
