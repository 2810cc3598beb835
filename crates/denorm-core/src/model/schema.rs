use crate::model::{entity::EntityModel, union::UnionModel};
use derive_more::Display;
use std::fmt;

///
/// Schema
///
/// Closed description of how a selector maps onto the store.
/// Entity      → one entity by id
/// Collection  → many ids (or the whole table) of an item schema
/// Union       → one of several schemas chosen by a tag
///

#[derive(Clone, Copy)]
pub enum Schema {
    Entity(&'static EntityModel),
    Collection(&'static Schema),
    Union(&'static UnionModel),
}

impl Schema {
    #[must_use]
    pub const fn kind(&self) -> SchemaKind {
        match self {
            Self::Entity(_) => SchemaKind::Entity,
            Self::Collection(_) => SchemaKind::Collection,
            Self::Union(_) => SchemaKind::Union,
        }
    }

    /// Entity model when this is an entity schema.
    #[must_use]
    pub const fn as_entity(&self) -> Option<&'static EntityModel> {
        match self {
            Self::Entity(model) => Some(*model),
            _ => None,
        }
    }

    /// Store/cache type name for entity schemas.
    #[must_use]
    pub const fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::Entity(model) => Some(model.name),
            _ => None,
        }
    }

    /// Whether a selector may be omitted for this schema.
    #[must_use]
    pub const fn selector_optional(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

// Schemas are static models; equality is identity.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Entity(a), Self::Entity(b)) => std::ptr::eq(*a, *b),
            (Self::Collection(a), Self::Collection(b)) => std::ptr::eq(*a, *b),
            (Self::Union(a), Self::Union(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl From<&'static EntityModel> for Schema {
    fn from(model: &'static EntityModel) -> Self {
        Self::Entity(model)
    }
}

impl From<&'static UnionModel> for Schema {
    fn from(model: &'static UnionModel) -> Self {
        Self::Union(model)
    }
}

impl From<&'static Schema> for Schema {
    fn from(schema: &'static Schema) -> Self {
        *schema
    }
}

// Entity schemas render by name; relations are never followed.
impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(model) => write!(f, "Entity({})", model.name),
            Self::Collection(item) => write!(f, "Collection({item:?})"),
            Self::Union(model) => {
                f.write_str("Union{")?;
                for (i, variant) in model.variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {:?}", variant.tag, variant.schema)?;
                }
                write!(f, "; by {}}}", model.schema_attribute)
            }
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

///
/// SchemaKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SchemaKind {
    Entity,
    Collection,
    Union,
}
