//! Runtime schema models.
//!
//! Schemas are declared once, usually as `static` items, and referenced by
//! `&'static` pointers everywhere else. Relationship graphs may be cyclic
//! (a human belongs to a company whose members are humans); statics may refer
//! to each other by reference, so cycles cost nothing at definition time and
//! the engine never walks a schema eagerly.
//!
//! In general:
//! - Callers define *what exists*
//! - `resolve` defines *what runs*
pub mod entity;
pub mod schema;
pub mod union;


// re-exports
pub use entity::{EntityModel, RelationModel};
pub use schema::{Schema, SchemaKind};
pub use union::{UnionModel, VariantModel};
