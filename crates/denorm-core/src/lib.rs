//! Core runtime for denorm: schema models, entity store snapshots, the
//! resolution cache, and the lazy denormalization engine.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod model;
pub mod obs;
pub mod resolve;
pub mod resolved;
pub mod store;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

// re-exports
pub use cache::{CacheMode, ResolutionCache};
pub use config::DenormalizeConfig;
pub use error::DenormalizeError;
pub use resolve::{Denormalizer, denormalize};
pub use resolved::{Entity, Field, Marker, Resolved, UNRESOLVED, is_resolved};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or config loaders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        cache::{CacheMode, ResolutionCache},
        key::EntityKey,
        model::{EntityModel, RelationModel, Schema, UnionModel, VariantModel},
        resolve::{Denormalizer, denormalize},
        resolved::{Entity, Field, Resolved, UNRESOLVED, is_resolved},
        store::EntityStore,
        value::Value,
    };
}
