//! ## Crate layout
//! - `core`: schema models, store snapshots, the resolution cache, the
//!   denormalization engine, and observability.
//!
//! The `prelude` module carries the vocabulary most callers need: schemas,
//! the store, `denormalize` and the resolved value types.

pub use denorm_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use denorm_core::{
    CacheMode, DenormalizeConfig, DenormalizeError, Denormalizer, ResolutionCache, denormalize,
    error::Error,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use serde::{Deserialize, Serialize};
}
