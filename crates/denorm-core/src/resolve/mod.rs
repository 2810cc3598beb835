//! Denormalization engine.
//!
//! `dispatch` matches on the schema shape and hands off to one of three
//! resolvers. Every recursive call, including the ones made later by deferred
//! entity fields, carries the same `Context`: one store snapshot, one cache
//! handle, one config.

mod collection;
mod entity;
mod union;


use crate::{
    cache::{CacheMode, ResolutionCache},
    config::DenormalizeConfig,
    error::DenormalizeError,
    model::Schema,
    obs::sink::{ResolveEvent, record},
    resolved::Resolved,
    store::EntityStore,
    value::Value,
};

///
/// Context
///
/// Per-call resolution state threaded through every resolver.
///

#[derive(Clone)]
pub(crate) struct Context<'s> {
    pub(crate) store: &'s EntityStore,
    pub(crate) cache: ResolutionCache,
    pub(crate) config: DenormalizeConfig,
}

impl Context<'_> {
    /// Argument guard; with checks disabled absent inputs fall through.
    fn require<'v>(
        &self,
        argument: &'static str,
        value: Option<&'v Value>,
    ) -> Result<Option<&'v Value>, DenormalizeError> {
        match value {
            None if self.config.check_arguments => Err(DenormalizeError::missing(argument)),
            other => Ok(other),
        }
    }
}

///
/// Denormalizer
///
/// Builder for top-level calls against one store snapshot.
/// With `CacheMode::Fresh` every `denormalize` call gets its own cache.
///

#[derive(Clone, Debug)]
pub struct Denormalizer<'s> {
    store: &'s EntityStore,
    config: DenormalizeConfig,
    cache: CacheMode,
}

impl<'s> Denormalizer<'s> {
    #[must_use]
    pub fn new(store: &'s EntityStore) -> Self {
        Self {
            store,
            config: DenormalizeConfig::default(),
            cache: CacheMode::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DenormalizeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: impl Into<CacheMode>) -> Self {
        self.cache = cache.into();
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DenormalizeConfig {
        &self.config
    }

    /// Resolve `selector` against `schema`.
    pub fn denormalize(
        &self,
        schema: impl Into<Schema>,
        selector: Option<&Value>,
    ) -> Result<Resolved<'s>, DenormalizeError> {
        let schema = schema.into();
        let ctx = Context {
            store: self.store,
            cache: self.cache.clone().into_cache(&self.config),
            config: self.config,
        };
        tracing::debug!(
            schema = %schema,
            cache_enabled = ctx.cache.is_enabled(),
            "denormalize"
        );

        dispatch(&ctx, schema, selector)
    }
}

/// Resolve `selector` against `schema` in `store`.
///
/// `selector` may be omitted only for collection schemas, in which case every
/// entity of the item type is returned in store order.
pub fn denormalize<'s>(
    schema: impl Into<Schema>,
    store: &'s EntityStore,
    selector: Option<&Value>,
    cache: impl Into<CacheMode>,
) -> Result<Resolved<'s>, DenormalizeError> {
    Denormalizer::new(store)
        .with_cache(cache)
        .denormalize(schema, selector)
}

// Null selectors count as absent.
pub(crate) fn dispatch<'s>(
    ctx: &Context<'s>,
    schema: Schema,
    selector: Option<&Value>,
) -> Result<Resolved<'s>, DenormalizeError> {
    let selector = selector.filter(|value| !value.is_null());
    record(ResolveEvent::Dispatch {
        kind: schema.kind(),
    });

    match schema {
        Schema::Entity(model) => entity::resolve_entity(ctx, model, selector).map(Resolved::Entity),
        Schema::Collection(item) => {
            collection::resolve_collection(ctx, *item, selector).map(Resolved::List)
        }
        Schema::Union(model) => union::resolve_union(ctx, model, selector),
    }
}
