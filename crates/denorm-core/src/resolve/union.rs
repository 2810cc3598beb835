use super::{Context, dispatch};
use crate::{
    error::DenormalizeError,
    model::{Schema, UnionModel},
    resolved::Resolved,
    value::{Record, Value},
};

/// Resolve a union selector through the variant its tag names.
///
/// Accepts the normalized form `{ schema: tag, id }` and raw records that
/// carry the model's schema attribute (their id comes from the variant's id
/// attribute, falling back to `id`).
pub(super) fn resolve_union<'s>(
    ctx: &Context<'s>,
    model: &'static UnionModel,
    selector: Option<&Value>,
) -> Result<Resolved<'s>, DenormalizeError> {
    let Some(selector) = ctx.require("selector", selector)? else {
        return Err(unknown_variant(model, ""));
    };
    let Value::Map(fields) = selector else {
        return Err(DenormalizeError::InvalidSelector {
            schema: Schema::Union(model).to_string(),
            expected: "union selector object",
            found: selector.clone(),
        });
    };

    // normalized `{ schema, id }` form
    if let Some(tag) = present(fields, UnionModel::SELECTOR_SCHEMA_KEY) {
        let id = ctx.require("id", present(fields, UnionModel::SELECTOR_ID_KEY))?;
        let variant = variant(model, tag)?;

        return dispatch(ctx, variant, id);
    }

    // raw record form
    let tag = ctx.require("schema", present(fields, model.schema_attribute))?;
    let Some(tag) = tag else {
        return Err(unknown_variant(model, ""));
    };
    let variant = variant(model, tag)?;
    let id = variant
        .as_entity()
        .and_then(|entity| present(fields, entity.id_attribute))
        .or_else(|| present(fields, UnionModel::SELECTOR_ID_KEY));
    let id = ctx.require("id", id)?;

    dispatch(ctx, variant, id)
}

// Null entries count as absent.
fn present<'a>(fields: &'a Record, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn variant(model: &'static UnionModel, tag: &Value) -> Result<Schema, DenormalizeError> {
    let Some(tag) = tag.as_str() else {
        return Err(DenormalizeError::InvalidSelector {
            schema: Schema::Union(model).to_string(),
            expected: "text tag",
            found: tag.clone(),
        });
    };

    model.variant(tag).ok_or_else(|| unknown_variant(model, tag))
}

fn unknown_variant(model: &UnionModel, tag: &str) -> DenormalizeError {
    DenormalizeError::UnknownVariant {
        tag: tag.to_string(),
        expected: model.tags(),
    }
}
