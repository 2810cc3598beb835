use crate::model::schema::Schema;

///
/// UnionModel
///
/// Polymorphic reference: the selector names which variant schema applies.
/// Normalized selectors look like `{ "schema": tag, "id": id }`; a raw record
/// carrying `schema_attribute` is accepted as well.
///

#[derive(Debug)]
pub struct UnionModel {
    /// Attribute that carries the tag on raw records.
    pub schema_attribute: &'static str,
    pub variants: &'static [VariantModel],
}

impl UnionModel {
    /// Selector key carrying the tag in normalized selectors.
    pub const SELECTOR_SCHEMA_KEY: &'static str = "schema";

    /// Selector key carrying the id in normalized selectors.
    pub const SELECTOR_ID_KEY: &'static str = "id";

    #[must_use]
    pub const fn new(schema_attribute: &'static str, variants: &'static [VariantModel]) -> Self {
        Self {
            schema_attribute,
            variants,
        }
    }

    #[must_use]
    pub fn variant(&self, tag: &str) -> Option<Schema> {
        self.variants
            .iter()
            .find(|variant| variant.tag == tag)
            .map(|variant| variant.schema)
    }

    /// Declared variant tags, in declaration order.
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        self.variants.iter().map(|variant| variant.tag).collect()
    }
}

///
/// VariantModel
///

#[derive(Clone, Copy, Debug)]
pub struct VariantModel {
    pub tag: &'static str,
    pub schema: Schema,
}

impl VariantModel {
    #[must_use]
    pub const fn new(tag: &'static str, schema: Schema) -> Self {
        Self { tag, schema }
    }
}
