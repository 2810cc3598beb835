use denorm_core::{
    model::{EntityModel, RelationModel, Schema, UnionModel, VariantModel},
    store::EntityStore,
};
use serde_json::json;

pub static AUTHOR: EntityModel = EntityModel::new("authors", &AUTHOR_RELATIONS);
pub static BOOK: EntityModel =
    EntityModel::new("books", &BOOK_RELATIONS).with_id_attribute("isbn");
pub static BRANCH: EntityModel = EntityModel::new("branches", &[]);
pub static MEMBER: EntityModel = EntityModel::new("members", &[]);

pub static BOOKS: Schema = Schema::Collection(&BOOK_SCHEMA);
pub static HOLDER: Schema = Schema::Union(&HOLDER_UNION);
pub static HOLDERS: Schema = Schema::Collection(&HOLDER);
pub static HOLDER_UNION: UnionModel = UnionModel::new("type", &HOLDER_VARIANTS);

static BOOK_SCHEMA: Schema = Schema::Entity(&BOOK);

static AUTHOR_RELATIONS: [RelationModel; 1] =
    [RelationModel::new("books", Schema::Collection(&BOOK_SCHEMA))];
static BOOK_RELATIONS: [RelationModel; 2] = [
    RelationModel::new("author", Schema::Entity(&AUTHOR)),
    RelationModel::new("holder", Schema::Union(&HOLDER_UNION)),
];
static HOLDER_VARIANTS: [VariantModel; 2] = [
    VariantModel::new("branch", Schema::Entity(&BRANCH)),
    VariantModel::new("member", Schema::Entity(&MEMBER)),
];

/// Seed snapshot.
///
/// Authors and books reference each other. Book `978-3` is held by a
/// member that was never stored.
#[must_use]
pub fn seed() -> EntityStore {
    let json = json!({
        "authors": {
            "1": { "id": 1, "name": "Le Guin", "books": ["978-1", "978-2"] },
            "2": { "id": 2, "name": "Lem", "books": ["978-3"] }
        },
        "books": {
            "978-1": {
                "isbn": "978-1",
                "title": "The Dispossessed",
                "author": 1,
                "holder": { "schema": "branch", "id": "central" }
            },
            "978-2": {
                "isbn": "978-2",
                "title": "The Left Hand of Darkness",
                "author": 1,
                "holder": { "schema": "member", "id": 42 }
            },
            "978-3": {
                "isbn": "978-3",
                "title": "Solaris",
                "author": 2,
                "holder": { "schema": "member", "id": 404 }
            }
        },
        "branches": {
            "central": { "id": "central", "city": "Portland" }
        },
        "members": {
            "42": { "id": 42, "name": "Rosa" }
        }
    });

    EntityStore::from_json(json).expect("library seed is valid")
}
