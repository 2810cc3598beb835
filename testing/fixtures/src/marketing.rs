use denorm_core::{
    model::{EntityModel, RelationModel, Schema},
    store::EntityStore,
};
use serde_json::json;

pub static ACCOUNT: EntityModel = EntityModel::new("accounts", &ACCOUNT_RELATIONS);
pub static AUDIENCE: EntityModel = EntityModel::new("audiences", &AUDIENCE_RELATIONS);
pub static FILE: EntityModel = EntityModel::new("files", &FILE_RELATIONS);
pub static FILE_REPORT: EntityModel = EntityModel::new("fileReports", &[]);
pub static LIST: EntityModel = EntityModel::new("lists", &LIST_RELATIONS);
pub static OUTSOURCE: EntityModel = EntityModel::new("outsources", &OUTSOURCE_RELATIONS);
pub static PRODUCT: EntityModel = EntityModel::new("products", &PRODUCT_RELATIONS);
pub static STATE: EntityModel = EntityModel::new("states", &[]);
pub static USER: EntityModel = EntityModel::new("users", &[]);
pub static VENDOR: EntityModel = EntityModel::new("vendors", &VENDOR_RELATIONS);
pub static VENDOR_SETTING: EntityModel = EntityModel::new("vendorSettings", &[]);

pub static AUDIENCES: Schema = Schema::Collection(&AUDIENCE_SCHEMA);
pub static OUTSOURCES: Schema = Schema::Collection(&OUTSOURCE_SCHEMA);
pub static STATES: Schema = Schema::Collection(&STATE_SCHEMA);
pub static USERS: Schema = Schema::Collection(&USER_SCHEMA);

static AUDIENCE_SCHEMA: Schema = Schema::Entity(&AUDIENCE);
static OUTSOURCE_SCHEMA: Schema = Schema::Entity(&OUTSOURCE);
static STATE_SCHEMA: Schema = Schema::Entity(&STATE);
static USER_SCHEMA: Schema = Schema::Entity(&USER);

static ACCOUNT_RELATIONS: [RelationModel; 1] =
    [RelationModel::new("users", Schema::Collection(&USER_SCHEMA))];
static AUDIENCE_RELATIONS: [RelationModel; 2] = [
    RelationModel::new("product", Schema::Entity(&PRODUCT)),
    RelationModel::new("states", Schema::Collection(&STATE_SCHEMA)),
];
static FILE_RELATIONS: [RelationModel; 2] = [
    RelationModel::new("creator", Schema::Entity(&USER)),
    RelationModel::new("report", Schema::Entity(&FILE_REPORT)),
];
static LIST_RELATIONS: [RelationModel; 2] = [
    RelationModel::new("outsources", Schema::Collection(&OUTSOURCE_SCHEMA)),
    RelationModel::new("audience", Schema::Entity(&AUDIENCE)),
];
static OUTSOURCE_RELATIONS: [RelationModel; 2] = [
    RelationModel::new("vendor", Schema::Entity(&VENDOR)),
    RelationModel::new("list", Schema::Entity(&LIST)),
];
static PRODUCT_RELATIONS: [RelationModel; 1] =
    [RelationModel::new("account", Schema::Entity(&ACCOUNT))];
static VENDOR_RELATIONS: [RelationModel; 1] =
    [RelationModel::new("settings", Schema::Entity(&VENDOR_SETTING))];

/// Seed snapshot.
///
/// Product 4567 points at account 8910, which does not exist. Both
/// audiences share state 1.
#[must_use]
pub fn seed() -> EntityStore {
    let json = json!({
        "accounts": {
            "9999": { "name": "Car Dealership", "users": [3333] }
        },
        "audiences": {
            "1234": {
                "name": "Burlington Audience",
                "product": 4567,
                "size": 10000,
                "states": [1]
            },
            "3456": {
                "name": "Virginia Audience",
                "product": 9999,
                "size": 100,
                "counts": { "leads": 30, "invested": 4 },
                "states": [1, 2]
            }
        },
        "states": {
            "1": { "name": "building", "date": 5432 },
            "2": { "name": "build_requested", "date": 4321 }
        },
        "products": {
            "4567": { "name": "Solar", "account": 8910, "icon": "solar.svg" },
            "9999": { "name": "Cars", "account": 9999, "icon": "cars.svg" }
        },
        "users": {
            "3333": { "name": "Nick" },
            "4444": { "name": "Derek" },
            "5555": { "name": "Tristan" }
        },
        "files": {
            "f1": { "name": "leads.csv", "creator": 4444, "report": null }
        },
        "lists": {
            "7": { "name": "Q3 leads", "audience": 3456, "outsources": [70, 71] }
        },
        "outsources": {
            "70": { "vendor": 1, "list": 7 },
            "71": { "vendor": 2, "list": 7 }
        },
        "vendors": {
            "1": { "name": "Acme Leads", "settings": 1 }
        },
        "vendorSettings": {
            "1": { "daily_cap": 500 }
        }
    });

    EntityStore::from_json(json).expect("marketing seed is valid")
}
