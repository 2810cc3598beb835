//! Read-only entity store snapshots.
//!
//! The store is plain nested data, `{ type: { id: record } }`, handed in by
//! whatever state container owns it. The engine only ever reads from it.

#[cfg(test)]
mod tests;

use crate::{
    key::EntityKey,
    value::{Record, Value},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Errors returned while decoding an external snapshot into an `EntityStore`.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("entity store snapshot must be an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("entity table '{entity}' must be an object, found {found}")]
    TableNotAnObject {
        entity: String,
        found: &'static str,
    },

    #[error("row '{entity}/{id}' must be an object, found {found}")]
    RowNotAnObject {
        entity: String,
        id: String,
        found: &'static str,
    },

    #[error("entity store decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

///
/// EntityTable
/// All rows of one entity type, keyed by canonical id.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityTable {
    rows: BTreeMap<EntityKey, Record>,
}

impl EntityTable {
    #[must_use]
    pub fn get(&self, key: &EntityKey) -> Option<&Record> {
        self.rows.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Ids in store enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &EntityKey> {
        self.rows.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &Record)> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

///
/// EntityStore
///
/// Immutable snapshot handed to the engine.
/// Tables are keyed by entity type name, rows by `EntityKey`.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityStore {
    tables: BTreeMap<String, EntityTable>,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) one row; builder-style for fixtures and adapters.
    #[must_use]
    pub fn with_row(
        mut self,
        entity: impl Into<String>,
        id: impl Into<EntityKey>,
        record: Record,
    ) -> Self {
        self.insert(entity, id, record);
        self
    }

    /// Insert (or replace) one row.
    pub fn insert(&mut self, entity: impl Into<String>, id: impl Into<EntityKey>, record: Record) {
        self.tables
            .entry(entity.into())
            .or_default()
            .rows
            .insert(id.into(), record);
    }

    #[must_use]
    pub fn table(&self, entity: &str) -> Option<&EntityTable> {
        self.tables.get(entity)
    }

    #[must_use]
    pub fn get(&self, entity: &str, key: &EntityKey) -> Option<&Record> {
        self.table(entity).and_then(|table| table.get(key))
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Total row count across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.values().map(EntityTable::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(EntityTable::is_empty)
    }

    /// Decode a JSON snapshot shaped `{ type: { id: record } }`.
    pub fn from_json(json: serde_json::Value) -> Result<Self, StoreError> {
        Self::from_value(Value::from(json))
    }

    /// Decode a JSON snapshot from text.
    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        let json: serde_json::Value = serde_json::from_str(text)?;

        Self::from_json(json)
    }

    /// Decode a snapshot already held as a `Value`.
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        let Value::Map(tables) = value else {
            return Err(StoreError::NotAnObject {
                found: value.kind_label(),
            });
        };

        let mut store = Self::new();
        for (entity, table) in tables {
            let Value::Map(rows) = table else {
                return Err(StoreError::TableNotAnObject {
                    entity,
                    found: table.kind_label(),
                });
            };

            let decoded = store.tables.entry(entity.clone()).or_default();
            for (id, row) in rows {
                let Value::Map(record) = row else {
                    return Err(StoreError::RowNotAnObject {
                        entity,
                        id,
                        found: row.kind_label(),
                    });
                };
                decoded.rows.insert(EntityKey::new(id), record);
            }
        }

        Ok(store)
    }
}

impl<'de> Deserialize<'de> for EntityStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
