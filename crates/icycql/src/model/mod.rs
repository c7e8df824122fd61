mod field;


pub use field::{EmbeddedHook, FieldSpec};

use serde::{Deserialize, Serialize};

///
/// Table
///
/// Durable metadata for one record type: storage table name, primary key
/// columns, and the declaration-ordered column list (embedded columns are
/// spliced in at the embedding field's position).
///
/// Derived once per type by the registry; statements and mappers share it
/// behind an `Arc`.
///

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub key_columns: Vec<String>,
    pub columns: Vec<Column>,
}

impl Table {
    /// Bare table for string-addressed statements; no column metadata.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_columns: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Comma-joined column list, as rendered into INSERT statements.
    #[must_use]
    pub fn column_names(&self) -> String {
        self.columns
            .iter()
            .map(|col| col.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }
}

///
/// Column
///
/// One mapped field. `position` is the precomputed field-access path from
/// the record root to the leaf: length 1 for a direct field, longer when
/// the leaf lives inside embedded sub-records.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub position: Vec<usize>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}
