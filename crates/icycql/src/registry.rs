use crate::{
    model::{Column, Table},
    record::Record,
};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, RwLock},
};

///
/// Registry
///
/// Type-to-table cache: derives `Table` metadata once per record type and
/// serves it to mappers and statements. Explicit object with a controlled
/// lifecycle; tests instantiate a fresh registry instead of clearing shared
/// state.
///
/// Concurrency: a single reader/writer lock shields lookup and store.
/// Racing registrations for a first-seen type may compute metadata twice,
/// but metadata is a pure function of the type, so last-write-wins stores
/// an equivalent result.
///

#[derive(Debug, Default)]
pub struct Registry {
    tables: RwLock<HashMap<TypeId, Arc<Table>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure cache probe; never computes metadata.
    #[must_use]
    pub fn lookup<R: Record>(&self) -> Option<Arc<Table>> {
        self.tables
            .read()
            .expect("table registry lock poisoned")
            .get(&TypeId::of::<R>())
            .cloned()
    }

    /// Derive metadata for `R` and store it, overwriting any previous entry.
    ///
    /// Find-or-register composition lives in `mapper::table_of`; this always
    /// recomputes.
    pub fn register<R: Record>(&self) -> Arc<Table> {
        let table = Arc::new(self.derive::<R>());
        self.tables
            .write()
            .expect("table registry lock poisoned")
            .insert(TypeId::of::<R>(), Arc::clone(&table));
        table
    }

    /// Reset the cache to empty. Test isolation only; must not race other
    /// registrations.
    pub fn clear(&self) {
        self.tables
            .write()
            .expect("table registry lock poisoned")
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .expect("table registry lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Metadata derivation, executed once per type (modulo benign races):
    // scan declared fields in order, splicing embedded columns, applying
    // table/key overrides, and defaulting the key to the first column.
    fn derive<R: Record>(&self) -> Table {
        let mut table = Table::named(R::TYPE_NAME);
        // The type-name default does not count as a declaration; the first
        // embedded record may still lend its name.
        let mut named = false;

        for (index, field) in R::FIELDS.iter().enumerate() {
            if let Some(resolve) = field.embedded {
                let inner = resolve(self);

                // Embedded identity yields to anything the enclosing type
                // has already declared or adopted.
                if !named && !inner.name.is_empty() {
                    table.name.clone_from(&inner.name);
                    named = true;
                }
                if !inner.key_columns.is_empty() && table.key_columns.is_empty() {
                    table.key_columns.clone_from(&inner.key_columns);
                }
                for col in &inner.columns {
                    let mut position = Vec::with_capacity(col.position.len() + 1);
                    position.push(index);
                    position.extend_from_slice(&col.position);
                    table.columns.push(Column::new(col.name.clone(), position));
                }
            }

            // Last field to declare a table name wins.
            if let Some(name) = field.table {
                table.name = name.to_string();
                named = true;
            }

            // An explicit key list replaces anything derived so far.
            if let Some(keys) = field.key {
                table.key_columns = keys.split(',').map(str::to_string).collect();
            }

            if field.skip || field.embedded.is_some() {
                continue;
            }

            let name = field
                .column
                .map_or_else(|| field.name.to_lowercase(), str::to_string);
            table.columns.push(Column::new(name, vec![index]));
        }

        // No explicit key: the first column is implicitly the key.
        if table.key_columns.is_empty()
            && let Some(first) = table.columns.first()
        {
            table.key_columns.push(first.name.clone());
        }

        table
    }
}
