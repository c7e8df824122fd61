
use crate::{
    model::{Column, Table},
    record::{FieldRead, FieldWrite, Record, RecordFields},
    registry::Registry,
    value::{SlotError, Value, ValueSlot},
};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// Field mapper: resolves, for every column of a record type, the concrete
/// field slot to read or write by walking the column's precomputed position
/// path. Find-or-register composition lives here, not in the registry.
///

/// Table metadata for `R`, registering it on first use.
pub fn table_of<R: Record>(registry: &Registry) -> Arc<Table> {
    registry
        .lookup::<R>()
        .unwrap_or_else(|| registry.register::<R>())
}

///
/// MapError
///
/// Recoverable read-mapping failures surfaced to decoders. Malformed
/// position paths are programmer errors and panic instead (see below).
///

#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MapError {
    #[error("unknown column: {column}")]
    UnknownColumn { column: String },

    #[error(transparent)]
    Slot(#[from] SlotError),
}

///
/// RowTarget
///
/// Object-safe column-name-to-field surface handed to session decoders:
/// enumerate the mapped columns, populate a leaf in place, or read its
/// current value.
///

pub trait RowTarget {
    fn columns(&self) -> &[Column];
    fn set(&mut self, column: &str, value: Value) -> Result<(), MapError>;
    fn get(&self, column: &str) -> Option<Value>;
}

///
/// ReadMap
///
/// Read mapping over one record instance: every column resolves to the
/// addressable leaf at its position path, so an external decoder can
/// populate the record in place. Addressability is static here — `set`
/// needs the `&mut` borrow taken at construction, `get` is the read-only
/// view.
///

pub struct ReadMap<'a> {
    record: &'a mut dyn RecordFields,
    table: Arc<Table>,
}

impl<'a> ReadMap<'a> {
    pub fn new<R: Record>(registry: &Registry, record: &'a mut R) -> Self {
        let table = table_of::<R>(registry);
        Self { record, table }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub(crate) fn table_handle(&self) -> Arc<Table> {
        Arc::clone(&self.table)
    }
}

impl RowTarget for ReadMap<'_> {
    fn columns(&self) -> &[Column] {
        &self.table.columns
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), MapError> {
        let col = self
            .table
            .column(column)
            .ok_or_else(|| MapError::UnknownColumn {
                column: column.to_string(),
            })?;

        write_leaf(self.record, &col.position).store(value)?;
        Ok(())
    }

    fn get(&self, column: &str) -> Option<Value> {
        let col = self.table.column(column)?;
        Some(read_leaf(self.record, &col.position))
    }
}

///
/// BoundRow
///
/// Write mapping over one record instance: current field values in column
/// order (for parameter binding) and by name (for introspection and tests),
/// plus the shared table metadata.
///

pub struct BoundRow {
    pub values: Vec<Value>,
    pub named: BTreeMap<String, Value>,
    pub table: Arc<Table>,
}

/// Read every column's current value from `record`, registering its type on
/// first use.
pub fn bind<R: Record>(registry: &Registry, record: &R) -> BoundRow {
    let table = table_of::<R>(registry);

    let mut values = Vec::with_capacity(table.columns.len());
    let mut named = BTreeMap::new();
    for col in &table.columns {
        let value = read_leaf(record, &col.position);
        named.insert(col.name.clone(), value.clone());
        values.push(value);
    }

    BoundRow {
        values,
        named,
        table,
    }
}

// Path walking. A position that does not resolve to a leaf is a mismatch
// between `Record::FIELDS` and the field accessors — a programmer error in
// the record implementation, so these abort rather than recover.

fn read_leaf(record: &dyn RecordFields, position: &[usize]) -> Value {
    let (last, steps) = position
        .split_last()
        .expect("column position must not be empty");

    let mut current = record;
    for &step in steps {
        current = match current.field(step) {
            FieldRead::Record(inner) => inner,
            FieldRead::Value(_) => bad_path(position, step, "an embedded record"),
        };
    }

    match current.field(*last) {
        FieldRead::Value(value) => value,
        FieldRead::Record(_) => bad_path(position, *last, "a leaf field"),
    }
}

fn write_leaf<'a>(
    record: &'a mut dyn RecordFields,
    position: &[usize],
) -> &'a mut dyn ValueSlot {
    let (last, steps) = position
        .split_last()
        .expect("column position must not be empty");

    let mut current = record;
    for &step in steps {
        current = match current.field_mut(step) {
            FieldWrite::Record(inner) => inner,
            FieldWrite::Slot(_) => bad_path(position, step, "an embedded record"),
        };
    }

    match current.field_mut(*last) {
        FieldWrite::Slot(slot) => slot,
        FieldWrite::Record(_) => bad_path(position, *last, "a leaf field"),
    }
}

#[cold]
fn bad_path(position: &[usize], index: usize, expected: &str) -> ! {
    panic!("column position {position:?} expects {expected} at field index {index}");
}
