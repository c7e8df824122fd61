use crate::{
    model::FieldSpec,
    value::{Value, ValueSlot},
};

///
/// Record
///
/// Contract between structured record types and the registry/mapper.
///
/// A record declares its type name (the default table name), its fields in
/// declaration order, and indexed access to each field: either a leaf value
/// slot or a nested embedded record. The registry derives `Table` metadata
/// from `FIELDS` once per type; mappers then walk precomputed column
/// positions through `field`/`field_mut` without any runtime introspection.
///

pub trait Record: 'static {
    /// Declared type name; the default table name when no field overrides it.
    const TYPE_NAME: &'static str;

    /// Per-field descriptors, in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Read access to the field at `index`.
    fn field(&self, index: usize) -> FieldRead<'_>;

    /// Write access to the field at `index`.
    fn field_mut(&mut self, index: usize) -> FieldWrite<'_>;
}

///
/// RecordFields
///
/// Object-safe companion to `Record`, so path walking can step through
/// embedded records without generics at each hop. Blanket-implemented for
/// every `Record`.
///

pub trait RecordFields {
    fn field(&self, index: usize) -> FieldRead<'_>;
    fn field_mut(&mut self, index: usize) -> FieldWrite<'_>;
}

impl<R: Record> RecordFields for R {
    fn field(&self, index: usize) -> FieldRead<'_> {
        Record::field(self, index)
    }

    fn field_mut(&mut self, index: usize) -> FieldWrite<'_> {
        Record::field_mut(self, index)
    }
}

///
/// FieldRead
///
/// One step of a read-side path walk: a leaf's current value, or the
/// embedded record to descend into.
///

pub enum FieldRead<'a> {
    Value(Value),
    Record(&'a dyn RecordFields),
}

///
/// FieldWrite
///
/// Write-side counterpart: an addressable leaf slot, or the embedded
/// record to descend into.
///

pub enum FieldWrite<'a> {
    Slot(&'a mut dyn ValueSlot),
    Record(&'a mut dyn RecordFields),
}

/// A field index outside the declared range is a programmer error in the
/// `Record` implementation, not a runtime condition to recover from.
#[cold]
pub fn bad_field_index(type_name: &str, index: usize) -> ! {
    panic!("record {type_name} has no field at index {index}");
}
