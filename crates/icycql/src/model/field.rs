use crate::{model::Table, registry::Registry};
use std::sync::Arc;

/// Registration hook for embedded records: resolves (or derives) the
/// embedded type's table so its columns can be spliced into the enclosing
/// table. Usually `mapper::table_of::<Embedded>`.
pub type EmbeddedHook = fn(&Registry) -> Arc<Table>;

///
/// FieldSpec
///
/// Declarative per-field descriptor, listed in declaration order in
/// `Record::FIELDS`. Replaces annotation strings with explicit const
/// builder calls; precedence and defaults during derivation are:
///
/// - column name: `column` override, else the lowercased field name
/// - `skip` omits the field from columns and mapping entirely
/// - `table` overrides the running table name (last field wins)
/// - `key` is a comma-separated column list replacing any derived key set
/// - `embedded` splices the sub-record's columns at this field's position
///

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub column: Option<&'static str>,
    pub table: Option<&'static str>,
    pub key: Option<&'static str>,
    pub skip: bool,
    pub embedded: Option<EmbeddedHook>,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            column: None,
            table: None,
            key: None,
            skip: false,
            embedded: None,
        }
    }

    /// Override the storage column name for this field.
    #[must_use]
    pub const fn column(mut self, name: &'static str) -> Self {
        self.column = Some(name);
        self
    }

    /// Override the table name for the whole record.
    #[must_use]
    pub const fn table(mut self, name: &'static str) -> Self {
        self.table = Some(name);
        self
    }

    /// Declare the primary key columns, comma-separated for composite keys.
    #[must_use]
    pub const fn key(mut self, columns: &'static str) -> Self {
        self.key = Some(columns);
        self
    }

    /// Omit this field: no column, invisible to mapping and statements.
    #[must_use]
    pub const fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Mark this field as an embedded sub-record.
    #[must_use]
    pub const fn embedded(mut self, hook: EmbeddedHook) -> Self {
        self.embedded = Some(hook);
        self
    }
}
