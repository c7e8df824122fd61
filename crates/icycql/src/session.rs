use crate::{
    error::SessionError,
    mapper::RowTarget,
    value::{Value, ValueSlot},
};

///
/// Session
///
/// Boundary collaborator that actually executes CQL. This core renders a
/// (query string, ordered arguments) pair and hands it over; connection
/// management, wire marshaling, retries, and timeouts all live behind this
/// seam. Tests drive statements through an in-memory fake.
///

pub trait Session {
    type Query: QueryHandle;

    /// Produce an executable handle for one rendered statement.
    fn query(&self, cql: String, args: Vec<Value>) -> Self::Query;
}

///
/// QueryHandle
///
/// One-shot executable handle. Each terminal consumes the handle.
///

pub trait QueryHandle {
    type Rows: RowCursor;

    /// Execute without decoding any result rows.
    fn exec(self) -> Result<(), SessionError>;

    /// Decode the first result row positionally into `targets`.
    fn scan(self, targets: &mut [&mut dyn ValueSlot]) -> Result<(), SessionError>;

    /// Decode the first result row by column name into `target`.
    fn map_scan(self, target: &mut dyn RowTarget) -> Result<(), SessionError>;

    /// Execute and return a row cursor.
    fn rows(self) -> Result<Self::Rows, SessionError>;
}

///
/// RowCursor
///
/// Lazy, forward-only, single-pass iteration over result rows.
///

pub trait RowCursor {
    /// Decode the next row into `target`; `Ok(false)` when exhausted.
    fn fetch_next(&mut self, target: &mut dyn RowTarget) -> Result<bool, SessionError>;
}
