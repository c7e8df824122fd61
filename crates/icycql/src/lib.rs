//! Core runtime for IcyCQL: record traits, table metadata, field mapping,
//! and the statement builder for a minimal CQL dialect.
//!
//! Execution is delegated to an external [`session::Session`] collaborator;
//! nothing in this crate performs I/O.
#![warn(unreachable_pub)]

pub mod error;
pub mod mapper;
pub mod model;
pub mod query;
pub mod record;
pub mod registry;
pub mod session;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary only; session seams and error internals stay at their
/// module paths.
///

pub mod prelude {
    pub use crate::{
        model::{Column, FieldSpec, Table},
        query::{Command, Condition, OrderBy, Statement, asc, desc, eq, ge, gt, is_in, le, lt},
        record::{FieldRead, FieldWrite, Record},
        registry::Registry,
        value::Value,
    };
}
