//! Row structs.
//!
//! Each submodule holds a `FromRow` struct matching a table's columns and
//! the conversion into the corresponding `radiohub_core` type.

pub mod reaction;
pub mod statistics;
pub mod track;

use radiohub_core::error::CoreError;

/// A stored row the domain refuses to accept is a decode failure.
pub(crate) fn domain_decode_error(err: CoreError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}
