//! Financial records and their validation.
//!
//! This module implements:
//! - Records (inflows, outflows, transfers) with native/settlement currency
//! - Classification into summary buckets
//! - Snapshot input validation

pub mod record;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use record::{Bucket, EntityRef, Record, RecordKind};
pub use validation::{InvalidInputError, validate_record};
