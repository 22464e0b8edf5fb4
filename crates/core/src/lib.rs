//! Core aggregation logic for Tally.
//!
//! This crate contains pure computation with no I/O. Callers hand it an
//! immutable snapshot of records and budgets and get summaries back.
//!
//! # Modules
//!
//! - `ledger` - Records, classification, and input validation
//! - `currency` - Two-currency pair convention and conversion
//! - `budget` - Budget targets and shortfall tracking
//! - `aggregate` - Dashboard, entity, and category summaries

pub mod aggregate;
pub mod budget;
pub mod currency;
pub mod ledger;
