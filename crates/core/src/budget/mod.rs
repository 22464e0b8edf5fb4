//! Budget targets and shortfall tracking.

pub mod service;
pub mod types;


pub use service::BudgetService;
pub use types::{BudgetProgress, BudgetTarget, ProgressStatus};
