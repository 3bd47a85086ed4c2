// Air-quality dashboard data core
// Main library entry point

pub mod core;

// Re-export main types
pub use core::data_handle::handle_ws_fetch;
pub use core::dataset::Dataset;
pub use core::error::{AqError, Result};
pub use core::model::{MonthKey, MonthlyAggregate, TrendPoint};
