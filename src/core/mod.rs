pub mod compression;
pub mod constants;
pub mod data_handle;
pub mod dataset;
pub mod detail;
pub mod error;
pub mod map;
pub mod model;
pub mod trend;
