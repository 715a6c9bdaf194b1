//! Common traits shared across `rastercube` crates.
//!
//! This crate provides the interface boundary between the driver-resolution
//! core (`rastercube-core`) and external reader-driver crates, preventing
//! circular dependencies: driver implementations depend only on these traits.

pub mod drivers;
pub mod io;

// Re-export commonly used types
pub use drivers::{DriverEntry, DriverLoader, ReaderDriver};
pub use io::{DataSource, Dataset, DatasourceFactory};
