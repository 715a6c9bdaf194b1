//! Error types for driver resolution.
//!
//! This module provides structured error handling using `thiserror`. Only
//! registry-construction problems are errors; a missing driver for a
//! `(protocol, format)` pair is an expected outcome and modeled as an
//! absence, never as an error.

use thiserror::Error;

/// Errors raised while building or configuring the reader registry.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Driver discovery failed while building the registry.
    ///
    /// Fatal to construction and never cached: a later access retries the
    /// build from scratch.
    #[error("failed to load reader drivers for group '{group}'")]
    Discovery {
        /// The plugin group that was being loaded
        group: String,
        /// The underlying discovery failure
        #[source]
        source: anyhow::Error,
    },

    /// The loader returned two drivers under the same name.
    #[error("duplicate reader driver name '{name}'")]
    DuplicateDriver {
        /// The name claimed twice
        name: String,
    },

    /// A driver registration arrived after the registry was built.
    ///
    /// The registry is immutable once constructed; drivers must be
    /// registered during startup, before the first registry access.
    #[error("reader driver '{name}' registered after the registry was built")]
    RegistrySealed {
        /// The name of the late registration
        name: String,
    },

    /// The process-wide fallback datasource factory was configured twice.
    #[error("default datasource factory is already configured")]
    DefaultFactoryAlreadySet,
}

/// Type alias for Results using [`DriverError`].
pub type Result<T> = std::result::Result<T, DriverError>;
