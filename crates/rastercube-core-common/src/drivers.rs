//! Reader-driver capability interface and the loader that enumerates drivers.
//!
//! A driver declares the URI schemes and storage formats it can handle and
//! constructs data sources for matching datasets. Drivers reach the registry
//! through a [`DriverLoader`], which enumerates the drivers registered under
//! a plugin group.

use std::sync::Arc;

use anyhow::Result;

use crate::io::{DataSource, Dataset};

/// A pluggable reader driver.
///
/// The declared protocol and format lists are candidate sets only;
/// [`supports`](ReaderDriver::supports) has the final say for any specific
/// combination. All comparisons against these declarations are
/// case-insensitive.
pub trait ReaderDriver: Send + Sync {
    /// URI schemes this driver can read from.
    fn protocols(&self) -> Vec<String>;

    /// Storage formats this driver understands.
    fn formats(&self) -> Vec<String>;

    /// Whether this driver handles the exact `(protocol, format)` pair.
    ///
    /// Defaults to accepting the whole declared cross product.
    fn supports(&self, protocol: &str, format: &str) -> bool {
        let _ = (protocol, format);
        true
    }

    /// Constructs a data source reading `band_name` of `dataset`.
    ///
    /// # Errors
    ///
    /// Fails when the reader cannot be constructed for this dataset.
    fn new_datasource(
        &self,
        dataset: &dyn Dataset,
        band_name: Option<&str>,
    ) -> Result<Box<dyn DataSource>>;
}

/// A named driver as produced by a [`DriverLoader`].
pub type DriverEntry = (String, Arc<dyn ReaderDriver>);

/// Source of reader drivers for a plugin group.
///
/// Implementations enumerate the drivers registered under `group` in
/// whatever way suits the deployment (a static table, configuration, ...).
/// The registry calls `load` exactly once per construction.
pub trait DriverLoader: Send + Sync {
    /// Returns `(name, driver)` pairs for `group`.
    ///
    /// The order of the returned pairs is preserved by the registry for
    /// enumeration and for resolving overlapping driver claims.
    ///
    /// # Errors
    ///
    /// Fails when the drivers for `group` cannot be enumerated.
    fn load(&self, group: &str) -> Result<Vec<DriverEntry>>;
}
