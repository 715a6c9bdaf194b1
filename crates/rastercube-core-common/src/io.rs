//! I/O boundary traits between driver resolution and reader implementations.
//!
//! This module defines what the resolution core sees of the surrounding
//! system: the two dataset fields that drive driver selection, the opaque
//! data-source object a reader hands back, and the uniform factory shape
//! shared by drivers and fallbacks.

use anyhow::Result;

/// A dataset as seen by driver resolution.
///
/// Only the two fields that select a reader are exposed here; the catalog's
/// full dataset representation lives outside this crate.
pub trait Dataset: Send + Sync {
    /// Protocol part of the dataset URI (e.g. `"s3"`, `"file"`).
    fn uri_scheme(&self) -> &str;

    /// Storage format of the dataset (e.g. `"GeoTIFF"`, `"NetCDF"`).
    fn format(&self) -> &str;
}

/// A reader for band data of one dataset.
///
/// Produced by a driver (or the configured fallback) once resolution has
/// picked an implementation. The reading API itself belongs to the
/// implementing crates; this core only constructs and hands back the object.
pub trait DataSource: Send + Sync {}

/// Constructor for [`DataSource`] values.
///
/// Both a driver's own constructor and a caller-supplied fallback are
/// expressed through this one trait, so resolution returns a single uniform
/// type no matter which side produced the factory.
pub trait DatasourceFactory: Send + Sync {
    /// Builds a data source reading `band_name` of `dataset`.
    ///
    /// # Errors
    ///
    /// Fails when the underlying reader cannot be constructed for this
    /// dataset.
    fn new_datasource(
        &self,
        dataset: &dyn Dataset,
        band_name: Option<&str>,
    ) -> Result<Box<dyn DataSource>>;
}
