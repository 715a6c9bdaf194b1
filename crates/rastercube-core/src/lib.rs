//! `rastercube-core` resolves which reader implementation loads a dataset's
//! pixel data, based on the dataset's URI scheme and storage format.
//!
//! It sits between a dataset catalog and pluggable format drivers (readers
//! for cloud-optimized rasters, HDF, network-backed stores, ...):
//! - **Loader** ([`StaticDriverLoader`]): an explicit registration table of
//!   drivers, grouped by plugin group.
//! - **Registry** ([`ReaderRegistry`]): an immutable index from lower-cased
//!   `(protocol, format)` pairs to drivers, built once per process by
//!   [`OnceRegistry`].
//! - **Resolver**: [`ReaderRegistry::resolve`] answers every lookup, falling
//!   back to a caller-supplied default factory when no driver matches.
//! - **Construction**: [`new_datasource`] invokes the resolved factory for
//!   one band of a dataset.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use anyhow::Result;
//! use rastercube_core::{ReaderRegistry, StaticDriverLoader};
//! use rastercube_core_common::{DataSource, Dataset, ReaderDriver};
//!
//! struct CogDriver;
//!
//! impl ReaderDriver for CogDriver {
//!     fn protocols(&self) -> Vec<String> {
//!         vec!["s3".into()]
//!     }
//!     fn formats(&self) -> Vec<String> {
//!         vec!["cog".into()]
//!     }
//!     fn new_datasource(
//!         &self,
//!         _dataset: &dyn Dataset,
//!         _band_name: Option<&str>,
//!     ) -> Result<Box<dyn DataSource>> {
//!         anyhow::bail!("example driver does not read")
//!     }
//! }
//!
//! let loader = StaticDriverLoader::new();
//! loader.register("demo.io.read", "cog", Arc::new(CogDriver));
//!
//! let registry = ReaderRegistry::from_loader(&loader, "demo.io.read")?;
//! assert!(registry.lookup("S3", "COG").is_some());
//! assert!(registry.lookup("file", "cog").is_none());
//! assert_eq!(registry.driver_names(), vec!["cog".to_string()]);
//! # Ok::<(), rastercube_core::DriverError>(())
//! ```

pub mod error;
pub mod loader;
pub mod readers;
pub mod registry;

pub use error::DriverError;
pub use loader::StaticDriverLoader;
pub use readers::{
    READER_DRIVER_GROUP, choose_datasource_factory, list_driver_names, new_datasource,
    register_reader_driver, registry_instance, set_default_datasource_factory,
};
pub use registry::{OnceRegistry, ReaderRegistry};
