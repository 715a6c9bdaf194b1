//! Process-wide reader resolution entry points.
//!
//! Ties the pieces together for the common case: drivers register into the
//! global table during startup, the first registry access builds the
//! process-wide [`ReaderRegistry`], and datasets are then resolved to data
//! sources through it. Applications that prefer explicit wiring can build
//! their own [`ReaderRegistry`]/[`OnceRegistry`](crate::registry::OnceRegistry)
//! instead of going through these functions.

use std::sync::{Arc, OnceLock};

use log::debug;
use rastercube_core_common::{DataSource, Dataset, DatasourceFactory, ReaderDriver};

use crate::error::{DriverError, Result};
use crate::loader::StaticDriverLoader;
use crate::registry::{OnceRegistry, ReaderRegistry};

/// Plugin group the process-wide registry is built from.
pub const READER_DRIVER_GROUP: &str = "rastercube.plugins.io.read";

static REGISTRY: OnceRegistry = OnceRegistry::new();
static DEFAULT_FACTORY: OnceLock<Arc<dyn DatasourceFactory>> = OnceLock::new();

/// Registers a reader driver with the process-wide registry.
///
/// Registration is a startup-time protocol: it must happen before the first
/// call to [`registry_instance`], because the registry is immutable once
/// built. The sealed check below is best-effort; a registration racing the
/// very first build is not part of the supported protocol.
///
/// # Errors
///
/// Returns [`DriverError::RegistrySealed`] when the registry has already
/// been built.
pub fn register_reader_driver(name: &str, driver: Arc<dyn ReaderDriver>) -> Result<()> {
    if REGISTRY.is_initialized() {
        return Err(DriverError::RegistrySealed {
            name: name.to_string(),
        });
    }
    StaticDriverLoader::global().register(READER_DRIVER_GROUP, name, driver);
    Ok(())
}

/// Configures the fallback datasource factory used when no driver matches.
///
/// The fallback is typically a generic raster reader supplied by the
/// application, letting resolution degrade gracefully instead of refusing
/// datasets no specialized driver claims.
///
/// # Errors
///
/// Returns [`DriverError::DefaultFactoryAlreadySet`] on a second call.
pub fn set_default_datasource_factory(factory: Arc<dyn DatasourceFactory>) -> Result<()> {
    DEFAULT_FACTORY
        .set(factory)
        .map_err(|_| DriverError::DefaultFactoryAlreadySet)
}

fn default_datasource_factory() -> Option<Arc<dyn DatasourceFactory>> {
    DEFAULT_FACTORY.get().cloned()
}

/// The process-wide reader registry, built on first access.
///
/// Repeated calls, from any number of threads, return the same instance and
/// run driver loading exactly once.
///
/// # Errors
///
/// Propagates a driver discovery failure. The failure is not cached; the
/// next call retries construction.
pub fn registry_instance() -> Result<&'static ReaderRegistry> {
    REGISTRY.get_or_build(StaticDriverLoader::global(), READER_DRIVER_GROUP)
}

/// Names of all loaded reader drivers, in registration order.
///
/// Diagnostic enumeration only.
///
/// # Errors
///
/// Fails when the registry cannot be built.
pub fn list_driver_names() -> Result<Vec<String>> {
    Ok(registry_instance()?.driver_names())
}

/// Picks the datasource factory for `dataset`.
///
/// Resolution uses the dataset's URI scheme and format, with the configured
/// default factory as fallback. `Ok(None)` means no driver matched and no
/// default factory is configured.
///
/// # Errors
///
/// Fails when the registry cannot be built.
pub fn choose_datasource_factory(
    dataset: &dyn Dataset,
) -> Result<Option<Arc<dyn DatasourceFactory>>> {
    let registry = registry_instance()?;
    Ok(registry.resolve(
        dataset.uri_scheme(),
        dataset.format(),
        default_datasource_factory(),
    ))
}

/// Constructs a data source reading `band_name` of `dataset`.
///
/// All bands of a dataset are assumed to load through the same
/// implementation: resolution runs once per dataset and the band only
/// parameterizes the chosen factory. `Ok(None)` means neither a driver nor
/// a fallback factory was available for the dataset.
///
/// # Errors
///
/// Fails when the registry cannot be built or the chosen factory cannot
/// construct the reader.
pub fn new_datasource(
    dataset: &dyn Dataset,
    band_name: Option<&str>,
) -> anyhow::Result<Option<Box<dyn DataSource>>> {
    let Some(factory) = choose_datasource_factory(dataset)? else {
        debug!(
            "no datasource factory for {}/{}",
            dataset.uri_scheme(),
            dataset.format()
        );
        return Ok(None);
    };
    let source = factory.new_datasource(dataset, band_name)?;
    Ok(Some(source))
}
