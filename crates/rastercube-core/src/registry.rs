//! Reader-driver registry: lookup-table construction, resolution, and the
//! once-only cache guarding first access.
//!
//! The registry is built exactly once from a [`DriverLoader`] and is
//! immutable afterwards, so concurrent lookups need no synchronization.
//! Resolution is total: an unknown `(protocol, format)` pair is answered
//! with the caller's fallback, never with an error.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::debug;
use rastercube_core_common::{
    DataSource, Dataset, DatasourceFactory, DriverEntry, DriverLoader, ReaderDriver,
};

use crate::error::{DriverError, Result};

/// Key into the lookup table: lower-cased `(protocol, format)`.
type LookupKey = (String, String);

fn lookup_key(protocol: &str, format: &str) -> LookupKey {
    (protocol.to_lowercase(), format.to_lowercase())
}

/// Adapts a resolved driver to the uniform factory type returned by
/// [`ReaderRegistry::resolve`].
struct DriverFactory(Arc<dyn ReaderDriver>);

impl DatasourceFactory for DriverFactory {
    fn new_datasource(
        &self,
        dataset: &dyn Dataset,
        band_name: Option<&str>,
    ) -> anyhow::Result<Box<dyn DataSource>> {
        self.0.new_datasource(dataset, band_name)
    }
}

/// Expands every driver's declared protocol x format space into lookup keys.
///
/// Only combinations the driver's `supports` predicate accepts are inserted;
/// the declared lists are candidate sets, the predicate is authoritative.
/// When two drivers claim the same key the later entry wins, following the
/// loader's order. No priority scheme is implied by this.
fn build_lookup(drivers: &[DriverEntry]) -> HashMap<LookupKey, Arc<dyn ReaderDriver>> {
    let mut lookup: HashMap<LookupKey, Arc<dyn ReaderDriver>> = HashMap::new();
    for (name, driver) in drivers {
        let formats = driver.formats();
        for protocol in driver.protocols() {
            for format in &formats {
                if driver.supports(&protocol, format) {
                    let key = lookup_key(&protocol, format);
                    if lookup.insert(key, Arc::clone(driver)).is_some() {
                        debug!(
                            "reader driver '{name}' shadows an earlier driver for \
                             {protocol}/{format}"
                        );
                    }
                }
            }
        }
    }
    lookup
}

/// Immutable index of reader drivers by `(protocol, format)`.
///
/// Holds the loader-ordered driver list for enumeration plus the derived
/// lookup table used for resolution.
pub struct ReaderRegistry {
    drivers: Vec<DriverEntry>,
    lookup: HashMap<LookupKey, Arc<dyn ReaderDriver>>,
}

impl std::fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field(
                "drivers",
                &self.drivers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl ReaderRegistry {
    /// Builds a registry by running `loader` for `group`.
    ///
    /// The loader is invoked exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Discovery`] when the loader fails, and
    /// [`DriverError::DuplicateDriver`] when it yields the same driver name
    /// twice.
    pub fn from_loader(loader: &dyn DriverLoader, group: &str) -> Result<Self> {
        let drivers = loader
            .load(group)
            .map_err(|source| DriverError::Discovery {
                group: group.to_string(),
                source,
            })?;

        let mut seen = HashSet::new();
        for (name, _) in &drivers {
            if !seen.insert(name.as_str()) {
                return Err(DriverError::DuplicateDriver { name: name.clone() });
            }
        }

        let lookup = build_lookup(&drivers);
        debug!(
            "built reader registry for group '{group}': {} driver(s), {} lookup key(s)",
            drivers.len(),
            lookup.len()
        );
        Ok(Self { drivers, lookup })
    }

    /// Looks up the driver registered for `(protocol, format)`.
    ///
    /// Comparison is case-insensitive. A missing key is an expected outcome
    /// and yields `None`.
    #[must_use]
    pub fn lookup(&self, protocol: &str, format: &str) -> Option<&Arc<dyn ReaderDriver>> {
        self.lookup.get(&lookup_key(protocol, format))
    }

    /// Names of all loaded drivers, in the loader's order.
    ///
    /// Diagnostic enumeration only; resolution goes through
    /// [`lookup`](Self::lookup).
    #[must_use]
    pub fn driver_names(&self) -> Vec<String> {
        self.drivers.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Resolves `(protocol, format)` to a datasource factory.
    ///
    /// Returns the matching driver's constructor, or `fallback` unmodified
    /// when no driver is registered for the combination. Total over its
    /// inputs: an unknown combination yields the fallback, never an error.
    #[must_use]
    pub fn resolve(
        &self,
        protocol: &str,
        format: &str,
        fallback: Option<Arc<dyn DatasourceFactory>>,
    ) -> Option<Arc<dyn DatasourceFactory>> {
        match self.lookup(protocol, format) {
            Some(driver) => Some(Arc::new(DriverFactory(Arc::clone(driver)))),
            None => {
                debug!("no reader driver for {protocol}/{format}, using fallback");
                fallback
            },
        }
    }
}

/// One-shot, thread-safe container for a [`ReaderRegistry`].
///
/// First access builds the registry; every later access returns the same
/// instance without taking the build lock. A failed build is not cached, so
/// a subsequent call retries construction.
///
/// The process-wide registry lives in one of these, but composition roots
/// can also own their own instance and inject it where resolution is needed.
pub struct OnceRegistry {
    cell: OnceLock<ReaderRegistry>,
    build: Mutex<()>,
}

impl OnceRegistry {
    /// Creates an empty, not-yet-built cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            build: Mutex::new(()),
        }
    }

    /// Whether the registry has been built.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns the registry, building it from `loader` on first call.
    ///
    /// The build runs under a lock and at most once: concurrent first
    /// callers block until one of them has published the registry, then all
    /// observe the same instance. The initialized fast path takes no lock.
    ///
    /// # Errors
    ///
    /// Propagates the build failure; nothing is cached in that case.
    pub fn get_or_build(&self, loader: &dyn DriverLoader, group: &str) -> Result<&ReaderRegistry> {
        if let Some(registry) = self.cell.get() {
            return Ok(registry);
        }
        let _guard = self.build.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(registry) = self.cell.get() {
            return Ok(registry);
        }
        let registry = ReaderRegistry::from_loader(loader, group)?;
        Ok(self.cell.get_or_init(|| registry))
    }
}

impl Default for OnceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
