//! Configuration-driven driver loader.
//!
//! Drivers announce themselves through explicit registration calls instead
//! of runtime plugin introspection. The loader is then just a snapshot of
//! the registration table for one plugin group, taken when the registry is
//! built.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use log::debug;
use rastercube_core_common::{DriverEntry, DriverLoader, ReaderDriver};

struct Registration {
    group: String,
    name: String,
    driver: Arc<dyn ReaderDriver>,
}

/// Driver loader backed by an explicit registration table.
///
/// Registration order is preserved: it is the order drivers are handed to
/// the registry, which decides both enumeration order and which driver wins
/// an overlapping `(protocol, format)` claim.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use anyhow::Result;
/// use rastercube_core::StaticDriverLoader;
/// use rastercube_core_common::{DataSource, Dataset, DriverLoader, ReaderDriver};
///
/// struct CogDriver;
///
/// impl ReaderDriver for CogDriver {
///     fn protocols(&self) -> Vec<String> {
///         vec!["s3".into()]
///     }
///     fn formats(&self) -> Vec<String> {
///         vec!["cog".into()]
///     }
///     fn new_datasource(
///         &self,
///         _dataset: &dyn Dataset,
///         _band_name: Option<&str>,
///     ) -> Result<Box<dyn DataSource>> {
///         anyhow::bail!("example driver does not read")
///     }
/// }
///
/// let loader = StaticDriverLoader::new();
/// loader.register("demo.io.read", "cog", Arc::new(CogDriver));
///
/// let drivers = loader.load("demo.io.read")?;
/// assert_eq!(drivers.len(), 1);
/// assert_eq!(drivers[0].0, "cog");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct StaticDriverLoader {
    entries: Mutex<Vec<Registration>>,
}

impl StaticDriverLoader {
    /// Creates an empty registration table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// The registration table behind the process-wide registry.
    #[must_use]
    pub fn global() -> &'static StaticDriverLoader {
        static GLOBAL: StaticDriverLoader = StaticDriverLoader::new();
        &GLOBAL
    }

    /// Records `driver` under `group`.
    pub fn register(&self, group: &str, name: &str, driver: Arc<dyn ReaderDriver>) {
        debug!("registering reader driver '{name}' in group '{group}'");
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push(Registration {
            group: group.to_string(),
            name: name.to_string(),
            driver,
        });
    }
}

impl DriverLoader for StaticDriverLoader {
    fn load(&self, group: &str) -> Result<Vec<DriverEntry>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .iter()
            .filter(|r| r.group == group)
            .map(|r| (r.name.clone(), Arc::clone(&r.driver)))
            .collect())
    }
}

impl Default for StaticDriverLoader {
    fn default() -> Self {
        Self::new()
    }
}
