//! End-to-end resolution through the process-wide registry.
//!
//! Global registry state is process-wide, so the whole flow runs in a single
//! test function: registration, sealing, resolution with and without a
//! matching driver, and end-to-end datasource construction.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rastercube_core::{
    DriverError, choose_datasource_factory, list_driver_names, new_datasource,
    register_reader_driver, set_default_datasource_factory,
};
use rastercube_core_common::{DataSource, Dataset, DatasourceFactory, ReaderDriver};

struct TestSource;
impl DataSource for TestSource {}

struct TestDataset {
    scheme: &'static str,
    format: &'static str,
}

impl Dataset for TestDataset {
    fn uri_scheme(&self) -> &str {
        self.scheme
    }

    fn format(&self) -> &str {
        self.format
    }
}

struct CogDriver {
    constructed: AtomicUsize,
}

impl ReaderDriver for CogDriver {
    fn protocols(&self) -> Vec<String> {
        vec!["s3".into()]
    }

    fn formats(&self) -> Vec<String> {
        vec!["cog".into()]
    }

    fn new_datasource(
        &self,
        _dataset: &dyn Dataset,
        _band_name: Option<&str>,
    ) -> anyhow::Result<Box<dyn DataSource>> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TestSource))
    }
}

struct DefaultFactory {
    constructed: AtomicUsize,
}

impl DatasourceFactory for DefaultFactory {
    fn new_datasource(
        &self,
        _dataset: &dyn Dataset,
        _band_name: Option<&str>,
    ) -> anyhow::Result<Box<dyn DataSource>> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TestSource))
    }
}

#[test]
fn resolves_datasets_end_to_end() {
    let driver = Arc::new(CogDriver {
        constructed: AtomicUsize::new(0),
    });
    let fallback = Arc::new(DefaultFactory {
        constructed: AtomicUsize::new(0),
    });

    register_reader_driver("cog", driver.clone()).unwrap();
    set_default_datasource_factory(fallback.clone()).unwrap();

    assert_eq!(list_driver_names().unwrap(), vec!["cog".to_string()]);

    // exact driver match, case-insensitive
    let s3_cog = TestDataset {
        scheme: "S3",
        format: "COG",
    };
    let source = new_datasource(&s3_cog, Some("red")).unwrap();
    assert!(source.is_some());
    assert_eq!(driver.constructed.load(Ordering::SeqCst), 1);
    assert_eq!(fallback.constructed.load(Ordering::SeqCst), 0);

    // no driver for file/cog, the configured default takes over
    let file_cog = TestDataset {
        scheme: "file",
        format: "cog",
    };
    let factory = choose_datasource_factory(&file_cog).unwrap().unwrap();
    let fallback_factory: Arc<dyn DatasourceFactory> = fallback.clone();
    assert!(Arc::ptr_eq(&factory, &fallback_factory));

    let source = new_datasource(&file_cog, None).unwrap();
    assert!(source.is_some());
    assert_eq!(driver.constructed.load(Ordering::SeqCst), 1);
    assert_eq!(fallback.constructed.load(Ordering::SeqCst), 1);

    // the registry is sealed after its first access
    let late = Arc::new(CogDriver {
        constructed: AtomicUsize::new(0),
    });
    assert!(matches!(
        register_reader_driver("late", late),
        Err(DriverError::RegistrySealed { name }) if name == "late"
    ));
    assert_eq!(list_driver_names().unwrap(), vec!["cog".to_string()]);

    // the default factory is configured once
    let second = Arc::new(DefaultFactory {
        constructed: AtomicUsize::new(0),
    });
    assert!(matches!(
        set_default_datasource_factory(second),
        Err(DriverError::DefaultFactoryAlreadySet)
    ));
}
