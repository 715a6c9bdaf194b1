//! Identity of the process-wide registry under concurrent first access.

use std::sync::Arc;
use std::thread;

use rastercube_core::{ReaderRegistry, register_reader_driver, registry_instance};
use rastercube_core_common::{DataSource, Dataset, ReaderDriver};

struct TestSource;
impl DataSource for TestSource {}

struct ZarrDriver;

impl ReaderDriver for ZarrDriver {
    fn protocols(&self) -> Vec<String> {
        vec!["s3".into()]
    }

    fn formats(&self) -> Vec<String> {
        vec!["zarr".into()]
    }

    fn new_datasource(
        &self,
        _dataset: &dyn Dataset,
        _band_name: Option<&str>,
    ) -> anyhow::Result<Box<dyn DataSource>> {
        Ok(Box::new(TestSource))
    }
}

#[test]
fn concurrent_accessors_share_one_registry() {
    register_reader_driver("zarr", Arc::new(ZarrDriver)).unwrap();

    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                scope.spawn(|| {
                    let registry = registry_instance().unwrap();
                    assert_eq!(registry.driver_names(), vec!["zarr".to_string()]);
                    std::ptr::from_ref::<ReaderRegistry>(registry) as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}
