//! In-memory registry of riders and drivers.
//!
//! Two levels of locking: the rider map and the driver map each have a
//! structural lock for insert/lookup, and every [`Driver`] guards its own
//! mutable fields. Driver mutations hold the map lock only long enough to
//! clone the entry out, so different drivers are updated in parallel.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument};

use crate::domain::{Driver, DriverCreate, DriverSummary, Location, Rider, RiderCreate, RiderPatch};

#[derive(Debug, Default)]
pub struct Registry {
    riders: Mutex<HashMap<String, Rider>>,
    drivers: RwLock<HashMap<String, Arc<Driver>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Critical sections never leave a map half-updated, so poisoning is recovered from.
    fn riders(&self) -> MutexGuard<'_, HashMap<String, Rider>> {
        self.riders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn drivers_read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Driver>>> {
        self.drivers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn drivers_write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Driver>>> {
        self.drivers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up a driver handle; the map lock is released on return.
    fn driver_handle(&self, name: &str) -> Option<Arc<Driver>> {
        self.drivers_read().get(name).cloned()
    }

    // -------------------------------------------------------------------------
    // Riders
    // -------------------------------------------------------------------------

    /// Inserts a rider, replacing any rider registered under the same name.
    #[instrument(fields(rider = %params.name), skip(self, params))]
    pub fn add_rider(&self, params: RiderCreate) {
        let rider = Rider::from_create(params);
        let name = rider.name.clone();
        let replaced = self.riders().insert(name, rider).is_some();
        info!(replaced, "Rider added");
    }

    #[instrument(skip(self))]
    pub fn update_rider_location(&self, name: &str, location: Location) -> bool {
        match self.riders().get_mut(name) {
            Some(rider) => {
                rider.location = location;
                info!(%location, "Rider location updated");
                true
            }
            None => {
                debug!("Rider not found, location update ignored");
                false
            }
        }
    }

    #[instrument(skip(self))]
    pub fn update_rider_details(&self, name: &str, patch: RiderPatch) -> bool {
        match self.riders().get_mut(name) {
            Some(rider) => {
                rider.apply(patch);
                info!("Rider details updated");
                true
            }
            None => {
                debug!("Rider not found, details update ignored");
                false
            }
        }
    }

    pub fn rider(&self, name: &str) -> Option<Rider> {
        self.riders().get(name).cloned()
    }

    pub fn rider_count(&self) -> usize {
        self.riders().len()
    }

    // -------------------------------------------------------------------------
    // Drivers
    // -------------------------------------------------------------------------

    /// Inserts a driver, replacing any driver registered under the same name.
    #[instrument(fields(driver = %params.name, vehicle = %params.vehicle), skip(self, params))]
    pub fn add_driver(&self, params: DriverCreate) {
        let driver = Arc::new(Driver::from_create(params));
        let name = driver.name().to_string();
        let replaced = self.drivers_write().insert(name, driver).is_some();
        info!(replaced, "Driver added");
    }

    #[instrument(skip(self))]
    pub fn update_driver_location(&self, name: &str, location: Location) -> bool {
        match self.driver_handle(name) {
            Some(driver) => {
                driver.update_location(location);
                info!(%location, "Driver location updated");
                true
            }
            None => {
                debug!("Driver not found, location update ignored");
                false
            }
        }
    }

    #[instrument(skip(self))]
    pub fn set_driver_availability(&self, name: &str, available: bool) -> bool {
        match self.driver_handle(name) {
            Some(driver) => {
                driver.set_available(available);
                info!(available, "Driver availability changed");
                true
            }
            None => {
                debug!("Driver not found, availability change ignored");
                false
            }
        }
    }

    #[instrument(skip(self))]
    pub fn add_driver_earnings(&self, name: &str, amount: u64) -> bool {
        match self.driver_handle(name) {
            Some(driver) => {
                let total = driver.add_earnings(amount);
                info!(total, "Driver earnings credited");
                true
            }
            None => {
                debug!("Driver not found, earnings ignored");
                false
            }
        }
    }

    pub fn driver(&self, name: &str) -> Option<DriverSummary> {
        self.driver_handle(name).map(|driver| driver.summary())
    }

    pub fn is_driver_available(&self, name: &str) -> Option<bool> {
        self.driver_handle(name).map(|driver| driver.is_available())
    }

    pub fn driver_count(&self) -> usize {
        self.drivers_read().len()
    }

    /// Snapshots every driver whose location and availability pass `keep`,
    /// holding the map read lock for the whole scan.
    ///
    /// Only accepted drivers are copied out. Order follows map iteration and is unspecified.
    pub fn select_drivers(
        &self,
        mut keep: impl FnMut(Location, bool) -> bool,
    ) -> Vec<DriverSummary> {
        self.drivers_read()
            .values()
            .filter(|driver| {
                let (location, available) = driver.position();
                keep(location, available)
            })
            .map(|driver| driver.summary())
            .collect()
    }

    /// Cumulative earnings of every driver, keyed by name.
    #[instrument(skip(self))]
    pub fn earnings_report(&self) -> BTreeMap<String, u64> {
        let report: BTreeMap<String, u64> = self
            .drivers_read()
            .iter()
            .map(|(name, driver)| (name.clone(), driver.earnings()))
            .collect();

        for (driver, earnings) in &report {
            info!(%driver, earnings, "Driver earnings");
        }
        report
    }
}
