//! Thread-safe handle to a parking lot
//!
//! One mutex per lot; every operation holds it for its whole duration so a
//! park or leave is observed either fully applied or not at all.

use super::registry::{LotStats, ParkingLot};
use super::slot::SlotNumber;
use super::vehicle::{Age, OccupancyRecord, RegistrationCode};
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lockable parking lot
#[derive(Debug, Clone)]
pub struct SharedParkingLot {
    inner: Arc<Mutex<ParkingLot>>,
}

impl SharedParkingLot {
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lot)),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::new(ParkingLot::new(capacity)?))
    }

    pub fn park(&self, registration: RegistrationCode, age: Age) -> Result<SlotNumber> {
        self.inner.lock().park(registration, age)
    }

    pub fn leave(&self, slot: usize) -> Result<OccupancyRecord> {
        self.inner.lock().leave(slot)
    }

    pub fn slots_by_age(&self, age: Age) -> Vec<SlotNumber> {
        self.inner.lock().slots_by_age(age).to_vec()
    }

    pub fn slot_by_registration(&self, registration: &RegistrationCode) -> Option<SlotNumber> {
        self.inner.lock().slot_by_registration(registration)
    }

    pub fn registrations_by_age(&self, age: Age) -> Vec<RegistrationCode> {
        self.inner
            .lock()
            .registrations_by_age(age)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> LotStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the lot
    pub fn with_lot<R>(&self, f: impl FnOnce(&mut ParkingLot) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::thread;

    #[test]
    fn test_concurrent_parks_get_distinct_slots() -> Result<()> {
        let lot = SharedParkingLot::with_capacity(64)?;

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let lot = lot.clone();
                thread::spawn(move || {
                    (0..8)
                        .map(|i| {
                            let code = RegistrationCode::parse(&format!("TH-{:02}-AB-{:04}", t, i))
                                .unwrap();
                            lot.park(code, t).unwrap().get()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let slots: BTreeSet<usize> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(slots, (1..=64).collect::<BTreeSet<_>>());
        assert_eq!(lot.stats().available, 0);
        Ok(())
    }

    #[test]
    fn test_shared_queries() -> Result<()> {
        let lot = SharedParkingLot::with_capacity(2)?;
        let code = RegistrationCode::parse("KA-01-HH-1234")?;
        lot.park(code.clone(), 21)?;

        assert_eq!(lot.slot_by_registration(&code).map(SlotNumber::get), Some(1));
        assert_eq!(lot.registrations_by_age(21), vec![code]);
        assert_eq!(lot.slots_by_age(21).len(), 1);

        lot.leave(1)?;
        assert!(lot.with_lot(|l| l.is_empty()));
        Ok(())
    }
}
