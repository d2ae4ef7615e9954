//! Parking lot registry: slot table plus registration and age indexes
//!
//! Every mutation touches the slot table, both indexes and the allocator in
//! one call. Nothing here is recomputed from a scan.

use super::allocator::SlotAllocator;
use super::slot::{SlotIndex, SlotNumber};
use super::vehicle::{Age, OccupancyRecord, RegistrationCode};
use crate::error::{Error, Result};
use serde::Serialize;
use std::alloc::Layout;
use std::collections::HashMap;
use tracing::{debug, info};

/// A parking lot of fixed capacity
#[derive(Debug, Clone)]
pub struct ParkingLot {
    /// Free slot bookkeeping
    allocator: SlotAllocator,
    /// One entry per slot reached by the allocator so far, `None` when empty
    slots: Vec<Option<OccupancyRecord>>,
    /// Registration → occupied slot index
    by_registration: HashMap<RegistrationCode, SlotIndex>,
    /// Age → occupied slot numbers, in parking order
    by_age: HashMap<Age, Vec<SlotNumber>>,
}

impl ParkingLot {
    /// Create an empty lot with `capacity` slots
    ///
    /// The slot table grows as slots are first handed out, so creation costs
    /// nothing up front. A capacity whose table could never be addressed is
    /// `InvalidCapacity`.
    pub fn new(capacity: usize) -> Result<Self> {
        Layout::array::<Option<OccupancyRecord>>(capacity).map_err(|_| {
            Error::InvalidCapacity(format!("{} slots exceed addressable memory", capacity))
        })?;
        let allocator = SlotAllocator::new(capacity)?;
        info!(capacity, "Created parking lot");

        Ok(Self {
            allocator,
            slots: Vec::new(),
            by_registration: HashMap::new(),
            by_age: HashMap::new(),
        })
    }

    /// Park a vehicle in the lowest available slot
    ///
    /// Fails with `CapacityExhausted` when the lot is full and with
    /// `InvalidCommand` when the registration is already parked. Neither
    /// failure changes any state.
    pub fn park(&mut self, registration: RegistrationCode, age: Age) -> Result<SlotNumber> {
        if let Some(&index) = self.by_registration.get(&registration) {
            return Err(Error::InvalidCommand(format!(
                "vehicle {} is already parked at slot {}",
                registration,
                SlotNumber::from_index(index)
            )));
        }

        let index = self.allocator.acquire().ok_or(Error::CapacityExhausted {
            capacity: self.allocator.capacity(),
        })?;
        let number = SlotNumber::from_index(index);

        self.by_registration.insert(registration.clone(), index);
        self.by_age.entry(age).or_default().push(number);
        let record = Some(OccupancyRecord::new(registration, age));
        // Fresh indices come from the cursor, which is exactly the table length
        if index == self.slots.len() {
            self.slots.push(record);
        } else {
            self.slots[index] = record;
        }

        debug!(slot = %number, age, "Parked vehicle");
        Ok(number)
    }

    /// Vacate slot `slot` (1-based) and return its former occupant
    pub fn leave(&mut self, slot: usize) -> Result<OccupancyRecord> {
        let number = SlotNumber::new(slot)
            .filter(|n| n.index() < self.capacity())
            .ok_or_else(|| {
                Error::InvalidCommand(format!(
                    "slot {} outside 1..={}",
                    slot,
                    self.capacity()
                ))
            })?;
        let index = number.index();

        let record = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(Error::SlotAlreadyEmpty(number))?;

        self.by_registration.remove(&record.registration);
        if let Some(numbers) = self.by_age.get_mut(&record.age) {
            if let Some(pos) = numbers.iter().position(|&n| n == number) {
                numbers.remove(pos);
            }
        }
        self.allocator.release(index);

        debug!(slot = %number, registration = %record.registration, "Vehicle left");
        Ok(record)
    }

    /// Occupied slot numbers for drivers of `age`, in parking order
    ///
    /// An age never seen and an age with no remaining vehicles both give an
    /// empty slice.
    pub fn slots_by_age(&self, age: Age) -> &[SlotNumber] {
        self.by_age.get(&age).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Slot currently holding `registration`
    pub fn slot_by_registration(&self, registration: &RegistrationCode) -> Option<SlotNumber> {
        self.by_registration
            .get(registration)
            .copied()
            .map(SlotNumber::from_index)
    }

    /// Registrations of vehicles whose drivers are of `age`, in parking order
    pub fn registrations_by_age(&self, age: Age) -> Vec<&RegistrationCode> {
        self.slots_by_age(age)
            .iter()
            .filter_map(|n| self.slots.get(n.index()).and_then(Option::as_ref))
            .map(|record| &record.registration)
            .collect()
    }

    /// Occupant of slot `number`, if any
    pub fn occupant(&self, number: SlotNumber) -> Option<&OccupancyRecord> {
        self.slots.get(number.index()).and_then(Option::as_ref)
    }

    /// Occupied slots in slot order
    pub fn occupied(&self) -> impl Iterator<Item = (SlotNumber, &OccupancyRecord)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (SlotNumber::from_index(i), r)))
    }

    pub fn capacity(&self) -> usize {
        self.allocator.capacity()
    }

    /// Number of parked vehicles
    pub fn len(&self) -> usize {
        self.by_registration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_registration.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.allocator.available() == 0
    }

    pub fn stats(&self) -> LotStats {
        let alloc = self.allocator.stats();
        LotStats {
            capacity: alloc.capacity,
            occupied: self.len(),
            available: alloc.available,
            reclaimed: alloc.reclaimed,
        }
    }
}

/// Lot occupancy counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LotStats {
    pub capacity: usize,
    pub occupied: usize,
    pub available: usize,
    /// Vacated slots waiting to be reused
    pub reclaimed: usize,
}
