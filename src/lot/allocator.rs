//! Slot allocator: lowest free slot first, vacated slots before fresh ones

use super::slot::SlotIndex;
use crate::error::{Error, Result};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// Hands out slot indices of a fixed-capacity table
///
/// Never-used slots are covered by a monotonically advancing cursor; slots
/// that were used and later released sit in a min-heap. The two ranges never
/// overlap: every reclaimed index is below the cursor.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    /// Total number of slots
    capacity: usize,
    /// Released slots, smallest index on top
    reclaimed: BinaryHeap<Reverse<SlotIndex>>,
    /// Next never-used index (if no reclaimed slots)
    next_index: SlotIndex,
}

impl SlotAllocator {
    /// Create an allocator for `capacity` slots
    pub fn new(capacity: usize) -> Result<Self> {
        Self::check_capacity(capacity)?;
        Ok(Self {
            capacity,
            reclaimed: BinaryHeap::new(),
            next_index: 0,
        })
    }

    /// Reset to a fresh table of `capacity` slots
    ///
    /// On `InvalidCapacity` the current state is left untouched.
    pub fn initialize(&mut self, capacity: usize) -> Result<()> {
        Self::check_capacity(capacity)?;
        self.capacity = capacity;
        self.reclaimed.clear();
        self.next_index = 0;
        debug!(capacity, "Slot allocator initialized");
        Ok(())
    }

    fn check_capacity(capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(
                "capacity must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Acquire the lowest available slot index
    ///
    /// Returns `None` when every slot is taken.
    pub fn acquire(&mut self) -> Option<SlotIndex> {
        // Vacated slots are always below the cursor, so they win
        if let Some(Reverse(index)) = self.reclaimed.pop() {
            trace!(index, "Reused reclaimed slot");
            return Some(index);
        }

        if self.next_index < self.capacity {
            let index = self.next_index;
            self.next_index += 1;
            trace!(index, "Allocated fresh slot");
            return Some(index);
        }

        None
    }

    /// Return a previously acquired slot index to the pool
    ///
    /// The caller guarantees `index` is currently acquired; releasing the
    /// same index twice would hand it out twice.
    pub fn release(&mut self, index: SlotIndex) {
        debug_assert!(index < self.next_index, "release of never-acquired slot {}", index);
        self.reclaimed.push(Reverse(index));
        trace!(index, "Released slot");
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots that can still be acquired
    pub fn available(&self) -> usize {
        self.capacity - self.next_index + self.reclaimed.len()
    }

    /// Number of slots currently handed out
    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }

    pub fn stats(&self) -> AllocatorStats {
        AllocatorStats {
            capacity: self.capacity,
            available: self.available(),
            never_used: self.capacity - self.next_index,
            reclaimed: self.reclaimed.len(),
        }
    }
}

/// Point-in-time allocator counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocatorStats {
    pub capacity: usize,
    pub available: usize,
    pub never_used: usize,
    pub reclaimed: usize,
}
