//! Parking lot engine
//!
//! A fixed number of numbered slots handed out lowest-number-first, with
//! vacated slots reused ahead of never-used ones.
//!
//! # Architecture
//!
//! ```text
//! ParkingLot
//!   ├─→ SlotAllocator   → cursor: 4, reclaim heap: [1, 3]
//!   ├─→ Slot table      → [Some(KA-01-HH-1234, 21), None, Some(..), None, ..]
//!   ├─→ Registration index
//!   │     └─→ KA-01-HH-1234 → index 0
//!   └─→ Age index
//!         └─→ 21 → [1]
//! ```
//!
//! Indices are 0-based internally; every slot number leaving the engine is
//! 1-based (`SlotNumber`). The two indexes are updated in the same call as
//! the slot table, never rebuilt from a scan.

pub mod allocator;
pub mod registry;
pub mod shared;
pub mod slot;
pub mod vehicle;

pub use allocator::{AllocatorStats, SlotAllocator};
pub use registry::{LotStats, ParkingLot};
pub use shared::SharedParkingLot;
pub use slot::{SlotIndex, SlotNumber};
pub use vehicle::{Age, OccupancyRecord, RegistrationCode};
