// Virtual Parking - Rust Implementation
// A fixed-capacity slot allocator with registration and age indexes

#![warn(rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod lot;
pub mod runner;

// Re-exports for convenience
pub use command::{Command, CommandRouter, Outcome};
pub use config::{OutputFormat, RunConfig};
pub use lot::{ParkingLot, RegistrationCode, SharedParkingLot, SlotAllocator, SlotNumber};

/// Virtual parking error types
pub mod error {
    use crate::lot::SlotNumber;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid capacity: {0}")]
        InvalidCapacity(String),

        #[error("Invalid command: {0}")]
        InvalidCommand(String),

        #[error("No free slot in a lot of {capacity} slots")]
        CapacityExhausted { capacity: usize },

        #[error("Slot {0} is already empty")]
        SlotAlreadyEmpty(SlotNumber),

        #[error("Unrecognized command: {0}")]
        UnrecognizedCommand(String),

        #[error("Parking lot has not been created")]
        NotCreated,

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Serialization error: {0}")]
        Serialization(#[from] serde_json::Error),
    }

    impl Error {
        /// Whether processing can continue with the next command.
        pub fn is_recoverable(&self) -> bool {
            !matches!(
                self,
                Error::Config(_) | Error::Io(_) | Error::Serialization(_)
            )
        }
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
