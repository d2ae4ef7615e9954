//! Slot addressing: 0-based indices inside the engine, 1-based numbers outside

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position in the slot table (0-based)
pub type SlotIndex = usize;

/// Externally visible slot number (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotNumber(usize);

impl SlotNumber {
    /// Create a slot number; `None` for 0
    pub fn new(number: usize) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Slot number for a 0-based table index
    pub fn from_index(index: SlotIndex) -> Self {
        Self(index + 1)
    }

    /// Table index of this slot
    pub fn index(self) -> SlotIndex {
        self.0 - 1
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a token is not a positive decimal integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSlotNumberError;

impl fmt::Display for ParseSlotNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("slot number must be a positive integer")
    }
}

impl std::error::Error for ParseSlotNumberError {}

impl FromStr for SlotNumber {
    type Err = ParseSlotNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `usize::from_str` accepts a leading '+', slot tokens are digits only
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSlotNumberError);
        }
        s.parse::<usize>()
            .ok()
            .and_then(SlotNumber::new)
            .ok_or(ParseSlotNumberError)
    }
}
