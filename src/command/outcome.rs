//! Command outcomes and their text/JSON renderings

use super::parser::CommandKind;
use crate::error::Error;
use crate::lot::{Age, RegistrationCode, SlotNumber};
use serde::Serialize;
use std::fmt;

const NO_MATCH: &str = "No parked car matches the query";

/// Result of one command, success or reported failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created {
        capacity: usize,
    },
    Parked {
        registration: RegistrationCode,
        slot: SlotNumber,
    },
    Left {
        slot: SlotNumber,
        registration: RegistrationCode,
        age: Age,
    },
    SlotsForAge {
        age: Age,
        slots: Vec<SlotNumber>,
    },
    SlotForRegistration {
        registration: RegistrationCode,
        slot: Option<SlotNumber>,
    },
    RegistrationsForAge {
        age: Age,
        registrations: Vec<RegistrationCode>,
    },
    Failed(Failure),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Bare query value: comma joined list or slot number, empty when nothing matched
    ///
    /// `None` for outcomes that are not queries.
    pub fn value(&self) -> Option<String> {
        match self {
            Outcome::SlotsForAge { slots, .. } => Some(join(slots)),
            Outcome::SlotForRegistration { slot, .. } => {
                Some(slot.map(|s| s.to_string()).unwrap_or_default())
            }
            Outcome::RegistrationsForAge { registrations, .. } => Some(join(registrations)),
            _ => None,
        }
    }

    /// One-line JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { capacity } => write!(f, "Created parking of {} slots", capacity),
            Outcome::Parked { registration, slot } => write!(
                f,
                "Car with vehicle registration number {} has been parked at slot number {}",
                registration, slot
            ),
            Outcome::Left {
                slot,
                registration,
                age,
            } => write!(
                f,
                "Slot number {} vacated, the car with vehicle registration number {} left the space, the driver of the car was of age {}",
                slot, registration, age
            ),
            Outcome::Failed(failure) => write!(f, "{}", failure),
            query => match query.value() {
                Some(value) if !value.is_empty() => f.write_str(&value),
                _ => f.write_str(NO_MATCH),
            },
        }
    }
}

/// Failure category, mirrors `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidCapacity,
    InvalidCommand,
    CapacityExhausted,
    SlotAlreadyEmpty,
    UnrecognizedCommand,
    NotCreated,
    Internal,
}

impl From<&Error> for FailureKind {
    fn from(error: &Error) -> Self {
        match error {
            Error::InvalidCapacity(_) => FailureKind::InvalidCapacity,
            Error::InvalidCommand(_) => FailureKind::InvalidCommand,
            Error::CapacityExhausted { .. } => FailureKind::CapacityExhausted,
            Error::SlotAlreadyEmpty(_) => FailureKind::SlotAlreadyEmpty,
            Error::UnrecognizedCommand(_) => FailureKind::UnrecognizedCommand,
            Error::NotCreated => FailureKind::NotCreated,
            Error::Config(_) | Error::Io(_) | Error::Serialization(_) => FailureKind::Internal,
        }
    }
}

/// A reported, non-fatal command failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Command the failing line named, when recognized
    pub command: Option<CommandKind>,
    pub kind: FailureKind,
    /// User-facing message
    pub message: String,
    /// Underlying error text
    pub detail: String,
}

impl Failure {
    pub fn new(command: Option<CommandKind>, error: &Error) -> Self {
        let message = match (error, command) {
            (Error::InvalidCapacity(_), _) => {
                "Number of Parking slots should be a Positive integer".to_string()
            }
            (Error::InvalidCommand(_), Some(kind)) => {
                format!("Invalid \"{}\" Command Format", kind)
            }
            (Error::InvalidCommand(_), None) => {
                "Cannot process the command. Invalid Command Format".to_string()
            }
            (Error::CapacityExhausted { .. }, _) => "Sorry! No Parking spaces available".to_string(),
            (Error::SlotAlreadyEmpty(slot), _) => format!("Parking space {} is already Empty", slot),
            (Error::UnrecognizedCommand(_), _) => {
                "Command Not matched with valid commands set".to_string()
            }
            (other, _) => other.to_string(),
        };

        Self {
            command,
            kind: FailureKind::from(error),
            message,
            detail: error.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
