//! Command router: dispatches commands to the parking lot it owns

use super::outcome::{Failure, Outcome};
use super::parser::{Command, CommandKind};
use crate::error::{Error, Result};
use crate::lot::{LotStats, ParkingLot};
use tracing::{debug, info, warn};

/// Owns the (optional) lot and turns commands into outcomes
///
/// Until a `Create_parking_lot` succeeds every other command fails with
/// `NotCreated`.
#[derive(Debug, Default)]
pub struct CommandRouter {
    lot: Option<ParkingLot>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router around an existing lot
    pub fn with_lot(lot: ParkingLot) -> Self {
        Self { lot: Some(lot) }
    }

    pub fn lot(&self) -> Option<&ParkingLot> {
        self.lot.as_ref()
    }

    pub fn stats(&self) -> Option<LotStats> {
        self.lot.as_ref().map(ParkingLot::stats)
    }

    fn lot_ref(&self) -> Result<&ParkingLot> {
        self.lot.as_ref().ok_or(Error::NotCreated)
    }

    fn lot_mut(&mut self) -> Result<&mut ParkingLot> {
        self.lot.as_mut().ok_or(Error::NotCreated)
    }

    /// Execute one parsed command
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(command = %command.kind(), "Executing command");

        let outcome = match command {
            Command::CreateParkingLot { capacity } => {
                // Build first so a failed creation keeps any existing lot
                let lot = ParkingLot::new(capacity)?;
                if self.lot.replace(lot).is_some() {
                    info!(capacity, "Replaced existing parking lot");
                }
                Outcome::Created { capacity }
            }
            Command::Park { registration, age } => {
                let slot = self.lot_mut()?.park(registration.clone(), age)?;
                Outcome::Parked { registration, slot }
            }
            Command::Leave { slot } => {
                let record = self.lot_mut()?.leave(slot.get())?;
                Outcome::Left {
                    slot,
                    registration: record.registration,
                    age: record.age,
                }
            }
            Command::SlotNumbersForDriverOfAge { age } => Outcome::SlotsForAge {
                age,
                slots: self.lot_ref()?.slots_by_age(age).to_vec(),
            },
            Command::SlotNumberForCarWithNumber { registration } => {
                let slot = self.lot_ref()?.slot_by_registration(&registration);
                Outcome::SlotForRegistration { registration, slot }
            }
            Command::VehicleRegistrationNumberForDriverOfAge { age } => {
                Outcome::RegistrationsForAge {
                    age,
                    registrations: self
                        .lot_ref()?
                        .registrations_by_age(age)
                        .into_iter()
                        .cloned()
                        .collect(),
                }
            }
        };

        Ok(outcome)
    }

    /// Parse and execute tokens; failures come back as `Outcome::Failed`
    pub fn dispatch(&mut self, tokens: &[&str]) -> Outcome {
        let kind = tokens.first().copied().and_then(CommandKind::from_keyword);

        match Command::parse(tokens).and_then(|command| self.execute(command)) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(command = ?kind, error = %error, "Command rejected");
                Outcome::Failed(Failure::new(kind, &error))
            }
        }
    }

    /// Tokenize on whitespace and dispatch
    pub fn dispatch_line(&mut self, line: &str) -> Outcome {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        self.dispatch(&tokens)
    }
}
