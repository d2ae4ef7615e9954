//! Command grammar
//!
//! One command per line, whitespace separated. The first token selects the
//! command by exact match:
//!
//! ```text
//! Create_parking_lot <N>
//! Park <REG> driver_age <AGE>
//! Leave <SLOT>
//! Slot_numbers_for_driver_of_age <AGE>
//! Slot_number_for_car_with_number <REG>
//! Vehicle_registration_number_for_driver_of_age <AGE>
//! ```

use crate::error::{Error, Result};
use crate::lot::slot::SlotNumber;
use crate::lot::vehicle::{parse_age, Age, RegistrationCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Command keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    #[serde(rename = "Create_parking_lot")]
    CreateParkingLot,
    #[serde(rename = "Park")]
    Park,
    #[serde(rename = "Leave")]
    Leave,
    #[serde(rename = "Slot_numbers_for_driver_of_age")]
    SlotNumbersForDriverOfAge,
    #[serde(rename = "Slot_number_for_car_with_number")]
    SlotNumberForCarWithNumber,
    #[serde(rename = "Vehicle_registration_number_for_driver_of_age")]
    VehicleRegistrationNumberForDriverOfAge,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::CreateParkingLot,
        CommandKind::Park,
        CommandKind::Leave,
        CommandKind::SlotNumbersForDriverOfAge,
        CommandKind::SlotNumberForCarWithNumber,
        CommandKind::VehicleRegistrationNumberForDriverOfAge,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::CreateParkingLot => "Create_parking_lot",
            CommandKind::Park => "Park",
            CommandKind::Leave => "Leave",
            CommandKind::SlotNumbersForDriverOfAge => "Slot_numbers_for_driver_of_age",
            CommandKind::SlotNumberForCarWithNumber => "Slot_number_for_car_with_number",
            CommandKind::VehicleRegistrationNumberForDriverOfAge => {
                "Vehicle_registration_number_for_driver_of_age"
            }
        }
    }

    /// Exact, case-sensitive keyword lookup
    pub fn from_keyword(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == token)
    }

    /// Number of tokens, keyword included
    fn arity(self) -> usize {
        match self {
            CommandKind::Park => 4,
            _ => 2,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed, argument-validated command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateParkingLot { capacity: usize },
    Park { registration: RegistrationCode, age: Age },
    Leave { slot: SlotNumber },
    SlotNumbersForDriverOfAge { age: Age },
    SlotNumberForCarWithNumber { registration: RegistrationCode },
    VehicleRegistrationNumberForDriverOfAge { age: Age },
}

impl Command {
    /// Parse a raw text line
    pub fn parse_line(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        Self::parse(&tokens)
    }

    /// Parse already tokenized input
    pub fn parse(tokens: &[&str]) -> Result<Self> {
        let (&first, args) = tokens
            .split_first()
            .ok_or_else(|| Error::InvalidCommand("empty command".to_string()))?;

        let kind = CommandKind::from_keyword(first)
            .ok_or_else(|| Error::UnrecognizedCommand(first.to_string()))?;

        if tokens.len() != kind.arity() {
            return Err(Error::InvalidCommand(format!(
                "{} takes {} argument(s), got {}",
                kind,
                kind.arity() - 1,
                args.len()
            )));
        }

        let command = match kind {
            CommandKind::CreateParkingLot => Command::CreateParkingLot {
                capacity: parse_capacity(args[0])?,
            },
            CommandKind::Park => {
                if args[1] != "driver_age" {
                    return Err(Error::InvalidCommand(format!(
                        "expected `driver_age`, got `{}`",
                        args[1]
                    )));
                }
                Command::Park {
                    registration: RegistrationCode::parse(args[0])?,
                    age: parse_age(args[2])?,
                }
            }
            CommandKind::Leave => Command::Leave {
                slot: parse_slot(args[0])?,
            },
            CommandKind::SlotNumbersForDriverOfAge => Command::SlotNumbersForDriverOfAge {
                age: parse_age(args[0])?,
            },
            CommandKind::SlotNumberForCarWithNumber => Command::SlotNumberForCarWithNumber {
                registration: RegistrationCode::parse(args[0])?,
            },
            CommandKind::VehicleRegistrationNumberForDriverOfAge => {
                Command::VehicleRegistrationNumberForDriverOfAge {
                    age: parse_age(args[0])?,
                }
            }
        };

        Ok(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::CreateParkingLot { .. } => CommandKind::CreateParkingLot,
            Command::Park { .. } => CommandKind::Park,
            Command::Leave { .. } => CommandKind::Leave,
            Command::SlotNumbersForDriverOfAge { .. } => CommandKind::SlotNumbersForDriverOfAge,
            Command::SlotNumberForCarWithNumber { .. } => CommandKind::SlotNumberForCarWithNumber,
            Command::VehicleRegistrationNumberForDriverOfAge { .. } => {
                CommandKind::VehicleRegistrationNumberForDriverOfAge
            }
        }
    }
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Capacity must be a positive decimal integer; zero is rejected by the lot
fn parse_capacity(token: &str) -> Result<usize> {
    if !is_digits(token) {
        return Err(Error::InvalidCapacity(format!(
            "`{}` is not a positive integer",
            token
        )));
    }
    token
        .parse()
        .map_err(|e| Error::InvalidCapacity(format!("`{}`: {}", token, e)))
}

/// Upper bound is checked against the lot, not here
fn parse_slot(token: &str) -> Result<SlotNumber> {
    token
        .parse()
        .map_err(|e| Error::InvalidCommand(format!("slot `{}`: {}", token, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() -> Result<()> {
        assert_eq!(
            Command::parse_line("Create_parking_lot 6")?,
            Command::CreateParkingLot { capacity: 6 }
        );
        assert_eq!(
            Command::parse_line("Park KA-01-HH-1234 driver_age 21")?,
            Command::Park {
                registration: RegistrationCode::parse("KA-01-HH-1234")?,
                age: 21,
            }
        );
        assert_eq!(
            Command::parse_line("Leave 2")?,
            Command::Leave {
                slot: SlotNumber::new(2).unwrap(),
            }
        );
        assert_eq!(
            Command::parse_line("Slot_numbers_for_driver_of_age 21")?,
            Command::SlotNumbersForDriverOfAge { age: 21 }
        );
        assert_eq!(
            Command::parse_line("Slot_number_for_car_with_number PB-01-HH-1234")?,
            Command::SlotNumberForCarWithNumber {
                registration: RegistrationCode::parse("PB-01-HH-1234")?,
            }
        );
        assert_eq!(
            Command::parse_line("Vehicle_registration_number_for_driver_of_age 18")?,
            Command::VehicleRegistrationNumberForDriverOfAge { age: 18 }
        );
        Ok(())
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() -> Result<()> {
        assert_eq!(
            Command::parse_line("  Park\tKA-01-HH-1234  driver_age 21 \n")?,
            Command::Park {
                registration: RegistrationCode::parse("KA-01-HH-1234")?,
                age: 21,
            }
        );
        Ok(())
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(matches!(Command::parse_line(""), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse_line("   "), Err(Error::InvalidCommand(_))));
    }

    #[test]
    fn test_parse_unrecognized() {
        match Command::parse_line("park KA-01-HH-1234 driver_age 21") {
            Err(Error::UnrecognizedCommand(token)) => assert_eq!(token, "park"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            Command::parse_line("Exit"),
            Err(Error::UnrecognizedCommand(_))
        ));
    }

    #[test]
    fn test_parse_capacity_errors() {
        for line in ["Create_parking_lot -6", "Create_parking_lot s", "Create_parking_lot 1.5"] {
            assert!(
                matches!(Command::parse_line(line), Err(Error::InvalidCapacity(_))),
                "{}",
                line
            );
        }
        assert!(matches!(
            Command::parse_line("Create_parking_lot"),
            Err(Error::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_parse_park_errors() {
        for line in [
            "Park KA-01-HH-1234",
            "Park KA-01-HH-1234 driver_age",
            "Park KA-01-HH-1234 age 21",
            "Park KA-01-HH-123 driver_age 21",
            "Park KA-01-HH-1234 driver_age -1",
            "Park KA-01-HH-1234 driver_age 21 extra",
        ] {
            assert!(
                matches!(Command::parse_line(line), Err(Error::InvalidCommand(_))),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_parse_leave_errors() {
        assert!(matches!(Command::parse_line("Leave x"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse_line("Leave -1"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse_line("Leave 1 2"), Err(Error::InvalidCommand(_))));
        assert!(matches!(Command::parse_line("Leave 0"), Err(Error::InvalidCommand(_))));
        // Upper bound is the lot's concern
        assert_eq!(
            Command::parse_line("Leave 99").unwrap(),
            Command::Leave {
                slot: SlotNumber::new(99).unwrap(),
            }
        );
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(CommandKind::from_keyword("LEAVE"), None);
    }
}
