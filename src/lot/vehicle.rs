//! Vehicle identity and occupancy records

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Driver age attached to a parked vehicle
pub type Age = u32;

/// Parse an age token: unsigned decimal digits only
pub fn parse_age(token: &str) -> Result<Age> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidCommand(format!(
            "age must be a non-negative integer, got `{}`",
            token
        )));
    }
    token
        .parse::<Age>()
        .map_err(|e| Error::InvalidCommand(format!("age `{}` out of range: {}", token, e)))
}

/// Vehicle registration code in the form `AA-NN-AA-NNNN`
///
/// `A` is an uppercase ASCII letter and `N` an ASCII digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistrationCode(String);

impl RegistrationCode {
    /// Byte length of a well-formed code
    pub const LEN: usize = 13;

    /// Validate and wrap a registration code
    pub fn parse(code: &str) -> Result<Self> {
        if Self::is_well_formed(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(Error::InvalidCommand(format!(
                "registration `{}` does not match AA-NN-AA-NNNN",
                code
            )))
        }
    }

    fn is_well_formed(code: &str) -> bool {
        let bytes = code.as_bytes();
        if bytes.len() != Self::LEN {
            return false;
        }
        // Group layout: 2 letters, 2 digits, 2 letters, 4 digits
        bytes.iter().enumerate().all(|(i, &b)| match i {
            0 | 1 | 6 | 7 => b.is_ascii_uppercase(),
            3 | 4 | 9..=12 => b.is_ascii_digit(),
            _ => b == b'-',
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegistrationCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegistrationCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RegistrationCode> for String {
    fn from(code: RegistrationCode) -> Self {
        code.0
    }
}

/// The vehicle occupying a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub registration: RegistrationCode,
    pub age: Age,
}

impl OccupancyRecord {
    pub fn new(registration: RegistrationCode, age: Age) -> Self {
        Self { registration, age }
    }
}
