//! Vehicle domain entity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::support::errors::{DomainError, DomainResult};

/// Vehicle category; each category has its own slot pool and hourly rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleCategory {
    Car,
    Bike,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 2] = [VehicleCategory::Car, VehicleCategory::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Bike => "BIKE",
        }
    }

    /// Prefix used in slot display identifiers (`C-01`, `B-01`)
    pub fn slot_prefix(&self) -> char {
        match self {
            Self::Car => 'C',
            Self::Bike => 'B',
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CAR" => Ok(Self::Car),
            "BIKE" => Ok(Self::Bike),
            other => Err(DomainError::Validation(format!(
                "Unknown vehicle type '{}'. Use CAR or BIKE.",
                other
            ))),
        }
    }
}

/// Normalized vehicle registration number: trimmed, uppercase, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Registration(String);

impl Registration {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::Validation(
                "Registration cannot be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Up to the first four alphanumeric characters, used as the ticket prefix
    pub fn short_code(&self) -> String {
        self.0
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(4)
            .collect()
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Registration {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub registration: Registration,
    pub category: VehicleCategory,
}

impl Vehicle {
    pub fn new(registration: Registration, category: VehicleCategory) -> Self {
        Self {
            registration,
            category,
        }
    }

    /// Validate raw operator input into a vehicle
    pub fn parse(registration: &str, category: &str) -> DomainResult<Self> {
        Ok(Self::new(
            Registration::parse(registration)?,
            category.parse()?,
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────────
