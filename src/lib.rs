//! # Texnouz Parking
//!
//! In-memory parking lot management: slot allocation per vehicle category,
//! ticket lifecycle and hourly fee calculation.
//!
//! ## Architecture
//!
//! - **domain**: Vehicles, slots, tickets, the `ParkingLot` aggregate and the
//!   fee rule. Pure, no I/O.
//! - **application**: `ParkingService`, the entry/checkout flow with logging
//! - **infrastructure**: Audit log file
//! - **interfaces**: Interactive operator console
//! - **config**: TOML configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

pub use application::{ExitReceipt, ParkingService, SharedParkingService};
pub use domain::{
    DomainError, DomainResult, FeeCalculator, FeeSchedule, Occupancy, ParkingLot, Ticket,
    Vehicle, VehicleCategory,
};
pub use support::errors::AppError;
