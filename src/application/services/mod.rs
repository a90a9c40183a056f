//! Application services

mod parking;

pub use parking::{ExitReceipt, ParkingService, SharedParkingService};
