//! Parking domain: vehicles, slots, tickets, the lot aggregate and fees

pub mod fee;
pub mod lot;
pub mod slot;
pub mod ticket;
pub mod vehicle;

pub use fee::{FeeBreakdown, FeeCalculator, FeeSchedule};
pub use lot::{Occupancy, ParkingLot};
pub use slot::{Slot, SlotId};
pub use ticket::{Ticket, TicketId};
pub use vehicle::{Registration, Vehicle, VehicleCategory};

// Re-export DomainError from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
