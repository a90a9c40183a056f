//! Parking service: the operator-facing flow over the lot and fee rule

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainError, DomainResult, FeeBreakdown, FeeCalculator, Occupancy, ParkingLot,
    Registration, Ticket, Vehicle,
};

/// Result of a completed exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    pub exit_time: DateTime<Utc>,
    pub minutes_parked: i64,
    pub fee: FeeBreakdown,
}

impl ExitReceipt {
    pub fn amount(&self) -> Decimal {
        self.fee.total
    }
}

/// Service for vehicle entry, checkout and lot queries.
///
/// Each operation holds the lot lock for its whole duration, so a checkout's
/// lookup, fee computation and slot release happen as one step.
pub struct ParkingService {
    lot: Mutex<ParkingLot>,
    fees: FeeCalculator,
}

/// Shared, reference-counted parking service
pub type SharedParkingService = Arc<ParkingService>;

impl ParkingService {
    pub fn new(lot: ParkingLot, fees: FeeCalculator) -> Self {
        Self {
            lot: Mutex::new(lot),
            fees,
        }
    }

    /// Wrap in `Arc` for shared ownership
    pub fn shared(lot: ParkingLot, fees: FeeCalculator) -> SharedParkingService {
        Arc::new(Self::new(lot, fees))
    }

    pub fn enter(&self, vehicle: Vehicle) -> DomainResult<Ticket> {
        self.enter_at(vehicle, Utc::now())
    }

    pub fn enter_at(&self, vehicle: Vehicle, now: DateTime<Utc>) -> DomainResult<Ticket> {
        let registration = vehicle.registration.clone();
        let category = vehicle.category;

        match self.lock().entry_vehicle_at(vehicle, now) {
            Ok(ticket) => {
                info!(
                    ticket_id = %ticket.id,
                    registration = %registration,
                    %category,
                    slot = %ticket.slot,
                    "Vehicle entered"
                );
                Ok(ticket)
            }
            Err(e) => {
                warn!(registration = %registration, %category, error = %e, "Entry refused");
                Err(e)
            }
        }
    }

    /// Charge and release the vehicle with this registration
    pub fn checkout(&self, registration: &Registration) -> DomainResult<ExitReceipt> {
        self.checkout_at(registration, Utc::now())
    }

    pub fn checkout_at(
        &self,
        registration: &Registration,
        now: DateTime<Utc>,
    ) -> DomainResult<ExitReceipt> {
        let mut lot = self.lock();
        let ticket = lot
            .find_active_ticket_by_reg(registration)
            .cloned()
            .ok_or_else(|| DomainError::NotFound {
                entity: "Ticket",
                field: "registration",
                value: registration.to_string(),
            })?;
        Ok(self.settle(&mut lot, ticket, now))
    }

    /// Charge and release by ticket id
    pub fn checkout_ticket_at(
        &self,
        ticket_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<ExitReceipt> {
        let mut lot = self.lock();
        let ticket = lot
            .find_active_ticket(ticket_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound {
                entity: "Ticket",
                field: "id",
                value: ticket_id.to_string(),
            })?;
        Ok(self.settle(&mut lot, ticket, now))
    }

    pub fn find_by_registration(&self, registration: &Registration) -> Option<Ticket> {
        self.lock().find_active_ticket_by_reg(registration).cloned()
    }

    pub fn occupancy(&self) -> Occupancy {
        self.lock().occupancy()
    }

    pub fn active_tickets(&self) -> Vec<Ticket> {
        self.lock().active_tickets().into_iter().cloned().collect()
    }

    /// Rebuild the lot with new slot counts, dropping every active ticket
    pub fn reset(&self, car_slots: u32, bike_slots: u32) {
        let mut lot = self.lock();
        let dropped = lot.active_count();
        lot.reset(car_slots, bike_slots);
        info!(car_slots, bike_slots, dropped_tickets = dropped, "Parking lot reset");
    }

    /// Fee is computed from the live entry time before the ticket is retired
    fn settle(&self, lot: &mut ParkingLot, ticket: Ticket, now: DateTime<Utc>) -> ExitReceipt {
        let minutes_parked = ticket.minutes_parked(now);
        let fee = self
            .fees
            .calculate_breakdown(ticket.vehicle.category, minutes_parked);

        if lot.exit_vehicle(ticket.id.as_str()).is_none() {
            debug!(ticket_id = %ticket.id, "Ticket already retired");
        }

        info!(
            ticket_id = %ticket.id,
            registration = %ticket.registration(),
            slot = %ticket.slot,
            minutes_parked,
            billed_hours = fee.billed_hours,
            amount = %fee.total,
            "Vehicle exited"
        );

        ExitReceipt {
            ticket,
            exit_time: now,
            minutes_parked,
            fee,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ParkingLot> {
        // Lot state is only mutated through complete operations, so a
        // poisoned guard still holds a consistent lot.
        self.lot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ──────────────────────────────────────────────────────
