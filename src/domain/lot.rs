//! Parking lot aggregate
//!
//! Owns the slot pools, the active tickets and the registration index.
//! Every mutating operation either completes fully or leaves the lot
//! untouched; no partially applied state is observable between calls.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::slot::{Slot, SlotId};
use super::ticket::{Ticket, TicketId};
use super::vehicle::{Registration, Vehicle, VehicleCategory};
use crate::support::errors::{DomainError, DomainResult};

/// Occupied and total slot counts per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub car_occupied: usize,
    pub car_total: usize,
    pub bike_occupied: usize,
    pub bike_total: usize,
}

impl Occupancy {
    pub fn occupied(&self, category: VehicleCategory) -> usize {
        match category {
            VehicleCategory::Car => self.car_occupied,
            VehicleCategory::Bike => self.bike_occupied,
        }
    }

    pub fn total(&self, category: VehicleCategory) -> usize {
        match category {
            VehicleCategory::Car => self.car_total,
            VehicleCategory::Bike => self.bike_total,
        }
    }

    pub fn available(&self, category: VehicleCategory) -> usize {
        self.total(category) - self.occupied(category)
    }
}

#[derive(Debug, Clone)]
pub struct ParkingLot {
    car_slots: Vec<Slot>,
    bike_slots: Vec<Slot>,
    active: HashMap<TicketId, Ticket>,
    by_registration: HashMap<Registration, TicketId>,
    /// Next ticket sequence; never reused, survives `reset`
    next_sequence: u64,
}

impl ParkingLot {
    pub fn new(car_slots: u32, bike_slots: u32) -> Self {
        Self {
            car_slots: build_pool(VehicleCategory::Car, car_slots),
            bike_slots: build_pool(VehicleCategory::Bike, bike_slots),
            active: HashMap::new(),
            by_registration: HashMap::new(),
            next_sequence: 1,
        }
    }

    /// Park a vehicle in the lowest-numbered free slot of its category
    pub fn entry_vehicle(&mut self, vehicle: Vehicle) -> DomainResult<Ticket> {
        self.entry_vehicle_at(vehicle, Utc::now())
    }

    pub fn entry_vehicle_at(
        &mut self,
        vehicle: Vehicle,
        now: DateTime<Utc>,
    ) -> DomainResult<Ticket> {
        if let Some(ticket_id) = self.by_registration.get(&vehicle.registration) {
            return Err(DomainError::AlreadyParked {
                registration: vehicle.registration.to_string(),
                ticket_id: ticket_id.clone(),
            });
        }

        let category = vehicle.category;
        let slot = self
            .pool_mut(category)
            .iter_mut()
            .find(|s| s.is_free())
            .ok_or(DomainError::LotFull(category))?;
        slot.occupied = true;
        let slot_id = slot.id;

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let ticket = Ticket {
            id: TicketId::generate(&vehicle.registration, sequence),
            sequence,
            vehicle,
            slot: slot_id,
            entry_time: now,
        };

        self.by_registration
            .insert(ticket.registration().clone(), ticket.id.clone());
        self.active.insert(ticket.id.clone(), ticket.clone());

        Ok(ticket)
    }

    /// Retire a ticket and free its slot.
    ///
    /// Returns the retired ticket, or `None` if the id is unknown or was
    /// already retired, in which case nothing changes.
    pub fn exit_vehicle(&mut self, ticket_id: &str) -> Option<Ticket> {
        let ticket = self.active.remove(ticket_id)?;
        if let Some(slot) = self.slot_mut(ticket.slot) {
            slot.occupied = false;
        }
        self.by_registration.remove(ticket.registration());
        Some(ticket)
    }

    pub fn find_active_ticket_by_reg(&self, registration: &Registration) -> Option<&Ticket> {
        self.by_registration
            .get(registration)
            .and_then(|id| self.active.get(id))
    }

    pub fn find_active_ticket(&self, ticket_id: &str) -> Option<&Ticket> {
        self.active.get(ticket_id)
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            car_occupied: count_occupied(&self.car_slots),
            car_total: self.car_slots.len(),
            bike_occupied: count_occupied(&self.bike_slots),
            bike_total: self.bike_slots.len(),
        }
    }

    /// Active tickets in issue order
    pub fn active_tickets(&self) -> Vec<&Ticket> {
        let mut tickets: Vec<&Ticket> = self.active.values().collect();
        tickets.sort_by_key(|t| t.sequence);
        tickets
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Discard all tickets and rebuild both pools with the given sizes
    pub fn reset(&mut self, car_slots: u32, bike_slots: u32) {
        self.car_slots = build_pool(VehicleCategory::Car, car_slots);
        self.bike_slots = build_pool(VehicleCategory::Bike, bike_slots);
        self.active.clear();
        self.by_registration.clear();
    }

    pub fn slots(&self, category: VehicleCategory) -> &[Slot] {
        match category {
            VehicleCategory::Car => &self.car_slots,
            VehicleCategory::Bike => &self.bike_slots,
        }
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        id.index().and_then(|i| self.slots(id.category).get(i))
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        let index = id.index()?;
        self.pool_mut(id.category).get_mut(index)
    }

    fn pool_mut(&mut self, category: VehicleCategory) -> &mut Vec<Slot> {
        match category {
            VehicleCategory::Car => &mut self.car_slots,
            VehicleCategory::Bike => &mut self.bike_slots,
        }
    }
}

fn build_pool(category: VehicleCategory, count: u32) -> Vec<Slot> {
    (1..=count)
        .map(|n| Slot::new(SlotId::new(category, n)))
        .collect()
}

fn count_occupied(slots: &[Slot]) -> usize {
    slots.iter().filter(|s| s.occupied).count()
}

// ── Tests ──────────────────────────────────────────────────────
