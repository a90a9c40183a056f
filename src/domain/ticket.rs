//! Parking ticket domain entity

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::slot::SlotId;
use super::vehicle::{Registration, Vehicle};
use crate::support::time::minutes_between;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TicketId(String);

impl TicketId {
    /// `T` + registration short code + `-` + zero-padded issue sequence.
    ///
    /// The separator keeps ids distinct even when a short code ends in digits,
    /// so uniqueness follows from the sequence alone.
    pub fn generate(registration: &Registration, sequence: u64) -> Self {
        Self(format!("T{}-{:03}", registration.short_code(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TicketId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Record of one parking session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    /// Lot-wide issue order, strictly increasing
    pub sequence: u64,
    pub vehicle: Vehicle,
    /// Slot held by this ticket, resolved through the lot
    pub slot: SlotId,
    pub entry_time: DateTime<Utc>,
}

impl Ticket {
    pub fn registration(&self) -> &Registration {
        &self.vehicle.registration
    }

    /// Whole minutes parked up to `now`
    pub fn minutes_parked(&self, now: DateTime<Utc>) -> i64 {
        minutes_between(self.entry_time, now)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleCategory;
    use chrono::{Duration, TimeZone};

    fn sample_ticket() -> Ticket {
        let registration = Registration::parse("KA01AB1234").unwrap();
        Ticket {
            id: TicketId::generate(&registration, 7),
            sequence: 7,
            vehicle: Vehicle::new(registration, VehicleCategory::Car),
            slot: SlotId::new(VehicleCategory::Car, 1),
            entry_time: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn ticket_id_format() {
        let t = sample_ticket();
        assert_eq!(t.id.as_str(), "TKA01-007");
    }

    #[test]
    fn ticket_id_widens_past_three_digits() {
        let reg = Registration::parse("AB").unwrap();
        assert_eq!(TicketId::generate(&reg, 1234).as_str(), "TAB-1234");
    }

    #[test]
    fn ticket_ids_with_digit_suffix_do_not_collide() {
        let a = TicketId::generate(&Registration::parse("AB10").unwrap(), 1);
        let b = TicketId::generate(&Registration::parse("AB").unwrap(), 10001);
        assert_ne!(a, b);
    }

    #[test]
    fn minutes_parked_truncates_partial_minutes() {
        let t = sample_ticket();
        let now = t.entry_time + Duration::seconds(45 * 60 + 59);
        assert_eq!(t.minutes_parked(now), 45);
    }

    #[test]
    fn ticket_serializes_for_callers() {
        let json = serde_json::to_value(sample_ticket()).unwrap();
        assert_eq!(json["id"], "TKA01-007");
        assert_eq!(json["vehicle"]["registration"], "KA01AB1234");
        assert_eq!(json["vehicle"]["category"], "CAR");
        assert_eq!(json["slot"]["number"], 1);
    }
}
