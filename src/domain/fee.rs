//! Parking fee calculation
//!
//! Fees are charged per billed hour: any started hour counts as a full hour.
//! The total never drops below the schedule's minimum fee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::vehicle::VehicleCategory;

/// Hourly rates and minimum charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub car_rate_per_hour: Decimal,
    pub bike_rate_per_hour: Decimal,
    pub minimum_fee: Decimal,
    /// Currency label used when rendering amounts
    pub currency: String,
}

impl FeeSchedule {
    pub fn rate_for(&self, category: VehicleCategory) -> Decimal {
        match category {
            VehicleCategory::Car => self.car_rate_per_hour,
            VehicleCategory::Bike => self.bike_rate_per_hour,
        }
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{} {:.2}", self.currency, amount)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            car_rate_per_hour: Decimal::from(40),
            bike_rate_per_hour: Decimal::from(15),
            minimum_fee: Decimal::from(20),
            currency: "Rs".to_string(),
        }
    }
}

/// Detailed fee for one parking session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub category: VehicleCategory,
    pub minutes_parked: i64,
    pub billed_hours: i64,
    pub rate_per_hour: Decimal,
    /// `billed_hours * rate_per_hour`, before the minimum is applied
    pub subtotal: Decimal,
    pub total: Decimal,
    pub minimum_applied: bool,
    pub currency: String,
}

impl FeeBreakdown {
    pub fn format_total(&self) -> String {
        format!("{} {:.2}", self.currency, self.total)
    }
}

/// Stateless fee rule over a fixed schedule
#[derive(Debug, Clone, Default)]
pub struct FeeCalculator {
    schedule: FeeSchedule,
}

impl FeeCalculator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    /// Amount due for `minutes_parked` minutes
    pub fn calculate_fee(&self, category: VehicleCategory, minutes_parked: i64) -> Decimal {
        self.calculate_breakdown(category, minutes_parked).total
    }

    pub fn calculate_breakdown(
        &self,
        category: VehicleCategory,
        minutes_parked: i64,
    ) -> FeeBreakdown {
        let rate = self.schedule.rate_for(category);
        let minimum = self.schedule.minimum_fee;

        // Zero or negative durations (same-minute exit, clock skew) pay the minimum
        let (billed_hours, subtotal) = if minutes_parked <= 0 {
            (0, Decimal::ZERO)
        } else {
            let hours = billed_hours(minutes_parked);
            (hours, rate * Decimal::from(hours))
        };

        let minimum_applied = minutes_parked <= 0 || subtotal < minimum;
        let total = if minimum_applied { minimum } else { subtotal };

        FeeBreakdown {
            category,
            minutes_parked,
            billed_hours,
            rate_per_hour: rate,
            subtotal,
            total,
            minimum_applied,
            currency: self.schedule.currency.clone(),
        }
    }
}

/// Minutes rounded up to whole hours
fn billed_hours(minutes: i64) -> i64 {
    minutes / 60 + i64::from(minutes % 60 != 0)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> FeeCalculator {
        FeeCalculator::new(FeeSchedule::default())
    }

    #[test]
    fn zero_minutes_pays_minimum() {
        assert_eq!(calc().calculate_fee(VehicleCategory::Car, 0), Decimal::from(20));
    }

    #[test]
    fn negative_minutes_pays_minimum() {
        let bd = calc().calculate_breakdown(VehicleCategory::Car, -5);
        assert_eq!(bd.total, Decimal::from(20));
        assert_eq!(bd.billed_hours, 0);
        assert!(bd.minimum_applied);
    }

    #[test]
    fn partial_hour_bills_full_hour() {
        assert_eq!(calc().calculate_fee(VehicleCategory::Car, 45), Decimal::from(40));
    }

    #[test]
    fn one_minute_over_bills_next_hour() {
        assert_eq!(calc().calculate_fee(VehicleCategory::Car, 60), Decimal::from(40));
        assert_eq!(calc().calculate_fee(VehicleCategory::Car, 61), Decimal::from(80));
    }

    #[test]
    fn bike_below_minimum_is_clamped() {
        let bd = calc().calculate_breakdown(VehicleCategory::Bike, 10);
        assert_eq!(bd.billed_hours, 1);
        assert_eq!(bd.subtotal, Decimal::from(15));
        assert_eq!(bd.total, Decimal::from(20));
        assert!(bd.minimum_applied);
    }

    #[test]
    fn bike_two_hours_exceeds_minimum() {
        let bd = calc().calculate_breakdown(VehicleCategory::Bike, 90);
        assert_eq!(bd.total, Decimal::from(30));
        assert!(!bd.minimum_applied);
    }

    #[test]
    fn fee_is_monotonic_in_minutes() {
        let c = calc();
        for category in VehicleCategory::ALL {
            let mut previous = c.calculate_fee(category, -1);
            for minutes in 0..=600 {
                let fee = c.calculate_fee(category, minutes);
                assert!(fee >= previous, "{category} fee dropped at {minutes} min");
                previous = fee;
            }
        }
    }

    #[test]
    fn custom_schedule_is_used() {
        let c = FeeCalculator::new(FeeSchedule {
            car_rate_per_hour: Decimal::new(255, 1), // 25.5
            bike_rate_per_hour: Decimal::from(10),
            minimum_fee: Decimal::ZERO,
            currency: "EUR".into(),
        });
        assert_eq!(c.calculate_fee(VehicleCategory::Car, 120), Decimal::from(51));
        assert_eq!(c.calculate_fee(VehicleCategory::Bike, 1), Decimal::from(10));
        assert_eq!(c.calculate_fee(VehicleCategory::Bike, 0), Decimal::ZERO);
    }

    #[test]
    fn format_total_has_two_decimals() {
        let bd = calc().calculate_breakdown(VehicleCategory::Car, 61);
        assert_eq!(bd.format_total(), "Rs 80.00");
        assert_eq!(
            FeeSchedule::default().format_amount(Decimal::new(125, 1)),
            "Rs 12.50"
        );
    }

    #[test]
    fn schedule_deserializes_with_defaults() {
        let schedule: FeeSchedule = toml::from_str("minimum_fee = 25.0").unwrap();
        assert_eq!(schedule.minimum_fee, Decimal::from(25));
        assert_eq!(schedule.car_rate_per_hour, Decimal::from(40));
        assert_eq!(schedule.currency, "Rs");
    }
}
