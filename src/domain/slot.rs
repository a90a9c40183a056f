//! Parking slot domain entity

use std::fmt;

use serde::Serialize;

use super::vehicle::VehicleCategory;

/// Stable slot identifier: category plus 1-based sequence number.
///
/// Renders as the category prefix and a zero-padded number, e.g. `C-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SlotId {
    pub category: VehicleCategory,
    pub number: u32,
}

impl SlotId {
    pub fn new(category: VehicleCategory, number: u32) -> Self {
        Self { category, number }
    }

    /// Position of this slot inside its category pool
    pub(crate) fn index(&self) -> Option<usize> {
        (self.number as usize).checked_sub(1)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.category.slot_prefix(), self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub id: SlotId,
    pub occupied: bool,
}

impl Slot {
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            occupied: false,
        }
    }

    pub fn category(&self) -> VehicleCategory {
        self.id.category
    }

    pub fn is_free(&self) -> bool {
        !self.occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_id_display_is_zero_padded() {
        assert_eq!(SlotId::new(VehicleCategory::Car, 1).to_string(), "C-01");
        assert_eq!(SlotId::new(VehicleCategory::Bike, 10).to_string(), "B-10");
        assert_eq!(SlotId::new(VehicleCategory::Car, 123).to_string(), "C-123");
    }

    #[test]
    fn new_slot_is_free() {
        let slot = Slot::new(SlotId::new(VehicleCategory::Bike, 3));
        assert!(slot.is_free());
        assert_eq!(slot.category(), VehicleCategory::Bike);
        assert_eq!(slot.id.index(), Some(2));
        assert_eq!(SlotId::new(VehicleCategory::Car, 0).index(), None);
    }
}
