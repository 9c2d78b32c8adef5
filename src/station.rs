use chrono::TimeDelta;
use tracing::{debug, info};

use crate::error::{BookingError, Result};
use crate::types::{BookedSlots, SlotTime};

pub const SLOT_COUNT: usize = 24;
pub const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone)]
pub struct ChargingStation {
    pub name: String,
    pub distance_from_vehicle_km: f64,
    slots: Vec<SlotTime>,
    booked: BookedSlots,
}

impl ChargingStation {
    pub fn new(name: impl Into<String>, distance_from_vehicle_km: f64, now: SlotTime) -> Self {
        ChargingStation {
            name: name.into(),
            distance_from_vehicle_km,
            slots: Self::generate_slots(now),
            booked: BookedSlots::default(),
        }
    }

    /// Hourly slots from `now + 1h` through `now + 24h`.
    pub fn generate_slots(now: SlotTime) -> Vec<SlotTime> {
        (1..=SLOT_COUNT as i64)
            .map(|hours| now + TimeDelta::hours(hours))
            .collect()
    }

    pub fn slots(&self) -> &[SlotTime] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn booked_count(&self) -> usize {
        self.booked.len()
    }

    pub fn slot(&self, slot_number: usize) -> Result<SlotTime> {
        self.position(slot_number).map(|idx| self.slots[idx])
    }

    pub fn is_booked(&self, slot_number: usize) -> Result<bool> {
        self.position(slot_number).map(|idx| self.booked.contains(&idx))
    }

    /// Unbooked slots as `(slot_number, time)`, numbered from 1 in slot order.
    /// Numbers keep their position, so they have gaps once slots are booked.
    pub fn display_slots(&self) -> impl Iterator<Item = (usize, SlotTime)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.booked.contains(idx))
            .map(|(idx, slot)| (idx + 1, *slot))
    }

    pub fn available_slots(&self) -> impl Iterator<Item = (usize, SlotTime)> + '_ {
        self.display_slots()
    }

    pub fn book_slot(&mut self, slot_number: usize) -> Result<SlotTime> {
        let idx = self.position(slot_number)?;
        let slot = self.slots[idx];
        if !self.booked.insert(idx) {
            debug!(station = %self.name, slot_number, "slot already booked");
            return Err(BookingError::AlreadyBooked { slot });
        }
        info!(
            station = %self.name,
            slot = %slot.format(SLOT_FORMAT),
            "slot booked"
        );
        Ok(slot)
    }

    fn position(&self, slot_number: usize) -> Result<usize> {
        if (1..=self.slots.len()).contains(&slot_number) {
            Ok(slot_number - 1)
        } else {
            debug!(station = %self.name, slot_number, "slot number out of range");
            Err(BookingError::InvalidIndex {
                index: slot_number,
                len: self.slots.len(),
            })
        }
    }
}
