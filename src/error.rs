//! Error types for booking and configuration

use thiserror::Error;

use crate::types::SlotTime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// 1-based `index` outside `1..=len`.
    #[error("invalid number {index}, expected 1..={len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("slot {} is already booked", .slot.format(crate::station::SLOT_FORMAT))]
    AlreadyBooked { slot: SlotTime },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid vehicle spec: {0}")]
    InvalidSpec(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;
