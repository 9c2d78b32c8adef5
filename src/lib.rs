pub mod clock;
pub mod config;
pub mod error;
pub mod ev;
pub mod finder;
pub mod station;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::VehicleSpec;
pub use error::{BookingError, ConfigError};
pub use ev::VehicleModel;
pub use finder::StationFinder;
pub use station::{ChargingStation, SLOT_COUNT, SLOT_FORMAT};
pub use types::{DrivingCondition, ParseEnumError, SlotTime, Speed};
