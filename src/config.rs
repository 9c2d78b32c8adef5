use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::ev::VehicleModel;

/// Vehicle parameters, loadable from TOML. Missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    /// Usable pack size (kWh)
    pub battery_capacity_kwh: f64,

    /// kWh/100km in city driving
    pub consumption_city: f64,

    /// kWh/100km on highway driving
    pub consumption_highway: f64,

    /// Fraction of average trip energy recovered by braking (0.30 = 30%)
    pub regen_efficiency: f64,

    /// Slow charging power (kW)
    pub charging_speed_kw: f64,

    /// Fast charging power (kW), if the vehicle supports it; `0` means no fast charger
    pub fast_charging_speed_kw: Option<f64>,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            battery_capacity_kwh: 75.0,
            consumption_city: 17.0,
            consumption_highway: 13.0,
            regen_efficiency: 0.30,
            charging_speed_kw: 11.0,
            fast_charging_speed_kw: Some(50.0),
        }
    }
}

impl VehicleSpec {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut spec: VehicleSpec = toml::from_str(s)?;
        if spec.fast_charging_speed_kw == Some(0.0) {
            spec.fast_charging_speed_kw = None;
        }
        spec.validate()?;
        Ok(spec)
    }

    /// Validated model; the only place out-of-range parameters are rejected.
    pub fn build(&self) -> Result<VehicleModel, ConfigError> {
        self.validate()?;
        Ok(VehicleModel::from(self))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let spec = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        info!(path = %path.display(), "loaded vehicle spec");
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("battery_capacity_kwh", self.battery_capacity_kwh),
            ("consumption_city", self.consumption_city),
            ("consumption_highway", self.consumption_highway),
            ("charging_speed_kw", self.charging_speed_kw),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidSpec(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if let Some(fast) = self.fast_charging_speed_kw {
            if !(fast.is_finite() && fast > 0.0) {
                return Err(ConfigError::InvalidSpec(format!(
                    "fast_charging_speed_kw must be positive, got {fast}"
                )));
            }
        }
        if !(self.regen_efficiency.is_finite() && self.regen_efficiency >= 0.0) {
            return Err(ConfigError::InvalidSpec(format!(
                "regen_efficiency must not be negative, got {}",
                self.regen_efficiency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(VehicleSpec::from_toml_str("").unwrap(), VehicleSpec::default());
    }

    #[test]
    fn partial_override() {
        let spec = VehicleSpec::from_toml_str(
            "battery_capacity_kwh = 60.0\nregen_efficiency = 0.25\n",
        )
        .unwrap();
        assert_eq!(spec.battery_capacity_kwh, 60.0);
        assert_eq!(spec.regen_efficiency, 0.25);
        assert_eq!(spec.consumption_city, 17.0);
        assert_eq!(spec.fast_charging_speed_kw, Some(50.0));
    }

    #[test]
    fn rejects_non_positive_capacity() {
        let err = VehicleSpec::from_toml_str("battery_capacity_kwh = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpec(msg) if msg.contains("battery_capacity_kwh")));
    }

    #[test]
    fn rejects_negative_regen() {
        let err = VehicleSpec::from_toml_str("regen_efficiency = -0.1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpec(_)));
    }

    #[test]
    fn zero_fast_charger_means_slow_only() {
        let spec = VehicleSpec::from_toml_str("fast_charging_speed_kw = 0").unwrap();
        assert_eq!(spec.fast_charging_speed_kw, None);
        let ev = spec.build().unwrap();
        assert!((ev.charge_time() - 75.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_fast_charger() {
        let err = VehicleSpec::from_toml_str("fast_charging_speed_kw = -50.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpec(msg) if msg.contains("fast_charging_speed_kw")));
    }

    #[test]
    fn build_rejects_negative_or_nan_capacity() {
        for capacity in [-75.0, f64::NAN] {
            let spec = VehicleSpec {
                battery_capacity_kwh: capacity,
                ..VehicleSpec::default()
            };
            assert!(matches!(spec.build(), Err(ConfigError::InvalidSpec(_))));
        }
    }

    #[test]
    fn build_matches_spec() {
        let ev = VehicleSpec::default().build().unwrap();
        assert_eq!(ev.battery_capacity_kwh, 75.0);
        assert_eq!(ev.current_battery_kwh(), 75.0);
        assert_eq!(ev.fast_charging_speed_kw, Some(50.0));
    }

    #[test]
    fn rejects_bad_toml() {
        let err = VehicleSpec::from_toml_str("battery_capacity_kwh = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "consumption_highway = 14.5").unwrap();
        let spec = VehicleSpec::load(file.path()).unwrap();
        assert_eq!(spec.consumption_highway, 14.5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = VehicleSpec::load("/nonexistent/vehicle.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
