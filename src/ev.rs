use tracing::{debug, warn};

use crate::config::VehicleSpec;
use crate::types::{DrivingCondition, Speed};

/// Share of the pack filled at the fast rate when fast charging is available.
const FAST_CHARGE_SHARE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleModel {
    pub battery_capacity_kwh: f64,
    pub consumption_city: f64,
    pub consumption_highway: f64,
    pub regen_efficiency: f64,
    pub charging_speed_kw: f64,
    pub fast_charging_speed_kw: Option<f64>,
    current_battery_kwh: f64,
}

impl VehicleModel {
    /// Takes the parameters as given. Non-positive capacities or rates give
    /// `inf`/`NaN` results (or a panic in `simulate_trip`); use
    /// [`VehicleSpec::build`] to construct from untrusted input.
    pub fn new(
        battery_capacity_kwh: f64,
        consumption_city: f64,
        consumption_highway: f64,
        regen_efficiency: f64,
        charging_speed_kw: f64,
        fast_charging_speed_kw: Option<f64>,
    ) -> Self {
        VehicleModel {
            battery_capacity_kwh,
            consumption_city,
            consumption_highway,
            regen_efficiency,
            charging_speed_kw,
            fast_charging_speed_kw,
            current_battery_kwh: battery_capacity_kwh,
        }
    }

    pub fn current_battery_kwh(&self) -> f64 {
        self.current_battery_kwh
    }

    pub fn state_of_charge(&self) -> f64 {
        self.current_battery_kwh / self.battery_capacity_kwh * 100.0
    }

    pub fn is_depleted(&self) -> bool {
        self.current_battery_kwh <= 0.0
    }

    pub fn reset(&mut self) {
        self.current_battery_kwh = self.battery_capacity_kwh;
    }

    /// kWh/100km for the given condition; mixed uses the city/highway mean.
    pub fn consumption_for(&self, condition: DrivingCondition) -> f64 {
        match condition {
            DrivingCondition::City => self.consumption_city,
            DrivingCondition::Highway => self.consumption_highway,
            DrivingCondition::Mixed => self.average_consumption(),
        }
    }

    pub fn average_consumption(&self) -> f64 {
        (self.consumption_city + self.consumption_highway) / 2.0
    }

    pub fn distance_on_full_charge(&self, condition: DrivingCondition) -> f64 {
        self.battery_capacity_kwh / self.consumption_for(condition) * 100.0
    }

    /// Braking energy a trip of `distance_km` would recover, without touching the battery.
    pub fn energy_recoverable(&self, distance_km: f64, speed: Speed) -> f64 {
        let energy_used = distance_km / 100.0 * self.average_consumption();
        energy_used * self.regen_efficiency * speed.regen_factor()
    }

    /// Adds braking energy to the battery (capped at capacity) and returns the
    /// uncapped amount recovered, which can exceed what the battery actually gained.
    pub fn recover_energy_braking(&mut self, distance_km: f64, speed: Speed) -> f64 {
        let energy_recovered = self.energy_recoverable(distance_km, speed);

        self.current_battery_kwh =
            (self.current_battery_kwh + energy_recovered).min(self.battery_capacity_kwh);
        debug!(
            distance_km,
            %speed,
            energy_recovered,
            battery = self.current_battery_kwh,
            "regenerative braking"
        );
        energy_recovered
    }

    /// Hours for a full recharge from empty. Ignores the current battery level.
    pub fn charge_time(&self) -> f64 {
        match self.fast_charging_speed_kw {
            Some(fast) => {
                let fast_time = self.battery_capacity_kwh * FAST_CHARGE_SHARE / fast;
                let slow_time =
                    self.battery_capacity_kwh * (1.0 - FAST_CHARGE_SHARE) / self.charging_speed_kw;
                fast_time + slow_time
            }
            None => self.battery_capacity_kwh / self.charging_speed_kw,
        }
    }

    /// Runs a trip and returns the remaining battery in kWh.
    ///
    /// The braking recovery is credited to the battery first, then the net usage
    /// (`used - recovered`) is subtracted again, so recovery counts twice.
    pub fn simulate_trip(
        &mut self,
        distance_km: f64,
        condition: DrivingCondition,
        speed: Speed,
    ) -> f64 {
        let energy_used = distance_km / 100.0 * self.consumption_for(condition);
        let energy_recovered = self.recover_energy_braking(distance_km, speed);

        let net_energy_used = energy_used - energy_recovered;
        self.current_battery_kwh =
            (self.current_battery_kwh - net_energy_used).clamp(0.0, self.battery_capacity_kwh);

        debug!(
            distance_km,
            %condition,
            energy_used,
            net_energy_used,
            battery = self.current_battery_kwh,
            "trip simulated"
        );
        if self.is_depleted() {
            warn!(distance_km, %condition, "battery depleted during trip");
        }
        self.current_battery_kwh
    }
}

impl From<&VehicleSpec> for VehicleModel {
    fn from(spec: &VehicleSpec) -> Self {
        VehicleModel::new(
            spec.battery_capacity_kwh,
            spec.consumption_city,
            spec.consumption_highway,
            spec.regen_efficiency,
            spec.charging_speed_kw,
            spec.fast_charging_speed_kw,
        )
    }
}
