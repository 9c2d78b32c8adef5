use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::VehicleSpec;
use crate::error::ConfigError;
use crate::ev::VehicleModel;
use crate::types::{DrivingCondition, ParseEnumError, Speed};

#[pymodule]
fn ev_trip_planner(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(distance_on_full_charge, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_trip, m)?)?;
    m.add_function(wrap_pyfunction!(charge_time, m)?)
}

fn parse_condition(condition: &str) -> PyResult<DrivingCondition> {
    condition
        .parse()
        .map_err(|e: ParseEnumError| PyValueError::new_err(e.to_string()))
}

fn parse_speed(speed: &str) -> PyResult<Speed> {
    speed
        .parse()
        .map_err(|e: ParseEnumError| PyValueError::new_err(e.to_string()))
}

fn build(spec: VehicleSpec) -> PyResult<VehicleModel> {
    spec.build()
        .map_err(|e: ConfigError| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn distance_on_full_charge(
    battery_capacity: f64,
    consumption_city: f64,
    consumption_highway: f64,
    condition: &str,
) -> PyResult<f64> {
    let ev = build(VehicleSpec {
        battery_capacity_kwh: battery_capacity,
        consumption_city,
        consumption_highway,
        ..VehicleSpec::default()
    })?;
    Ok(ev.distance_on_full_charge(parse_condition(condition)?))
}

/// Returns `(remaining_kwh, recovered_kwh)` for a trip on a full battery.
#[pyfunction]
#[pyo3(signature = (battery_capacity, consumption_city, consumption_highway, regen_efficiency, distance_km, condition, speed))]
fn simulate_trip(
    battery_capacity: f64,
    consumption_city: f64,
    consumption_highway: f64,
    regen_efficiency: f64,
    distance_km: f64,
    condition: &str,
    speed: &str,
) -> PyResult<(f64, f64)> {
    if !(distance_km.is_finite() && distance_km >= 0.0) {
        return Err(PyValueError::new_err(format!(
            "distance_km must be a non-negative number, got {distance_km}"
        )));
    }
    let condition = parse_condition(condition)?;
    let speed = parse_speed(speed)?;
    let mut ev = build(VehicleSpec {
        battery_capacity_kwh: battery_capacity,
        consumption_city,
        consumption_highway,
        regen_efficiency,
        ..VehicleSpec::default()
    })?;
    let recovered = ev.energy_recoverable(distance_km, speed);
    let remaining = ev.simulate_trip(distance_km, condition, speed);
    Ok((remaining, recovered))
}

/// A `fast_charging_speed` of `None` or `0` means slow charging only.
#[pyfunction]
#[pyo3(signature = (battery_capacity, charging_speed, fast_charging_speed=None))]
fn charge_time(
    battery_capacity: f64,
    charging_speed: f64,
    fast_charging_speed: Option<f64>,
) -> PyResult<f64> {
    let ev = build(VehicleSpec {
        battery_capacity_kwh: battery_capacity,
        charging_speed_kw: charging_speed,
        fast_charging_speed_kw: fast_charging_speed.filter(|&kw| kw != 0.0),
        ..VehicleSpec::default()
    })?;
    Ok(ev.charge_time())
}
