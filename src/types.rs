use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use fxhash::FxHashSet;

pub type SlotTime = NaiveDateTime;
pub type BookedSlots = FxHashSet<usize>; // 0-based slot positions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivingCondition {
    City,
    Highway,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speed {
    Low,
    Moderate,
    High,
}

impl Speed {
    /// Multiplier applied to the vehicle's regenerative braking efficiency.
    pub fn regen_factor(self) -> f64 {
        match self {
            Speed::Low => 0.7,
            Speed::Moderate => 1.0,
            Speed::High => 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input '{input}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub input: String,
    pub expected: &'static str,
}

impl FromStr for DrivingCondition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "city" => Ok(DrivingCondition::City),
            "highway" => Ok(DrivingCondition::Highway),
            "mixed" => Ok(DrivingCondition::Mixed),
            _ => Err(ParseEnumError {
                input: s.trim().to_owned(),
                expected: "city, highway, mixed",
            }),
        }
    }
}

impl FromStr for Speed {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Speed::Low),
            "moderate" => Ok(Speed::Moderate),
            "high" => Ok(Speed::High),
            _ => Err(ParseEnumError {
                input: s.trim().to_owned(),
                expected: "low, moderate, high",
            }),
        }
    }
}

impl fmt::Display for DrivingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrivingCondition::City => write!(f, "city"),
            DrivingCondition::Highway => write!(f, "highway"),
            DrivingCondition::Mixed => write!(f, "mixed"),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Low => write!(f, "low"),
            Speed::Moderate => write!(f, "moderate"),
            Speed::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" City ".parse::<DrivingCondition>(), Ok(DrivingCondition::City));
        assert_eq!("HIGHWAY".parse::<DrivingCondition>(), Ok(DrivingCondition::Highway));
        assert_eq!("high".parse::<Speed>(), Ok(Speed::High));
    }

    #[test]
    fn rejects_unknown_values() {
        let err = "offroad".parse::<DrivingCondition>().unwrap_err();
        assert_eq!(err.input, "offroad");
        assert!(err.to_string().contains("city, highway, mixed"));
        assert!("fast".parse::<Speed>().is_err());
    }

    #[test]
    fn display_matches_parse_input() {
        for c in [DrivingCondition::City, DrivingCondition::Highway, DrivingCondition::Mixed] {
            assert_eq!(c.to_string().parse::<DrivingCondition>(), Ok(c));
        }
        assert_eq!(Speed::Moderate.to_string(), "moderate");
    }

    #[test]
    fn regen_factors() {
        assert_eq!(Speed::Low.regen_factor(), 0.7);
        assert_eq!(Speed::Moderate.regen_factor(), 1.0);
        assert_eq!(Speed::High.regen_factor(), 1.2);
    }
}
