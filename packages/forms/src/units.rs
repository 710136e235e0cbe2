//! # Unit conversion between display and storage units
//!
//! The backend always stores height in centimetres, weight in pounds and distance
//! in kilometres. Users may view and enter values in either unit of each pair.
//!
//! | Quantity | Storage unit | Other unit | Storage rounding | Display rounding |
//! |----------|--------------|------------|------------------|------------------|
//! | Height | cm | ft/in | 2 decimals | whole inches |
//! | Weight | lb | kg | 2 decimals | 1 decimal |
//! | Distance | km | mi | 4 decimals | 2 decimals |
//!
//! Storage keeps more precision than display so that toggling the unit back and
//! forth does not drift. Conversions towards storage apply storage rounding,
//! conversions towards display apply display rounding.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const CM_PER_INCH: f64 = 2.54;
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const LB_PER_KG: f64 = 2.20462;
pub const KM_PER_MILE: f64 = 1.60934;

pub const HEIGHT_STORAGE_DECIMALS: i32 = 2;
pub const WEIGHT_STORAGE_DECIMALS: i32 = 2;
pub const WEIGHT_DISPLAY_DECIMALS: i32 = 1;
pub const DISTANCE_STORAGE_DECIMALS: i32 = 4;
pub const DISTANCE_DISPLAY_DECIMALS: i32 = 2;

/// Round half away from zero to the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Feet and inches to centimetres.
pub fn ft_in_to_cm(feet: f64, inches: f64) -> f64 {
    let cm = feet * INCHES_PER_FOOT * CM_PER_INCH + inches * CM_PER_INCH;
    round_to(cm, HEIGHT_STORAGE_DECIMALS)
}

/// Centimetres to whole feet and rounded remaining inches.
///
/// A remainder that rounds up to 12 inches is carried into the feet.
pub fn cm_to_ft_in(cm: f64) -> (u32, u32) {
    let total_inches = cm / CM_PER_INCH;
    let mut feet = (total_inches / INCHES_PER_FOOT).floor();
    let mut inches = (total_inches - feet * INCHES_PER_FOOT).round();
    if inches >= INCHES_PER_FOOT {
        feet += 1.0;
        inches -= INCHES_PER_FOOT;
    }
    (feet.max(0.0) as u32, inches.max(0.0) as u32)
}

pub fn kg_to_lb(kg: f64) -> f64 {
    round_to(kg * LB_PER_KG, WEIGHT_STORAGE_DECIMALS)
}

pub fn lb_to_kg(lb: f64) -> f64 {
    round_to(lb * (1.0 / LB_PER_KG), WEIGHT_DISPLAY_DECIMALS)
}

pub fn mi_to_km(miles: f64) -> f64 {
    round_to(miles * KM_PER_MILE, DISTANCE_STORAGE_DECIMALS)
}

pub fn km_to_mi(km: f64) -> f64 {
    round_to(km / KM_PER_MILE, DISTANCE_DISPLAY_DECIMALS)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    FtIn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Lb,
    Kg,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeightUnit::Cm => "cm",
            HeightUnit::FtIn => "ft/in",
        })
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightUnit::Lb => "lb",
            WeightUnit::Kg => "kg",
        })
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
        })
    }
}

/// A height as entered by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Height {
    Cm(f64),
    FtIn { feet: f64, inches: f64 },
}

impl Height {
    pub fn unit(&self) -> HeightUnit {
        match self {
            Height::Cm(_) => HeightUnit::Cm,
            Height::FtIn { .. } => HeightUnit::FtIn,
        }
    }

    /// Canonical storage value in centimetres.
    pub fn to_cm(&self) -> f64 {
        match *self {
            Height::Cm(cm) => round_to(cm, HEIGHT_STORAGE_DECIMALS),
            Height::FtIn { feet, inches } => ft_in_to_cm(feet, inches),
        }
    }

    pub fn from_cm(cm: f64, unit: HeightUnit) -> Self {
        match unit {
            HeightUnit::Cm => Height::Cm(round_to(cm, HEIGHT_STORAGE_DECIMALS)),
            HeightUnit::FtIn => {
                let (feet, inches) = cm_to_ft_in(cm);
                Height::FtIn {
                    feet: feet as f64,
                    inches: inches as f64,
                }
            }
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Height::Cm(cm) => write!(f, "{} cm", cm),
            Height::FtIn { feet, inches } => write!(f, "{}' {}\"", feet, inches),
        }
    }
}

/// A weight in either display unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weight {
    pub magnitude: f64,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(magnitude: f64, unit: WeightUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Canonical storage value in pounds.
    pub fn to_lb(&self) -> f64 {
        match self.unit {
            WeightUnit::Lb => round_to(self.magnitude, WEIGHT_STORAGE_DECIMALS),
            WeightUnit::Kg => kg_to_lb(self.magnitude),
        }
    }

    pub fn from_lb(lb: f64, unit: WeightUnit) -> Self {
        let magnitude = match unit {
            WeightUnit::Lb => round_to(lb, WEIGHT_DISPLAY_DECIMALS),
            WeightUnit::Kg => lb_to_kg(lb),
        };
        Self { magnitude, unit }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// A distance in either display unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distance {
    pub magnitude: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(magnitude: f64, unit: DistanceUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Canonical storage value in kilometres.
    pub fn to_km(&self) -> f64 {
        match self.unit {
            DistanceUnit::Km => round_to(self.magnitude, DISTANCE_STORAGE_DECIMALS),
            DistanceUnit::Mi => mi_to_km(self.magnitude),
        }
    }

    pub fn from_km(km: f64, unit: DistanceUnit) -> Self {
        let magnitude = match unit {
            DistanceUnit::Km => round_to(km, DISTANCE_DISPLAY_DECIMALS),
            DistanceUnit::Mi => km_to_mi(km),
        };
        Self { magnitude, unit }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_six_feet_is_182_88_cm() {
        assert!(close(ft_in_to_cm(6.0, 0.0), 182.88, 1e-9));
        assert_eq!(cm_to_ft_in(182.88), (6, 0));
    }

    #[test]
    fn test_cm_to_ft_in_carries_twelve_inches() {
        // 182.5 cm is 71.85 in, which rounds to 72 in = 6' 0"
        assert_eq!(cm_to_ft_in(182.5), (6, 0));
        assert_eq!(cm_to_ft_in(170.0), (5, 7));
    }

    #[test]
    fn test_mile_and_kilometre() {
        assert!(close(mi_to_km(1.0), 1.60934, 1e-4));
        assert!(close(km_to_mi(1.60934), 1.0, 1e-9));
    }

    #[test]
    fn test_weight_conversion() {
        assert!(close(kg_to_lb(100.0), 220.46, 1e-9));
        assert!(close(lb_to_kg(220.46), 100.0, 1e-9));
    }

    #[test]
    fn test_height_round_trip_in_ft_in() {
        for feet in 1..=9 {
            for inches in 0..12 {
                let height = Height::FtIn {
                    feet: feet as f64,
                    inches: inches as f64,
                };
                let back = Height::from_cm(height.to_cm(), HeightUnit::FtIn);
                assert_eq!(back, height);
            }
        }
    }

    #[test]
    fn test_weight_round_trip_in_kg() {
        let mut kg = 20.0;
        while kg <= 540.0 {
            let weight = Weight::new(round_to(kg, 1), WeightUnit::Kg);
            let back = Weight::from_lb(weight.to_lb(), WeightUnit::Kg);
            assert!(close(back.magnitude, weight.magnitude, 0.05), "{} kg", kg);
            kg += 3.7;
        }
    }

    #[test]
    fn test_distance_round_trip_in_miles() {
        let mut miles = 0.0;
        while miles <= 100.0 {
            let distance = Distance::new(round_to(miles, 2), DistanceUnit::Mi);
            let back = Distance::from_km(distance.to_km(), DistanceUnit::Mi);
            assert!(close(back.magnitude, distance.magnitude, 0.005), "{} mi", miles);
            miles += 0.37;
        }
    }

    #[test]
    fn test_storage_keeps_more_precision_than_display() {
        let km = Distance::new(3.0, DistanceUnit::Mi).to_km();
        assert!(close(km, 4.828, 1e-9));
        assert!(close(Distance::from_km(km, DistanceUnit::Km).magnitude, 4.83, 1e-9));
    }

    #[test]
    fn test_units_serialize_as_snake_case() {
        assert_eq!(serde_json::to_string(&HeightUnit::FtIn).unwrap(), "\"ft_in\"");
        assert_eq!(serde_json::to_string(&WeightUnit::Kg).unwrap(), "\"kg\"");
        assert_eq!(serde_json::to_string(&DistanceUnit::Mi).unwrap(), "\"mi\"");
    }
}
