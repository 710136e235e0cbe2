//! # Form configuration (`forms.toml`)
//!
//! Bounds and input behaviour that differ between builds of the app are read
//! from an optional TOML file bundled with the client:
//!
//! ```toml
//! [bounds.exercise_minutes]
//! min = 1
//! max = 600
//!
//! [input]
//! dot_policy = "collapse"    # or "truncate"
//!
//! [timing]
//! quick_add_cooldown_secs = 3
//! search_debounce_ms = 300
//! ```
//!
//! Every section derives `Default`, so a missing or empty file is equivalent to
//! the built-in defaults listed on [`FieldBounds::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::numeric::DotPolicy;

/// Inclusive numeric bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-field bounds in canonical units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBounds {
    pub height_cm: Bounds,
    pub height_feet: Bounds,
    pub height_inches: Bounds,
    pub weight_lb: Bounds,
    pub daily_steps: Bounds,
    pub age: Bounds,
    pub exercise_minutes: Bounds,
    pub exercise_sets: Bounds,
    pub reps: Bounds,
    pub distance_km: Bounds,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            height_cm: Bounds::new(50.0, 304.8),
            height_feet: Bounds::new(1.0, 10.0),
            height_inches: Bounds::new(0.0, 11.0),
            weight_lb: Bounds::new(45.0, 1200.0),
            daily_steps: Bounds::new(0.0, 150_000.0),
            age: Bounds::new(13.0, 150.0),
            exercise_minutes: Bounds::new(1.0, 600.0),
            exercise_sets: Bounds::new(1.0, 100.0),
            reps: Bounds::new(1.0, 1000.0),
            distance_km: Bounds::new(0.0, 1000.0),
        }
    }
}

impl FieldBounds {
    /// Bounds for a numeric field, `None` for text fields.
    pub fn for_field(&self, field: Field) -> Option<Bounds> {
        match field {
            Field::Height => Some(self.height_cm),
            Field::HeightFeet => Some(self.height_feet),
            Field::HeightInches => Some(self.height_inches),
            Field::Weight => Some(self.weight_lb),
            Field::DailySteps => Some(self.daily_steps),
            Field::Age => Some(self.age),
            Field::ExerciseMinutes => Some(self.exercise_minutes),
            Field::ExerciseSets => Some(self.exercise_sets),
            Field::RepsMin | Field::RepsMax => Some(self.reps),
            Field::Distance => Some(self.distance_km),
            Field::ExerciseName | Field::Email | Field::Password | Field::ConfirmPassword => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default)]
    pub dot_policy: DotPolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// How long the quick-add control stays disabled after use.
    #[serde(default = "default_quick_add_cooldown")]
    pub quick_add_cooldown_secs: u32,
    /// Delay between the last keystroke and a search request.
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u32,
}

fn default_quick_add_cooldown() -> u32 {
    3
}

fn default_search_debounce() -> u32 {
    300
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            quick_add_cooldown_secs: default_quick_add_cooldown(),
            search_debounce_ms: default_search_debounce(),
        }
    }
}

impl TimingSettings {
    pub fn quick_add_cooldown(&self) -> Duration {
        Duration::from_secs(self.quick_add_cooldown_secs as u64)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms as u64)
    }
}

/// Top-level configuration stored in `forms.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default)]
    pub bounds: FieldBounds,
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub timing: TimingSettings,
}

impl FormSettings {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "forms.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
