//! # Exercise log drafts
//!
//! An exercise log is either *cardio / mind-body* (minutes and distance) or
//! *strength* (sets and rep range). The category decides which fields are
//! relevant: [`ExerciseLogDraft::validate`] only checks the fields of the chosen
//! category, and [`ExerciseLogPayload::null_irrelevant`] clears the others so the
//! backend never stores cardio values on a strength log or the other way round.
//!
//! Validation order: name, then minutes → distance (cardio) or
//! sets → reps min → reps max (strength).

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::field::Field;
use crate::numeric::{format_magnitude, parse_decimal};
use crate::range::{validate, validate_count, validate_optional_count};
use crate::settings::FieldBounds;
use crate::units::{Distance, DistanceUnit};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    #[default]
    CardioMindBody,
    Strength,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

/// In-progress exercise log as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExerciseLogDraft {
    pub name: String,
    pub category: ExerciseCategory,
    pub minutes: String,
    pub sets: String,
    pub distance: String,
    pub distance_unit: DistanceUnit,
    pub reps_min: String,
    pub reps_max: String,
    pub intensity: Option<Intensity>,
    pub notes: String,
}

/// Body of the exercise log create/update call.
///
/// `None` serializes as an explicit `null` so an update clears stale values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLogPayload {
    pub name: String,
    pub category: ExerciseCategory,
    pub minutes: Option<u32>,
    pub sets: Option<u32>,
    pub distance_km: Option<f64>,
    pub reps_min: Option<u32>,
    pub reps_max: Option<u32>,
    pub intensity: Option<Intensity>,
    pub notes: Option<String>,
}

impl ExerciseLogPayload {
    /// Clear the fields that do not belong to the payload's category.
    pub fn null_irrelevant(mut self) -> Self {
        match self.category {
            ExerciseCategory::Strength => {
                self.minutes = None;
                self.distance_km = None;
            }
            ExerciseCategory::CardioMindBody => {
                self.sets = None;
                self.reps_min = None;
                self.reps_max = None;
            }
        }
        self
    }
}

impl ExerciseLogDraft {
    pub fn new(category: ExerciseCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Prefill a draft from a saved log for the edit modal.
    pub fn from_payload(payload: &ExerciseLogPayload, distance_unit: DistanceUnit) -> Self {
        let count = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            name: payload.name.clone(),
            category: payload.category,
            minutes: count(payload.minutes),
            sets: count(payload.sets),
            distance: payload
                .distance_km
                .map(|km| format_magnitude(Distance::from_km(km, distance_unit).magnitude))
                .unwrap_or_default(),
            distance_unit,
            reps_min: count(payload.reps_min),
            reps_max: count(payload.reps_max),
            intensity: payload.intensity,
            notes: payload.notes.clone().unwrap_or_default(),
        }
    }

    /// Validate the fields of the selected category and build the payload.
    pub fn validate(&self, bounds: &FieldBounds) -> Result<ExerciseLogPayload, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::RequiredField(Field::ExerciseName));
        }

        let mut payload = ExerciseLogPayload {
            name: name.to_string(),
            category: self.category,
            minutes: None,
            sets: None,
            distance_km: None,
            reps_min: None,
            reps_max: None,
            intensity: self.intensity,
            notes: Some(self.notes.trim().to_string()).filter(|n| !n.is_empty()),
        };

        match self.category {
            ExerciseCategory::CardioMindBody => {
                payload.minutes = Some(validate_count(bounds, Field::ExerciseMinutes, &self.minutes)?);
                payload.distance_km = self.distance_km(bounds)?;
            }
            ExerciseCategory::Strength => {
                payload.sets = Some(validate_count(bounds, Field::ExerciseSets, &self.sets)?);
                payload.reps_min = validate_optional_count(bounds, Field::RepsMin, &self.reps_min)?;
                payload.reps_max = validate_optional_count(bounds, Field::RepsMax, &self.reps_max)?;
                if let (Some(min), Some(max)) = (payload.reps_min, payload.reps_max) {
                    if max < min {
                        return Err(FormError::Range {
                            field: Field::RepsMax,
                            min: min as f64,
                            max: bounds.reps.max,
                        });
                    }
                }
            }
        }

        Ok(payload.null_irrelevant())
    }

    /// Switch the distance unit, converting the typed distance when it parses.
    pub fn switch_distance_unit(&mut self, unit: DistanceUnit) {
        if unit == self.distance_unit {
            return;
        }
        if let Some(magnitude) = parse_decimal(&self.distance) {
            let km = Distance::new(magnitude, self.distance_unit).to_km();
            self.distance = format_magnitude(Distance::from_km(km, unit).magnitude);
        }
        self.distance_unit = unit;
    }

    fn distance_km(&self, bounds: &FieldBounds) -> Result<Option<f64>, FormError> {
        if self.distance.trim().is_empty() {
            return Ok(None);
        }
        let magnitude = parse_decimal(&self.distance).ok_or(FormError::Format {
            field: Field::Distance,
        })?;
        let km = Distance::new(magnitude, self.distance_unit).to_km();
        validate(bounds, Field::Distance, km).map(Some)
    }
}
