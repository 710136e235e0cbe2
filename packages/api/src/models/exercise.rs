//! `exercise_logs` rows.
//!
//! The category is the tag of a variant: a strength row must not carry minutes or
//! distance, a cardio / mind-body row must not carry sets or reps. Rows that break
//! this are rejected by [`ExerciseLogRow::check_variant`] when they are decoded.

use chrono::{DateTime, Utc};
use forms::{ExerciseCategory, ExerciseLogPayload, Intensity};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExerciseLogRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub minutes: Option<u32>,
    pub sets: Option<u32>,
    pub distance_km: Option<f64>,
    pub reps_min: Option<u32>,
    pub reps_max: Option<u32>,
    pub intensity: Option<Intensity>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl ExerciseLogRow {
    pub const COLUMNS: &'static str =
        "id,user_id,name,category,minutes,sets,distance_km,reps_min,reps_max,intensity,notes,logged_at";

    pub fn from_payload(
        id: String,
        user_id: String,
        payload: &ExerciseLogPayload,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name: payload.name.clone(),
            category: payload.category,
            minutes: payload.minutes,
            sets: payload.sets,
            distance_km: payload.distance_km,
            reps_min: payload.reps_min,
            reps_max: payload.reps_max,
            intensity: payload.intensity,
            notes: payload.notes.clone(),
            logged_at,
        }
    }

    pub fn to_payload(&self) -> ExerciseLogPayload {
        ExerciseLogPayload {
            name: self.name.clone(),
            category: self.category,
            minutes: self.minutes,
            sets: self.sets,
            distance_km: self.distance_km,
            reps_min: self.reps_min,
            reps_max: self.reps_max,
            intensity: self.intensity,
            notes: self.notes.clone(),
        }
    }

    /// Reject rows carrying fields of the other category.
    pub fn check_variant(self) -> Result<Self, ApiError> {
        let stray = match self.category {
            ExerciseCategory::Strength => self.minutes.is_some() || self.distance_km.is_some(),
            ExerciseCategory::CardioMindBody => {
                self.sets.is_some() || self.reps_min.is_some() || self.reps_max.is_some()
            }
        };
        if stray {
            return Err(ApiError::Shape(format!(
                "exercise log {} has fields of the other category",
                self.id
            )));
        }
        Ok(self)
    }
}
