//! Profile editing: height, weight, unit preferences, step goal and date of birth.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::field::Field;
use crate::numeric::{format_magnitude, parse_decimal};
use crate::range::{
    parse_required, validate, validate_count, validate_date_of_birth, validate_optional_count,
};
use crate::settings::FieldBounds;
use crate::units::{DistanceUnit, Height, HeightUnit, Weight, WeightUnit};

/// Profile edit form as typed by the user.
///
/// Height is kept as either a single cm field or a feet/inches pair depending on
/// `height_unit`; weight is entered in `weight_unit`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub height_unit: HeightUnit,
    pub height_cm: String,
    pub height_feet: String,
    pub height_inches: String,
    pub weight: String,
    pub weight_unit: WeightUnit,
    pub distance_unit: DistanceUnit,
    pub daily_step_goal: String,
    pub date_of_birth: Option<NaiveDate>,
}

/// Body of the profile update call, in canonical units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub height_cm: f64,
    pub weight_lb: f64,
    pub height_unit: HeightUnit,
    pub weight_unit: WeightUnit,
    pub distance_unit: DistanceUnit,
    pub daily_step_goal: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
}

impl ProfileDraft {
    /// Prefill the form from stored values, rendering them in the preferred units.
    pub fn from_payload(payload: &ProfilePayload) -> Self {
        let mut draft = Self {
            height_unit: payload.height_unit,
            weight_unit: payload.weight_unit,
            distance_unit: payload.distance_unit,
            daily_step_goal: payload
                .daily_step_goal
                .map(|s| s.to_string())
                .unwrap_or_default(),
            date_of_birth: payload.date_of_birth,
            ..Self::default()
        };
        draft.set_height(Height::from_cm(payload.height_cm, payload.height_unit));
        draft.weight =
            format_magnitude(Weight::from_lb(payload.weight_lb, payload.weight_unit).magnitude);
        draft
    }

    /// Validate in field order (height, weight, step goal, date of birth).
    pub fn validate(
        &self,
        bounds: &FieldBounds,
        today: NaiveDate,
    ) -> Result<ProfilePayload, FormError> {
        let height = self.height(bounds)?;
        let height_cm = validate(bounds, Field::Height, height.to_cm())?;

        let magnitude = parse_required(Field::Weight, &self.weight)?;
        let weight_lb = validate(
            bounds,
            Field::Weight,
            Weight::new(magnitude, self.weight_unit).to_lb(),
        )?;

        let daily_step_goal =
            validate_optional_count(bounds, Field::DailySteps, &self.daily_step_goal)?;

        if let Some(dob) = self.date_of_birth {
            validate_date_of_birth(bounds, dob, today)?;
        }

        Ok(ProfilePayload {
            height_cm,
            weight_lb,
            height_unit: self.height_unit,
            weight_unit: self.weight_unit,
            distance_unit: self.distance_unit,
            daily_step_goal,
            date_of_birth: self.date_of_birth,
        })
    }

    /// Switch the height unit, converting the current value when it parses.
    pub fn switch_height_unit(&mut self, unit: HeightUnit) {
        if unit == self.height_unit {
            return;
        }
        let current = self.parsed_height();
        self.height_unit = unit;
        if let Some(height) = current {
            self.set_height(Height::from_cm(height.to_cm(), unit));
        }
    }

    /// Switch the weight unit, converting the current value when it parses.
    pub fn switch_weight_unit(&mut self, unit: WeightUnit) {
        if unit == self.weight_unit {
            return;
        }
        if let Some(magnitude) = parse_decimal(&self.weight) {
            let lb = Weight::new(magnitude, self.weight_unit).to_lb();
            self.weight = format_magnitude(Weight::from_lb(lb, unit).magnitude);
        }
        self.weight_unit = unit;
    }

    fn set_height(&mut self, height: Height) {
        match height {
            Height::Cm(cm) => self.height_cm = format_magnitude(cm),
            Height::FtIn { feet, inches } => {
                self.height_feet = format_magnitude(feet);
                self.height_inches = format_magnitude(inches);
            }
        }
    }

    fn parsed_height(&self) -> Option<Height> {
        match self.height_unit {
            HeightUnit::Cm => parse_decimal(&self.height_cm).map(Height::Cm),
            HeightUnit::FtIn => parse_decimal(&self.height_feet).map(|feet| Height::FtIn {
                feet,
                inches: parse_decimal(&self.height_inches).unwrap_or(0.0),
            }),
        }
    }

    fn height(&self, bounds: &FieldBounds) -> Result<Height, FormError> {
        match self.height_unit {
            HeightUnit::Cm => parse_required(Field::Height, &self.height_cm).map(Height::Cm),
            HeightUnit::FtIn => {
                let feet = validate_count(bounds, Field::HeightFeet, &self.height_feet)?;
                let inches =
                    validate_optional_count(bounds, Field::HeightInches, &self.height_inches)?;
                Ok(Height::FtIn {
                    feet: feet as f64,
                    inches: inches.unwrap_or(0) as f64,
                })
            }
        }
    }
}
