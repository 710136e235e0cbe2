//! Form field identifiers shared by validation errors and bounds lookups.

use std::fmt;

/// A user-editable field on one of the forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Height,
    HeightFeet,
    HeightInches,
    Weight,
    DailySteps,
    Age,
    ExerciseName,
    ExerciseMinutes,
    ExerciseSets,
    Distance,
    RepsMin,
    RepsMax,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Human readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Height => "Height",
            Field::HeightFeet => "Feet",
            Field::HeightInches => "Inches",
            Field::Weight => "Weight",
            Field::DailySteps => "Daily step goal",
            Field::Age => "Age",
            Field::ExerciseName => "Exercise name",
            Field::ExerciseMinutes => "Minutes",
            Field::ExerciseSets => "Sets",
            Field::Distance => "Distance",
            Field::RepsMin => "Minimum reps",
            Field::RepsMax => "Maximum reps",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Password confirmation",
        }
    }

    /// Whether the field only accepts whole numbers.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Field::HeightFeet
                | Field::HeightInches
                | Field::DailySteps
                | Field::Age
                | Field::ExerciseMinutes
                | Field::ExerciseSets
                | Field::RepsMin
                | Field::RepsMax
        )
    }

    /// Canonical unit appended to range messages, empty for plain counts.
    pub fn unit_suffix(&self) -> &'static str {
        match self {
            Field::Height => " cm",
            Field::Weight => " lb",
            Field::Distance => " km",
            Field::Age => " years",
            _ => "",
        }
    }

    pub(crate) fn format_message(&self) -> String {
        match self {
            Field::Email => "Please enter a valid email".to_string(),
            Field::Age => "Please enter a valid date of birth".to_string(),
            _ if self.is_integer() => format!("{} must be a whole number", self.label()),
            _ => format!("{} must be a number", self.label()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
