//! # Range validation
//!
//! Two behaviours share the same [`FieldBounds`]:
//!
//! - **While typing**, [`clamp_while_typing`] filters the text and replaces a value
//!   above the field maximum with the maximum itself. Values below the minimum are
//!   left alone so the user can keep typing (`"1"` on the way to `"150"`).
//! - **On submit**, [`validate`] / [`validate_text`] reject non-numeric input with
//!   [`FormError::Format`] and out-of-range input with [`FormError::Range`].
//!
//! Bounds are inclusive on both ends.

use chrono::{Datelike, NaiveDate};

use crate::error::FormError;
use crate::field::Field;
use crate::numeric::{
    filter_integer_input, filter_numeric_input_with, format_magnitude, parse_decimal, DotPolicy,
};
use crate::settings::FieldBounds;

/// Check an already-parsed magnitude against the field bounds.
pub fn validate(bounds: &FieldBounds, field: Field, magnitude: f64) -> Result<f64, FormError> {
    if !magnitude.is_finite() {
        return Err(FormError::Format { field });
    }
    match bounds.for_field(field) {
        Some(b) if !b.contains(magnitude) => Err(FormError::Range {
            field,
            min: b.min,
            max: b.max,
        }),
        _ => Ok(magnitude),
    }
}

/// Parse and check a required field.
pub fn validate_text(bounds: &FieldBounds, field: Field, text: &str) -> Result<f64, FormError> {
    validate_optional_text(bounds, field, text)?.ok_or(FormError::RequiredField(field))
}

/// Parse and check an optional field. Blank text is `Ok(None)`.
pub fn validate_optional_text(
    bounds: &FieldBounds,
    field: Field,
    text: &str,
) -> Result<Option<f64>, FormError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value = parse_decimal(text).ok_or(FormError::Format { field })?;
    if field.is_integer() && value.fract() != 0.0 {
        return Err(FormError::Format { field });
    }
    validate(bounds, field, value).map(Some)
}

/// Parse a required field without checking bounds, for values that are
/// converted to a canonical unit before the range check.
pub fn parse_required(field: Field, text: &str) -> Result<f64, FormError> {
    if text.trim().is_empty() {
        return Err(FormError::RequiredField(field));
    }
    parse_decimal(text).ok_or(FormError::Format { field })
}

/// Required whole-number field.
pub fn validate_count(bounds: &FieldBounds, field: Field, text: &str) -> Result<u32, FormError> {
    validate_text(bounds, field, text).and_then(|v| to_count(field, v))
}

/// Optional whole-number field.
pub fn validate_optional_count(
    bounds: &FieldBounds,
    field: Field,
    text: &str,
) -> Result<Option<u32>, FormError> {
    validate_optional_text(bounds, field, text)?
        .map(|v| to_count(field, v))
        .transpose()
}

fn to_count(field: Field, value: f64) -> Result<u32, FormError> {
    if value < 0.0 || value > u32::MAX as f64 {
        return Err(FormError::Format { field });
    }
    Ok(value as u32)
}

/// Filter keystroke text for `field` and clamp anything above the maximum.
pub fn clamp_while_typing(
    bounds: &FieldBounds,
    field: Field,
    raw: &str,
    policy: DotPolicy,
) -> String {
    clamp_to_max(field, raw, bounds.for_field(field).map(|b| b.max), policy)
}

/// Same as [`clamp_while_typing`] with an explicit maximum, for fields typed
/// in a display unit other than the canonical one.
pub fn clamp_to_max(field: Field, raw: &str, max: Option<f64>, policy: DotPolicy) -> String {
    let filtered = if field.is_integer() {
        filter_integer_input(raw)
    } else {
        filter_numeric_input_with(raw, policy)
    };
    // Digit runs too long for an f64 parse to infinity, which is above any max.
    let magnitude = match filtered.as_str() {
        "" | "." => None,
        digits => digits.parse::<f64>().ok(),
    };
    match (magnitude, max) {
        (Some(value), Some(max)) if value > max => format_magnitude(max),
        _ => filtered,
    }
}

/// Completed years between `dob` and `today`. Negative when `dob` is in the future.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Validate a date of birth through the age bounds.
pub fn validate_date_of_birth(
    bounds: &FieldBounds,
    dob: NaiveDate,
    today: NaiveDate,
) -> Result<u32, FormError> {
    let age = age_on(dob, today);
    if age < 0 {
        return Err(FormError::Format { field: Field::Age });
    }
    validate(bounds, Field::Age, age as f64).map(|a| a as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Weight, WeightUnit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_height_boundaries_are_inclusive() {
        let bounds = FieldBounds::default();
        assert_eq!(
            validate(&bounds, Field::Height, 49.9),
            Err(FormError::Range {
                field: Field::Height,
                min: 50.0,
                max: 304.8
            })
        );
        assert_eq!(validate(&bounds, Field::Height, 50.0), Ok(50.0));
        assert_eq!(validate(&bounds, Field::Height, 304.8), Ok(304.8));
        assert!(validate(&bounds, Field::Height, 304.81).is_err());
    }

    #[test]
    fn test_weight_boundaries() {
        let bounds = FieldBounds::default();
        assert!(validate(&bounds, Field::Weight, 44.99).is_err());
        assert_eq!(validate(&bounds, Field::Weight, 45.0), Ok(45.0));
        assert_eq!(validate(&bounds, Field::Weight, 1200.0), Ok(1200.0));
    }

    #[test]
    fn test_non_finite_is_format_error() {
        let bounds = FieldBounds::default();
        assert_eq!(
            validate(&bounds, Field::Weight, f64::NAN),
            Err(FormError::Format {
                field: Field::Weight
            })
        );
    }

    #[test]
    fn test_validate_text() {
        let bounds = FieldBounds::default();
        assert_eq!(validate_text(&bounds, Field::Height, "180"), Ok(180.0));
        assert_eq!(
            validate_text(&bounds, Field::Height, ""),
            Err(FormError::RequiredField(Field::Height))
        );
        assert_eq!(
            validate_text(&bounds, Field::Height, "."),
            Err(FormError::Format {
                field: Field::Height
            })
        );
        assert_eq!(validate_optional_text(&bounds, Field::Distance, "  "), Ok(None));
    }

    #[test]
    fn test_counts_reject_fractions() {
        let bounds = FieldBounds::default();
        assert_eq!(validate_count(&bounds, Field::ExerciseSets, "4"), Ok(4));
        assert_eq!(
            validate_count(&bounds, Field::ExerciseSets, "4.5"),
            Err(FormError::Format {
                field: Field::ExerciseSets
            })
        );
        assert_eq!(
            validate_count(&bounds, Field::ExerciseSets, "0"),
            Err(FormError::Range {
                field: Field::ExerciseSets,
                min: 1.0,
                max: 100.0
            })
        );
        assert_eq!(validate_optional_count(&bounds, Field::RepsMin, ""), Ok(None));
    }

    #[test]
    fn test_steps_clamp_while_typing() {
        let bounds = FieldBounds::default();
        let clamped = clamp_while_typing(&bounds, Field::DailySteps, "150001", DotPolicy::Collapse);
        assert_eq!(clamped, "150000");
        assert_eq!(validate_count(&bounds, Field::DailySteps, &clamped), Ok(150_000));
        assert_eq!(
            clamp_while_typing(&bounds, Field::DailySteps, "9,999,999", DotPolicy::Collapse),
            "150000"
        );
        assert_eq!(
            clamp_while_typing(&bounds, Field::DailySteps, "8000", DotPolicy::Collapse),
            "8000"
        );
    }

    #[test]
    fn test_overflowing_digits_clamp_to_max() {
        let bounds = FieldBounds::default();
        let nines = "9".repeat(400);
        assert_eq!(
            clamp_while_typing(&bounds, Field::DailySteps, &nines, DotPolicy::Collapse),
            "150000"
        );
        let long_fraction = format!("{}.5", nines);
        let clamped = clamp_while_typing(&bounds, Field::Weight, &long_fraction, DotPolicy::Collapse);
        assert_eq!(clamped, format_magnitude(bounds.weight_lb.max));
    }

    #[test]
    fn test_clamp_leaves_low_values_for_submit() {
        let bounds = FieldBounds::default();
        assert_eq!(
            clamp_while_typing(&bounds, Field::Height, "1", DotPolicy::Collapse),
            "1"
        );
        assert_eq!(
            clamp_while_typing(&bounds, Field::Height, "400.5", DotPolicy::Collapse),
            "304.8"
        );
        assert_eq!(
            clamp_while_typing(&bounds, Field::ExerciseMinutes, "90 min", DotPolicy::Collapse),
            "90"
        );
    }

    #[test]
    fn test_clamp_to_display_unit_max() {
        let max_kg = Weight::from_lb(FieldBounds::default().weight_lb.max, WeightUnit::Kg).magnitude;
        assert_eq!(clamp_to_max(Field::Weight, "600", Some(max_kg), DotPolicy::Collapse), "544.3");
        assert_eq!(clamp_to_max(Field::Weight, "80.5", Some(max_kg), DotPolicy::Collapse), "80.5");
        assert_eq!(clamp_to_max(Field::Weight, "99999", None, DotPolicy::Collapse), "99999");
    }

    #[test]
    fn test_age_on() {
        assert_eq!(age_on(date(2000, 6, 15), date(2026, 6, 14)), 25);
        assert_eq!(age_on(date(2000, 6, 15), date(2026, 6, 15)), 26);
        assert_eq!(age_on(date(2030, 1, 1), date(2026, 1, 1)), -4);
    }

    #[test]
    fn test_date_of_birth_bounds() {
        let bounds = FieldBounds::default();
        let today = date(2026, 10, 16);
        assert_eq!(validate_date_of_birth(&bounds, date(1990, 1, 1), today), Ok(36));
        assert_eq!(validate_date_of_birth(&bounds, date(2013, 10, 16), today), Ok(13));
        assert!(matches!(
            validate_date_of_birth(&bounds, date(2013, 10, 17), today),
            Err(FormError::Range { field: Field::Age, .. })
        ));
        assert_eq!(
            validate_date_of_birth(&bounds, date(2027, 1, 1), today),
            Err(FormError::Format { field: Field::Age })
        );
    }
}
