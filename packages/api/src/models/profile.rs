use chrono::{DateTime, NaiveDate, Utc};
use forms::{DistanceUnit, HeightUnit, ProfilePayload, WeightUnit};
use serde::{Deserialize, Serialize};

/// A row of the `profiles` table. Measurements are in canonical units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileRow {
    pub id: String,
    pub display_name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_lb: Option<f64>,
    pub height_unit: HeightUnit,
    pub weight_unit: WeightUnit,
    pub distance_unit: DistanceUnit,
    pub daily_step_goal: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    pub const COLUMNS: &'static str = "id,display_name,height_cm,weight_lb,height_unit,weight_unit,distance_unit,daily_step_goal,date_of_birth,updated_at";

    /// The editable part of the profile, once height and weight have been set.
    pub fn to_payload(&self) -> Option<ProfilePayload> {
        Some(ProfilePayload {
            height_cm: self.height_cm?,
            weight_lb: self.weight_lb?,
            height_unit: self.height_unit,
            weight_unit: self.weight_unit,
            distance_unit: self.distance_unit,
            daily_step_goal: self.daily_step_goal,
            date_of_birth: self.date_of_birth,
        })
    }

    /// Apply a validated update.
    pub fn apply(&mut self, payload: &ProfilePayload, now: DateTime<Utc>) {
        self.height_cm = Some(payload.height_cm);
        self.weight_lb = Some(payload.weight_lb);
        self.height_unit = payload.height_unit;
        self.weight_unit = payload.weight_unit;
        self.distance_unit = payload.distance_unit;
        self.daily_step_goal = payload.daily_step_goal;
        self.date_of_birth = payload.date_of_birth;
        self.updated_at = now;
    }

    /// A freshly created profile with nothing filled in yet.
    pub fn empty(id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            display_name: None,
            height_cm: None,
            weight_lb: None,
            height_unit: HeightUnit::default(),
            weight_unit: WeightUnit::default(),
            distance_unit: DistanceUnit::default(),
            daily_step_goal: None,
            date_of_birth: None,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_profile_row() {
        let row: ProfileRow = serde_json::from_str(
            r#"{
                "id": "u1",
                "display_name": "Sam",
                "height_cm": 182.88,
                "weight_lb": 154.32,
                "height_unit": "ft_in",
                "weight_unit": "kg",
                "distance_unit": "mi",
                "daily_step_goal": 10000,
                "date_of_birth": "1990-04-02",
                "updated_at": "2026-10-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        let payload = row.to_payload().unwrap();
        assert_eq!(payload.height_unit, HeightUnit::FtIn);
        assert_eq!(payload.weight_lb, 154.32);
        assert_eq!(payload.distance_unit, DistanceUnit::Mi);
    }

    #[test]
    fn test_rejects_unexpected_columns() {
        let result: Result<ProfileRow, _> = serde_json::from_str(
            r#"{
                "id": "u1",
                "display_name": null,
                "height_cm": null,
                "weight_lb": null,
                "height_unit": "cm",
                "weight_unit": "lb",
                "distance_unit": "km",
                "daily_step_goal": null,
                "date_of_birth": null,
                "updated_at": "2026-10-01T12:00:00Z",
                "is_admin": true
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_unit() {
        let result: Result<HeightUnit, _> = serde_json::from_str(r#""inches""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_incomplete_profile_has_no_payload() {
        let row = ProfileRow::empty("u1", Utc::now());
        assert_eq!(row.to_payload(), None);
    }
}
