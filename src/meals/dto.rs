use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::meals::repo::{Diet, Meal};
use crate::validate::Validate;

/// Shared create/update payload. Updates are full-field only; partial
/// updates are not supported.
#[derive(Debug, Deserialize)]
pub struct MealBody {
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub datetime: OffsetDateTime,
    pub diet: Diet,
}

impl Validate for MealBody {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must be non-empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("description must be non-empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
}

/// A miss is not a hard error here; the body carries `"meal": null`.
#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Option<Meal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Result<MealBody, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn canonical_payload_parses_and_validates() {
        let parsed = body(json!({
            "name": "Breakfast",
            "description": "Oatmeal with fruit",
            "datetime": "2024-01-02T08:30:00Z",
            "diet": "yes",
        }))
        .expect("payload should parse");
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.diet, Diet::Yes);
    }

    #[test]
    fn unknown_diet_value_fails_deserialization() {
        assert!(body(json!({
            "name": "Breakfast",
            "description": "Oatmeal",
            "datetime": "2024-01-02T08:30:00Z",
            "diet": "sometimes",
        }))
        .is_err());
    }

    #[test]
    fn malformed_datetime_fails_deserialization() {
        assert!(body(json!({
            "name": "Breakfast",
            "description": "Oatmeal",
            "datetime": "yesterday",
            "diet": "no",
        }))
        .is_err());
    }

    #[test]
    fn missing_field_fails_deserialization() {
        assert!(body(json!({
            "name": "Breakfast",
            "datetime": "2024-01-02T08:30:00Z",
            "diet": "no",
        }))
        .is_err());
    }

    #[test]
    fn blank_name_or_description_fails_validation() {
        let blank_name = body(json!({
            "name": "   ",
            "description": "Oatmeal",
            "datetime": "2024-01-02T08:30:00Z",
            "diet": "yes",
        }))
        .unwrap();
        assert!(matches!(
            blank_name.validate(),
            Err(AppError::Validation(_))
        ));

        let blank_description = body(json!({
            "name": "Breakfast",
            "description": "",
            "datetime": "2024-01-02T08:30:00Z",
            "diet": "yes",
        }))
        .unwrap();
        assert!(matches!(
            blank_description.validate(),
            Err(AppError::Validation(_))
        ));
    }
}
