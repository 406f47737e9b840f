use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for registering a new boxer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBoxerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(range(min = 125, message = "Weight must be at least 125"))]
    pub weight: i64,

    #[validate(range(min = 1, message = "Height must be greater than 0"))]
    pub height: i64,

    #[validate(
        range(exclusive_min = 0.0, message = "Reach must be greater than 0"),
        custom(function = "validate_reach")
    )]
    pub reach: f64,

    #[validate(range(min = 18, max = 40, message = "Age must be between 18 and 40"))]
    pub age: i64,
}

impl CreateBoxerRequest {
    pub fn new(name: impl Into<String>, weight: i64, height: i64, reach: f64, age: i64) -> Self {
        Self {
            name: name.into(),
            weight,
            height,
            reach,
            age,
        }
    }
}

fn validate_reach(reach: f64) -> Result<(), validator::ValidationError> {
    if reach.is_finite() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("non_finite_reach");
        error.message = Some("Reach must be a finite number".into());
        Err(error)
    }
}
