use serde::{Deserialize, Serialize};

use super::weight_class::{MIN_WEIGHT, WeightClass};
use crate::error::{Result, StorageError};

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 40;

/// A registered boxer.
///
/// `weight_class` is derived from `weight` when the value is built and is never
/// recomputed afterwards, even if the stored row changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boxer {
    id: i64,
    name: String,
    weight: i64,
    height: i64,
    /// Distance from shoulder to fist.
    reach: f64,
    age: i64,
    weight_class: WeightClass,
}

impl Boxer {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        weight: i64,
        height: i64,
        reach: f64,
        age: i64,
    ) -> Result<Self> {
        let weight_class = WeightClass::classify(weight)?;

        let boxer = Self {
            id,
            name: name.into(),
            weight,
            height,
            reach,
            age,
            weight_class,
        };
        boxer
            .check_invariants()
            .map_err(StorageError::InvalidAttribute)?;

        Ok(boxer)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn reach(&self) -> f64 {
        self.reach
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn weight_class(&self) -> WeightClass {
        self.weight_class
    }

    /// Checks the field invariants. Values built through [`Boxer::new`] always
    /// pass; deserialized values may fail on any field.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.id <= 0 {
            return Err(format!("id must be positive, got {}", self.id));
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.weight < MIN_WEIGHT {
            return Err(format!(
                "weight must be at least {}, got {}",
                MIN_WEIGHT, self.weight
            ));
        }
        if self.height <= 0 {
            return Err(format!("height must be greater than 0, got {}", self.height));
        }
        if !(self.reach.is_finite() && self.reach > 0.0) {
            return Err(format!("reach must be greater than 0, got {}", self.reach));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(format!(
                "age must be between {} and {}, got {}",
                MIN_AGE, MAX_AGE, self.age
            ));
        }

        match WeightClass::classify(self.weight) {
            Ok(class) if class == self.weight_class => Ok(()),
            _ => Err(format!(
                "weight class {} does not match weight {}",
                self.weight_class, self.weight
            )),
        }
    }
}
