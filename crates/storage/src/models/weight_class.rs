use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{Result, StorageError};

/// Lightest weight a boxer may be registered with.
pub const MIN_WEIGHT: i64 = 125;

const LIGHTWEIGHT_FLOOR: i64 = 133;
const MIDDLEWEIGHT_FLOOR: i64 = 166;
const HEAVYWEIGHT_FLOOR: i64 = 203;

/// Weight band a boxer competes in. Every band is inclusive at its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightClass {
    Featherweight,
    Lightweight,
    Middleweight,
    Heavyweight,
}

impl WeightClass {
    pub fn classify(weight: i64) -> Result<Self> {
        let class = if weight >= HEAVYWEIGHT_FLOOR {
            Self::Heavyweight
        } else if weight >= MIDDLEWEIGHT_FLOOR {
            Self::Middleweight
        } else if weight >= LIGHTWEIGHT_FLOOR {
            Self::Lightweight
        } else if weight >= MIN_WEIGHT {
            Self::Featherweight
        } else {
            error!("Invalid weight: {}. Cannot assign weight class", weight);
            return Err(StorageError::InvalidAttribute(format!(
                "weight {} is below the minimum of {}",
                weight, MIN_WEIGHT
            )));
        };

        debug!("Assigned weight class {} for weight {}", class, weight);
        Ok(class)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featherweight => "FEATHERWEIGHT",
            Self::Lightweight => "LIGHTWEIGHT",
            Self::Middleweight => "MIDDLEWEIGHT",
            Self::Heavyweight => "HEAVYWEIGHT",
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
