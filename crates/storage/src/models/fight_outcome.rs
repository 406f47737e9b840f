use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::StorageError;

/// Result of a single bout from one boxer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightOutcome {
    Win,
    Loss,
}

impl FightOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }

    /// Amount added to the wins counter.
    pub fn wins_increment(&self) -> i64 {
        match self {
            Self::Win => 1,
            Self::Loss => 0,
        }
    }
}

impl fmt::Display for FightOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FightOutcome {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            other => {
                error!("Invalid result provided: {}", other);
                Err(StorageError::InvalidArgument(format!(
                    "invalid result '{}', expected 'win' or 'loss'",
                    other
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_parsing() {
        assert_eq!("win".parse::<FightOutcome>().unwrap(), FightOutcome::Win);
        assert_eq!("loss".parse::<FightOutcome>().unwrap(), FightOutcome::Loss);
        assert!(matches!(
            "draw".parse::<FightOutcome>(),
            Err(StorageError::InvalidArgument(_))
        ));
        assert!("WIN".parse::<FightOutcome>().is_err());
    }
}
