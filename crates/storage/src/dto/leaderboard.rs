use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::StorageError;
use crate::models::WeightClass;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Wins,
    WinPct,
}

impl LeaderboardSort {
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Wins => "wins",
            Self::WinPct => "win_pct",
        }
    }
}

impl FromStr for LeaderboardSort {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(Self::Wins),
            "win_pct" => Ok(Self::WinPct),
            other => {
                error!("Invalid sort_by parameter: {}", other);
                Err(StorageError::InvalidArgument(format!(
                    "invalid sort_by parameter '{}', expected 'wins' or 'win_pct'",
                    other
                )))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub weight_class: WeightClass,
    pub fights: i64,
    pub wins: i64,
    pub win_pct: f64,
}

/// Wins over fights as a percentage, rounded half-to-even to one decimal place.
pub fn win_percentage(wins: i64, fights: i64) -> f64 {
    if fights <= 0 {
        return 0.0;
    }

    let pct = Decimal::from(wins) * Decimal::ONE_HUNDRED / Decimal::from(fights);
    decimal_to_f64(pct.round_dp(1))
}

fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}
