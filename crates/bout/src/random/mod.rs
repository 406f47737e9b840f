//! Sources of the uniform draw that decides a fight.
//!
//! [`RandomOrgClient`] asks random.org over HTTP, [`LocalRandom`] uses an
//! in-process generator and [`FixedRandom`] always answers the same value.

mod random_org;

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub use random_org::{DEFAULT_TIMEOUT, RANDOM_ORG_URL, RandomOrgClient, parse_fraction};

#[derive(Debug, Error)]
pub enum RandomError {
    #[error("Request to random source timed out")]
    Timeout,

    #[error("Request to random source failed: {0}")]
    Source(String),

    #[error("Invalid response from random source: {0}")]
    MalformedResponse(String),
}

#[async_trait::async_trait]
pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, 1)`.
    async fn next_fraction(&self) -> Result<f64, RandomError>;
}

pub struct LocalRandom {
    rng: Mutex<StdRng>,
}

impl LocalRandom {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for LocalRandom {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RandomSource for LocalRandom {
    async fn next_fraction(&self) -> Result<f64, RandomError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(rng.gen_range(0.0..1.0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    value: f64,
}

impl FixedRandom {
    pub fn new(value: f64) -> Result<Self, RandomError> {
        check_range(value)?;
        Ok(Self { value })
    }
}

#[async_trait::async_trait]
impl RandomSource for FixedRandom {
    async fn next_fraction(&self) -> Result<f64, RandomError> {
        Ok(self.value)
    }
}

fn check_range(value: f64) -> Result<f64, RandomError> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RandomError::MalformedResponse(format!(
            "{} is outside [0, 1)",
            value
        )))
    }
}
