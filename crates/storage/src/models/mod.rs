mod boxer;
mod fight_outcome;
mod weight_class;

pub use boxer::{Boxer, MAX_AGE, MIN_AGE};
pub use fight_outcome::FightOutcome;
pub use weight_class::{MIN_WEIGHT, WeightClass};
