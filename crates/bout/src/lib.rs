pub mod error;
pub mod random;
pub mod recorder;
pub mod ring;
pub mod skill;

pub use error::{Result, RingError};
pub use random::{FixedRandom, LocalRandom, RandomError, RandomOrgClient, RandomSource};
pub use recorder::FightRecorder;
pub use ring::{RING_CAPACITY, Ring, RingState};
pub use skill::{fighting_skill, win_probability};
