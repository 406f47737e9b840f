use serde::Serialize;
use storage::models::Boxer;
use tracing::{error, info, warn};

use crate::error::{Result, RingError};
use crate::random::RandomSource;
use crate::recorder::FightRecorder;
use crate::skill::{fighting_skill, win_probability};

pub const RING_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RingState {
    Empty,
    Waiting,
    Ready,
}

/// Two-slot ring holding the participants of the next bout, in entry order.
#[derive(Debug, Default)]
pub struct Ring {
    boxers: Vec<Boxer>,
}

impl Ring {
    pub fn new() -> Self {
        Self {
            boxers: Vec::with_capacity(RING_CAPACITY),
        }
    }

    pub fn state(&self) -> RingState {
        match self.boxers.len() {
            0 => RingState::Empty,
            1 => RingState::Waiting,
            _ => RingState::Ready,
        }
    }

    pub fn len(&self) -> usize {
        self.boxers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxers.is_empty()
    }

    pub fn get_boxers(&self) -> &[Boxer] {
        &self.boxers
    }

    pub fn enter_ring(&mut self, boxer: Boxer) -> Result<()> {
        if let Err(reason) = boxer.check_invariants() {
            error!("Rejected boxer '{}': {}", boxer.name(), reason);
            return Err(RingError::TypeMismatch(reason));
        }

        if self.boxers.len() >= RING_CAPACITY {
            warn!("Ring is full, cannot add {}", boxer.name());
            return Err(RingError::CapacityExceeded);
        }

        info!("{} entered the ring", boxer.name());
        self.boxers.push(boxer);
        Ok(())
    }

    pub fn clear_ring(&mut self) {
        if self.boxers.is_empty() {
            warn!("The ring was already empty");
            return;
        }

        self.boxers.clear();
        info!("The ring has been cleared");
    }

    /// Runs a bout between the two boxers in the ring and returns the winner's name.
    ///
    /// The first boxer wins when the draw falls below the logistic probability of
    /// the skill gap, whichever of the two is the stronger. The ring is only
    /// cleared once the result has been recorded; on any error it is left as is.
    pub async fn fight<S, R>(&mut self, random: &S, recorder: &R) -> Result<String>
    where
        S: RandomSource + ?Sized,
        R: FightRecorder + ?Sized,
    {
        let [boxer_1, boxer_2] = self.boxers.as_slice() else {
            error!(
                "Cannot start a fight with {} boxer(s) in the ring",
                self.boxers.len()
            );
            return Err(RingError::InsufficientParticipants);
        };

        let skill_1 = fighting_skill(boxer_1);
        let skill_2 = fighting_skill(boxer_2);
        let probability = win_probability(skill_1, skill_2);
        info!(
            "Fight: {} (skill {}) vs {} (skill {}), p = {}",
            boxer_1.name(),
            skill_1,
            boxer_2.name(),
            skill_2,
            probability
        );

        let draw = random.next_fraction().await?;

        let (winner, loser) = if draw < probability {
            (boxer_1, boxer_2)
        } else {
            (boxer_2, boxer_1)
        };
        info!("Draw {}: {} beat {}", draw, winner.name(), loser.name());

        recorder.record_bout(winner.id(), loser.id()).await?;

        let winner_name = winner.name().to_string();
        self.clear_ring();

        Ok(winner_name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use storage::error::{Result as StorageResult, StorageError};
    use storage::models::FightOutcome;

    use super::*;
    use crate::random::{FixedRandom, LocalRandom, RandomError};

    #[derive(Default)]
    struct MockRecorder {
        calls: Mutex<Vec<(i64, FightOutcome)>>,
        fail_on: Option<FightOutcome>,
    }

    impl MockRecorder {
        fn failing_on(outcome: FightOutcome) -> Self {
            Self {
                fail_on: Some(outcome),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(i64, FightOutcome)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl FightRecorder for MockRecorder {
        async fn record_result(&self, boxer_id: i64, outcome: FightOutcome) -> StorageResult<()> {
            if self.fail_on == Some(outcome) {
                return Err(StorageError::NotFound);
            }
            self.calls.lock().unwrap().push((boxer_id, outcome));
            Ok(())
        }
    }

    struct BrokenRandom;

    #[async_trait::async_trait]
    impl RandomSource for BrokenRandom {
        async fn next_fraction(&self) -> std::result::Result<f64, RandomError> {
            Err(RandomError::Timeout)
        }
    }

    fn ali() -> Boxer {
        Boxer::new(1, "Ali", 200, 180, 75.0, 30).unwrap()
    }

    fn tyson() -> Boxer {
        Boxer::new(2, "Tyson", 230, 185, 80.0, 35).unwrap()
    }

    fn full_ring() -> Ring {
        let mut ring = Ring::new();
        ring.enter_ring(ali()).unwrap();
        ring.enter_ring(tyson()).unwrap();
        ring
    }

    #[test]
    fn test_enter_ring_transitions() {
        let mut ring = Ring::new();
        assert_eq!(ring.state(), RingState::Empty);

        ring.enter_ring(ali()).unwrap();
        assert_eq!(ring.state(), RingState::Waiting);
        assert_eq!(ring.get_boxers()[0].name(), "Ali");

        ring.enter_ring(tyson()).unwrap();
        assert_eq!(ring.state(), RingState::Ready);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_full_ring_rejects_third_boxer() {
        let mut ring = full_ring();
        assert!(matches!(
            ring.enter_ring(ali()),
            Err(RingError::CapacityExceeded)
        ));
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_invalid_boxer_value_is_rejected() {
        let mut ring = Ring::new();
        let impostor: Boxer = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Impostor",
            "weight": 90,
            "height": 160,
            "reach": 60.0,
            "age": 30,
            "weight_class": "FEATHERWEIGHT"
        }))
        .unwrap();

        assert!(matches!(
            ring.enter_ring(impostor),
            Err(RingError::TypeMismatch(_))
        ));
        assert!(ring.is_empty());
    }

    #[test]
    fn test_clear_ring() {
        let mut ring = Ring::new();
        ring.enter_ring(ali()).unwrap();
        ring.clear_ring();
        assert!(ring.get_boxers().is_empty());

        // Clearing an empty ring is not an error
        ring.clear_ring();
        assert_eq!(ring.state(), RingState::Empty);
    }

    #[tokio::test]
    async fn test_fight_needs_two_boxers() {
        let recorder = MockRecorder::default();
        let random = FixedRandom::new(0.5).unwrap();

        let mut ring = Ring::new();
        assert!(matches!(
            ring.fight(&random, &recorder).await,
            Err(RingError::InsufficientParticipants)
        ));

        ring.enter_ring(ali()).unwrap();
        assert!(matches!(
            ring.fight(&random, &recorder).await,
            Err(RingError::InsufficientParticipants)
        ));
        assert_eq!(ring.len(), 1);
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_saturated_probability_favours_first_boxer() {
        let recorder = MockRecorder::default();
        let random = FixedRandom::new(0.999_999).unwrap();
        let mut ring = full_ring();

        let winner = ring.fight(&random, &recorder).await.unwrap();

        assert_eq!(winner, "Ali");
        assert!(ring.is_empty());
        assert_eq!(
            recorder.calls(),
            vec![(1, FightOutcome::Win), (2, FightOutcome::Loss)]
        );
    }

    #[tokio::test]
    async fn test_fight_with_extreme_weights() {
        let recorder = MockRecorder::default();
        let random = FixedRandom::new(0.5).unwrap();

        let mut ring = Ring::new();
        ring.enter_ring(Boxer::new(5, "Colossus", i64::MAX / 2, 210, 90.0, 30).unwrap())
            .unwrap();
        ring.enter_ring(tyson()).unwrap();

        assert_eq!(ring.fight(&random, &recorder).await.unwrap(), "Colossus");
        assert!(ring.is_empty());
    }

    #[tokio::test]
    async fn test_first_boxer_is_favoured_even_when_weaker() {
        let recorder = MockRecorder::default();
        let random = FixedRandom::new(0.9).unwrap();

        let mut ring = Ring::new();
        ring.enter_ring(tyson()).unwrap();
        ring.enter_ring(ali()).unwrap();

        // Tyson is first here and also the stronger one
        assert_eq!(ring.fight(&random, &recorder).await.unwrap(), "Tyson");

        ring.enter_ring(ali()).unwrap();
        ring.enter_ring(tyson()).unwrap();

        // Same gap, now the weaker Ali is first and gets the same favour
        assert_eq!(ring.fight(&random, &recorder).await.unwrap(), "Ali");
    }

    #[tokio::test]
    async fn test_even_fight_splits_at_one_half() {
        let twin_a = Boxer::new(10, "Klitschko", 245, 198, 81.0, 30).unwrap();
        let twin_b = Boxer::new(11, "Klitschko", 245, 198, 81.0, 30).unwrap();
        let recorder = MockRecorder::default();

        let mut ring = Ring::new();
        ring.enter_ring(twin_a.clone()).unwrap();
        ring.enter_ring(twin_b.clone()).unwrap();
        ring.fight(&FixedRandom::new(0.49).unwrap(), &recorder)
            .await
            .unwrap();

        ring.enter_ring(twin_a).unwrap();
        ring.enter_ring(twin_b).unwrap();
        ring.fight(&FixedRandom::new(0.5).unwrap(), &recorder)
            .await
            .unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                (10, FightOutcome::Win),
                (11, FightOutcome::Loss),
                (11, FightOutcome::Win),
                (10, FightOutcome::Loss),
            ]
        );
    }

    #[tokio::test]
    async fn test_fight_records_one_win_and_one_loss() {
        let random = LocalRandom::seeded(3);

        for _ in 0..20 {
            let recorder = MockRecorder::default();
            let mut ring = full_ring();

            let winner = ring.fight(&random, &recorder).await.unwrap();
            assert!(winner == "Ali" || winner == "Tyson");
            assert!(ring.get_boxers().is_empty());

            let calls = recorder.calls();
            assert_eq!(calls.len(), 2);
            let (winner_id, _) = calls
                .iter()
                .find(|(_, outcome)| *outcome == FightOutcome::Win)
                .copied()
                .unwrap();
            let (loser_id, _) = calls
                .iter()
                .find(|(_, outcome)| *outcome == FightOutcome::Loss)
                .copied()
                .unwrap();
            assert_ne!(winner_id, loser_id);
            assert_eq!(winner_id, if winner == "Ali" { 1 } else { 2 });
        }
    }

    #[tokio::test]
    async fn test_failed_draw_leaves_ring_untouched() {
        let recorder = MockRecorder::default();
        let mut ring = full_ring();

        let result = ring.fight(&BrokenRandom, &recorder).await;

        assert!(matches!(result, Err(RingError::Random(RandomError::Timeout))));
        assert_eq!(ring.state(), RingState::Ready);
        assert!(recorder.calls().is_empty());

        // The caller can retry with a working source
        let winner = ring
            .fight(&FixedRandom::new(0.1).unwrap(), &recorder)
            .await
            .unwrap();
        assert_eq!(winner, "Ali");
    }

    #[tokio::test]
    async fn test_failed_recording_leaves_ring_untouched() {
        let recorder = MockRecorder::failing_on(FightOutcome::Loss);
        let random = FixedRandom::new(0.1).unwrap();
        let mut ring = full_ring();

        let result = ring.fight(&random, &recorder).await;

        assert!(matches!(
            result,
            Err(RingError::Storage(StorageError::NotFound))
        ));
        assert_eq!(ring.len(), 2);
        // No compensation for the update that already went through
        assert_eq!(recorder.calls(), vec![(1, FightOutcome::Win)]);
    }

    #[tokio::test]
    async fn test_fight_against_database() {
        use storage::Database;
        use storage::dto::boxer::CreateBoxerRequest;
        use storage::dto::leaderboard::LeaderboardSort;
        use storage::repository::boxer::BoxerRepository;

        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        let repo = BoxerRepository::new(db.pool());

        let ali = repo
            .create(&CreateBoxerRequest::new("Ali", 200, 180, 75.0, 30))
            .await
            .unwrap();
        let tyson = repo
            .create(&CreateBoxerRequest::new("Tyson", 230, 185, 80.0, 35))
            .await
            .unwrap();

        let mut ring = Ring::new();
        ring.enter_ring(ali).unwrap();
        ring.enter_ring(tyson).unwrap();

        let winner = ring
            .fight(&FixedRandom::new(0.999_999).unwrap(), &repo)
            .await
            .unwrap();
        assert_eq!(winner, "Ali");

        let board = repo.leaderboard(LeaderboardSort::Wins).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!((board[0].name.as_str(), board[0].wins), ("Ali", 1));
        assert_eq!((board[1].name.as_str(), board[1].fights), ("Tyson", 1));
        assert_eq!(board[1].win_pct, 0.0);
    }
}
