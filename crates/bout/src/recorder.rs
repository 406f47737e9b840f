use storage::error::Result;
use storage::models::FightOutcome;
use storage::repository::boxer::BoxerRepository;

/// Where the ring reports bout results.
#[async_trait::async_trait]
pub trait FightRecorder: Send + Sync {
    async fn record_result(&self, boxer_id: i64, outcome: FightOutcome) -> Result<()>;

    /// Records the winner first, then the loser. A failure on the loser does not
    /// undo the winner's update; implementors that can do better override this.
    async fn record_bout(&self, winner_id: i64, loser_id: i64) -> Result<()> {
        self.record_result(winner_id, FightOutcome::Win).await?;
        self.record_result(loser_id, FightOutcome::Loss).await
    }
}

#[async_trait::async_trait]
impl FightRecorder for BoxerRepository<'_> {
    async fn record_result(&self, boxer_id: i64, outcome: FightOutcome) -> Result<()> {
        BoxerRepository::record_result(self, boxer_id, outcome).await
    }

    async fn record_bout(&self, winner_id: i64, loser_id: i64) -> Result<()> {
        BoxerRepository::record_bout(self, winner_id, loser_id).await
    }
}
