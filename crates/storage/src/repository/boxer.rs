use sqlx::{Executor, FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::boxer::CreateBoxerRequest;
use crate::dto::leaderboard::{LeaderboardEntry, LeaderboardSort, win_percentage};
use crate::error::{Result, StorageError};
use crate::models::{Boxer, FightOutcome, WeightClass};

#[derive(FromRow)]
struct BoxerRow {
    id: i64,
    name: String,
    weight: i64,
    height: i64,
    reach: f64,
    age: i64,
}

impl TryFrom<BoxerRow> for Boxer {
    type Error = StorageError;

    fn try_from(row: BoxerRow) -> Result<Self> {
        Boxer::new(row.id, row.name, row.weight, row.height, row.reach, row.age)
    }
}

#[derive(FromRow)]
struct LeaderboardRow {
    id: i64,
    name: String,
    weight: i64,
    height: i64,
    reach: f64,
    age: i64,
    fights: i64,
    wins: i64,
}

pub struct BoxerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BoxerRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all boxers
    pub async fn list(&self) -> Result<Vec<Boxer>> {
        let rows: Vec<BoxerRow> = sqlx::query_as(
            r#"
            SELECT id, name, weight, height, reach, age
            FROM boxers
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Boxer::try_from).collect()
    }

    /// Find boxer by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Boxer> {
        let row: Option<BoxerRow> = sqlx::query_as(
            r#"
            SELECT id, name, weight, height, reach, age
            FROM boxers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Boxer::try_from(row),
            None => {
                warn!("Boxer with ID {} not found", id);
                Err(StorageError::NotFound)
            }
        }
    }

    /// Find boxer by name
    pub async fn get_by_name(&self, name: &str) -> Result<Boxer> {
        let row: Option<BoxerRow> = sqlx::query_as(
            r#"
            SELECT id, name, weight, height, reach, age
            FROM boxers
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Boxer::try_from(row),
            None => {
                warn!("Boxer '{}' not found", name);
                Err(StorageError::NotFound)
            }
        }
    }

    /// Register a new boxer. Names are unique.
    pub async fn create(&self, req: &CreateBoxerRequest) -> Result<Boxer> {
        req.validate()?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM boxers WHERE name = ?1")
                .bind(&req.name)
                .fetch_one(self.pool)
                .await?;

        if existing > 0 {
            warn!("Boxer with name '{}' already exists", req.name);
            return Err(StorageError::DuplicateName(req.name.clone()));
        }

        let row: BoxerRow = sqlx::query_as(
            r#"
            INSERT INTO boxers (name, weight, height, reach, age)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, weight, height, reach, age
            "#,
        )
        .bind(&req.name)
        .bind(req.weight)
        .bind(req.height)
        .bind(req.reach)
        .bind(req.age)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::DuplicateName(req.name.clone())
            } else {
                e
            }
        })?;

        let boxer = Boxer::try_from(row)?;
        info!("Created boxer '{}' with ID {}", boxer.name(), boxer.id());

        Ok(boxer)
    }

    /// Delete a boxer by ID
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM boxers WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!("Boxer with ID {} was not found", id);
            return Err(StorageError::NotFound);
        }

        info!("Deleted boxer with ID {}", id);
        Ok(())
    }

    /// Boxers with at least one fight, best first. Weight classes are derived
    /// from the stored weight at query time.
    pub async fn leaderboard(&self, sort_by: LeaderboardSort) -> Result<Vec<LeaderboardEntry>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT id, name, weight, height, reach, age, fights, wins,
                   (wins * 1.0 / fights) AS win_pct
            FROM boxers
            WHERE fights > 0
            ORDER BY
            "#,
        );
        query.push(sort_by.as_column());
        query.push(" DESC, id ASC");

        let rows: Vec<LeaderboardRow> = query.build_query_as().fetch_all(self.pool).await?;

        info!(
            "Built leaderboard of {} boxers sorted by {}",
            rows.len(),
            sort_by.as_column()
        );

        rows.into_iter()
            .map(|row| {
                Ok(LeaderboardEntry {
                    weight_class: WeightClass::classify(row.weight)?,
                    win_pct: win_percentage(row.wins, row.fights),
                    id: row.id,
                    name: row.name,
                    weight: row.weight,
                    height: row.height,
                    reach: row.reach,
                    age: row.age,
                    fights: row.fights,
                    wins: row.wins,
                })
            })
            .collect()
    }

    /// Add one fight to a boxer's record, and one win when the outcome is a win.
    pub async fn record_result(&self, id: i64, outcome: FightOutcome) -> Result<()> {
        apply_result(self.pool, id, outcome).await?;
        info!("Recorded {} for boxer with ID {}", outcome, id);
        Ok(())
    }

    /// Record both sides of a bout in one transaction.
    pub async fn record_bout(&self, winner_id: i64, loser_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        apply_result(&mut *tx, winner_id, FightOutcome::Win).await?;
        apply_result(&mut *tx, loser_id, FightOutcome::Loss).await?;

        tx.commit().await?;
        info!(
            "Recorded bout: winner ID {}, loser ID {}",
            winner_id, loser_id
        );

        Ok(())
    }
}

async fn apply_result<'e, E>(executor: E, id: i64, outcome: FightOutcome) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE boxers
        SET fights = fights + 1,
            wins = wins + ?1
        WHERE id = ?2
        "#,
    )
    .bind(outcome.wins_increment())
    .bind(id)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        warn!("Boxer with ID {} not found while recording {}", id, outcome);
        return Err(StorageError::NotFound);
    }

    Ok(())
}
