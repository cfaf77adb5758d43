//! PostgreSQL implementation of the ScoreStore trait
//!
//! One row per (community, user). `apply_delta` and `set_score` are single
//! upsert statements, so per-record atomicity holds at the database level
//! even without the service-layer record lock.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use karma_core::{CoreResult, ScoreRecord, ScoreStore, Snowflake};

use crate::models::ScoreModel;

use super::error::map_db_error;

/// Create the `scores` table and its indexes if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> CoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scores
        (
            points       BIGINT DEFAULT 0 NOT NULL,
            user_id      BIGINT           NOT NULL,
            community_id BIGINT           NOT NULL,
            CONSTRAINT scores_pk
                PRIMARY KEY (user_id, community_id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS scores_community_points_index
            ON scores (community_id, points DESC)",
    )
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// PostgreSQL implementation of ScoreStore
#[derive(Clone)]
pub struct PgScoreStore {
    pool: PgPool,
}

impl PgScoreStore {
    /// Create a new PgScoreStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for PgScoreStore {
    #[instrument(skip(self))]
    async fn get_score(&self, community_id: Snowflake, user_id: Snowflake) -> CoreResult<i64> {
        let points: Option<(i64,)> = sqlx::query_as(
            "SELECT points FROM scores WHERE user_id = $1 AND community_id = $2",
        )
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(points.map_or(0, |(p,)| p))
    }

    #[instrument(skip(self))]
    async fn apply_delta(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        delta: i64,
    ) -> CoreResult<i64> {
        let (points,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO scores (points, user_id, community_id)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT scores_pk
                DO UPDATE SET points = scores.points + EXCLUDED.points
            RETURNING points
            "#,
        )
        .bind(delta)
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(points)
    }

    #[instrument(skip(self))]
    async fn set_score(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        points: i64,
    ) -> CoreResult<i64> {
        let (points,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO scores (points, user_id, community_id)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT scores_pk
                DO UPDATE SET points = EXCLUDED.points
            RETURNING points
            "#,
        )
        .bind(points)
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(points)
    }

    #[instrument(skip(self))]
    async fn top_scores(
        &self,
        community_id: Snowflake,
        limit: i64,
    ) -> CoreResult<Vec<ScoreRecord>> {
        let limit = limit.clamp(1, 100);

        let rows = sqlx::query_as::<_, ScoreModel>(
            r#"
            SELECT community_id, user_id, points
            FROM scores
            WHERE community_id = $1
            ORDER BY points DESC
            LIMIT $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }
}
