//! Bid repository

use async_trait::async_trait;
use solosphere_common::{Document, DocumentRow, InsertResult, RepositoryError, UpdateResult};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::BidStore;
use crate::domain::entities::Bid;

#[derive(Clone)]
pub struct BidRepository {
    pool: PgPool,
}

impl BidRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a bid with the same `email` and `jobId` is already stored
    async fn duplicate_exists(&self, document: &Document) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bids
                WHERE document->>'email' = $1->>'email'
                  AND document->>'jobId' = $1->>'jobId'
            )
            "#,
        )
        .bind(Json(document))
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

#[async_trait]
impl BidStore for BidRepository {
    async fn create(&self, document: Document) -> Result<InsertResult, RepositoryError> {
        if self.duplicate_exists(&document).await? {
            return Err(RepositoryError::AlreadyExists);
        }

        // bids_email_job_id_key rejects a concurrent duplicate
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO bids (id, document) VALUES ($1, $2)")
            .bind(id)
            .bind(Json(&document))
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_insert)?;
        Ok(InsertResult::new(id))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Bid>, RepositoryError> {
        let row = sqlx::query_as::<_, DocumentRow>("SELECT id, document FROM bids WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Bid::from))
    }

    async fn list_by_bidder(&self, email: &str) -> Result<Vec<Bid>, RepositoryError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, document FROM bids WHERE document->>'email' = $1 ORDER BY seq",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Bid::from).collect())
    }

    async fn list_by_job_owner(&self, email: &str) -> Result<Vec<Bid>, RepositoryError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, document FROM bids
            WHERE document->'buyer'->>'email' = $1
            ORDER BY seq
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Bid::from).collect())
    }

    async fn patch(&self, id: Uuid, patch: Document) -> Result<UpdateResult, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE bids SET document = document || $2, updated_at = NOW()
            WHERE id = $1 AND (document || $2) IS DISTINCT FROM document
            "#,
        )
        .bind(id)
        .bind(Json(&patch))
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        if result.rows_affected() > 0 {
            return Ok(UpdateResult::matched(true));
        }

        // Nothing changed: either the patch was a no-op or the bid is gone
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bids WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            UpdateResult::matched(false)
        } else {
            UpdateResult::unmatched()
        })
    }
}
