//! Job repository

use async_trait::async_trait;
use solosphere_common::{
    DeleteResult, Document, DocumentRow, InsertResult, RepositoryError, UpdateResult,
};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::JobStore;
use crate::domain::entities::{Job, JobFilter, JobQuery};

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the title/category predicate shared by the paged search and count
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    builder.push(" WHERE document->>'jobTitle' ILIKE ");
    builder.push_bind(filter.title_pattern());

    if let Some(category) = &filter.category {
        builder.push(" AND document->>'category' = ");
        builder.push_bind(category.clone());
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, document FROM jobs ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, DocumentRow>("SELECT id, document FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Job::from))
    }

    async fn create(&self, document: Document) -> Result<InsertResult, RepositoryError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO jobs (id, document) VALUES ($1, $2)")
            .bind(id)
            .bind(Json(&document))
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_insert)?;
        Ok(InsertResult::new(id))
    }

    async fn replace(
        &self,
        id: Uuid,
        document: Document,
    ) -> Result<UpdateResult, RepositoryError> {
        // No row back means the stored document already equals the new one.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO jobs (id, document) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
                SET document = EXCLUDED.document, updated_at = NOW()
                WHERE jobs.document IS DISTINCT FROM EXCLUDED.document
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(id)
        .bind(Json(&document))
        .fetch_optional(&self.pool)
        .await?;

        Ok(match inserted {
            Some(true) => UpdateResult::upserted(id),
            Some(false) => UpdateResult::matched(true),
            None => UpdateResult::matched(false),
        })
    }

    async fn delete(&self, id: Uuid) -> Result<DeleteResult, RepositoryError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult::new(result.rows_affected()))
    }

    async fn list_by_owner(&self, email: &str) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, document FROM jobs
            WHERE document->'buyer'->>'email' = $1
            ORDER BY seq
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn list_paged(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, document FROM jobs");
        push_filter(&mut builder, &query.filter);

        match query.sort {
            Some(order) => {
                builder.push(" ORDER BY document->>'dateline' ");
                builder.push(order.as_sql());
                builder.push(" NULLS LAST, seq");
            }
            None => {
                builder.push(" ORDER BY seq");
            }
        }

        builder.push(" LIMIT ");
        builder.push_bind(query.page.size());
        builder.push(" OFFSET ");
        builder.push_bind(query.page.offset());

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64, RepositoryError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM jobs");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
