// Postgres persistence for raw posts, deduplicated on (subject, external_id).

use sqlx::PgPool;

use screenpulse_common::Post;

use crate::error::Result;

pub struct PostStore {
    pool: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PostRow {
    subject: String,
    external_id: String,
    body: String,
}

impl PostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert posts, silently skipping identities that are already stored.
    /// Returns the number of rows actually inserted.
    pub async fn insert_ignore(&self, posts: &[Post]) -> Result<u64> {
        let mut inserted = 0;
        for post in posts {
            let result = sqlx::query(
                r#"
                INSERT INTO posts (subject, external_id, body)
                VALUES ($1, $2, $3)
                ON CONFLICT (subject, external_id) DO NOTHING
                "#,
            )
            .bind(&post.subject)
            .bind(&post.external_id)
            .bind(&post.body)
            .execute(&self.pool)
            .await?;

            inserted += result.rows_affected();
        }

        tracing::debug!(total = posts.len(), inserted, "post store: insert batch");
        Ok(inserted)
    }

    /// Total posts stored for a subject.
    pub async fn count(&self, subject: &str) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(1) FROM posts WHERE subject = $1")
            .bind(subject)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    /// One page of posts for a subject. Ordered by ingestion time so
    /// offset pagination stays stable across calls.
    pub async fn page(&self, subject: &str, offset: u64, limit: u64) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT subject, external_id, body
            FROM posts
            WHERE subject = $1
            ORDER BY fetched_at ASC, external_id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(subject)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Post {
                subject: r.subject,
                external_id: r.external_id,
                body: r.body,
            })
            .collect())
    }
}
