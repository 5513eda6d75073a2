// Append-only Postgres store of per-run rating records.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use screenpulse_common::RatingRecord;

use crate::error::Result;

pub struct RatingStore {
    pool: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    subject: String,
    lexicon_rating: f64,
    model_rating: f64,
    reference_rating: f64,
    lexicon_positive: i32,
    lexicon_negative: i32,
    model_positive: i32,
    model_negative: i32,
    created_at: DateTime<Utc>,
}

impl From<RatingRow> for RatingRecord {
    fn from(r: RatingRow) -> Self {
        RatingRecord {
            id: r.id,
            subject: r.subject,
            lexicon_rating: r.lexicon_rating,
            model_rating: r.model_rating,
            reference_rating: r.reference_rating,
            lexicon_positive: r.lexicon_positive as u32,
            lexicon_negative: r.lexicon_negative as u32,
            model_positive: r.model_positive as u32,
            model_negative: r.model_negative as u32,
            created_at: r.created_at,
        }
    }
}

impl RatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist one run's record. A single atomic write — there is no
    /// partially persisted record.
    pub async fn append(&self, record: &RatingRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings
                (id, subject, lexicon_rating, model_rating, reference_rating,
                 lexicon_positive, lexicon_negative, model_positive, model_negative,
                 created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(&record.subject)
        .bind(record.lexicon_rating)
        .bind(record.model_rating)
        .bind(record.reference_rating)
        .bind(record.lexicon_positive as i32)
        .bind(record.lexicon_negative as i32)
        .bind(record.model_positive as i32)
        .bind(record.model_negative as i32)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All records for a subject, most recent first.
    pub async fn for_subject(&self, subject: &str) -> Result<Vec<RatingRecord>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, subject, lexicon_rating, model_rating, reference_rating,
                   lexicon_positive, lexicon_negative, model_positive, model_negative,
                   created_at
            FROM ratings
            WHERE subject = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RatingRecord::from).collect())
    }
}
