pub mod error;
mod post_store;
mod rating_store;

pub use error::{Result, StoreError};
pub use post_store::PostStore;
pub use rating_store::RatingStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to Postgres and run the embedded migrations.
///
/// A connection failure is returned to the caller, never a process exit —
/// the pipeline stays embeddable.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
