//! Schema bootstrap for the `ads` table

use sqlx::PgPool;

/// Name of the constraint that makes titles unique.
pub const TITLE_UNIQUE_CONSTRAINT: &str = "ads_title_key";

/// Create the `ads` table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running ads migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ads (
            id SERIAL PRIMARY KEY,
            title VARCHAR(50) NOT NULL,
            description VARCHAR(200) NOT NULL,
            owner TEXT NOT NULL,
            create_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT ads_title_key UNIQUE (title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Ads migrations complete");
    Ok(())
}
