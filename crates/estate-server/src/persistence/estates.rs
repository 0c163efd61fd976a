//! Estate persistence operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use estate_core::Estate;
use sqlx::SqlitePool;

/// Insert a newly created estate.
pub async fn insert_estate(pool: &SqlitePool, estate: &Estate) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO estates (id, length, width, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&estate.id)
    .bind(i64::from(estate.length))
    .bind(i64::from(estate.width))
    .bind(estate.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all estates from the database.
pub async fn load_all_estates(pool: &SqlitePool) -> Result<Vec<Estate>> {
    let rows = sqlx::query_as::<_, EstateRow>(
        "SELECT id, length, width, created_at FROM estates",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

#[derive(sqlx::FromRow)]
struct EstateRow {
    id: String,
    length: i64,
    width: i64,
    created_at: String,
}

impl TryFrom<EstateRow> for Estate {
    type Error = anyhow::Error;

    fn try_from(row: EstateRow) -> Result<Self> {
        let length = u32::try_from(row.length)
            .with_context(|| format!("estate {} has invalid length {}", row.id, row.length))?;
        let width = u32::try_from(row.width)
            .with_context(|| format!("estate {} has invalid width {}", row.id, row.width))?;

        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| {
                format!("estate {} has invalid created_at {:?}", row.id, row.created_at)
            })?;

        Ok(Estate {
            id: row.id,
            length,
            width,
            created_at,
        })
    }
}
