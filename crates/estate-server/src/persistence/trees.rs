//! Tree persistence operations.

use anyhow::{Context, Result};
use chrono::Utc;
use estate_core::Tree;
use sqlx::SqlitePool;

/// A stored tree together with the estate it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTree {
    pub id: String,
    pub estate_id: String,
    pub tree: Tree,
}

/// Insert a tree into an estate.
pub async fn insert_tree(pool: &SqlitePool, id: &str, estate_id: &str, tree: &Tree) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO trees (id, estate_id, x, y, height, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(id)
    .bind(estate_id)
    .bind(i64::from(tree.x))
    .bind(i64::from(tree.y))
    .bind(i64::from(tree.height))
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load every tree, in insertion order.
pub async fn load_all_trees(pool: &SqlitePool) -> Result<Vec<StoredTree>> {
    let rows = sqlx::query_as::<_, TreeRow>(
        "SELECT id, estate_id, x, y, height FROM trees ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

#[derive(sqlx::FromRow)]
struct TreeRow {
    id: String,
    estate_id: String,
    x: i64,
    y: i64,
    height: i64,
}

impl TryFrom<TreeRow> for StoredTree {
    type Error = anyhow::Error;

    fn try_from(row: TreeRow) -> Result<Self> {
        let tree = Tree {
            x: u32::try_from(row.x).context("tree x out of range")?,
            y: u32::try_from(row.y).context("tree y out of range")?,
            height: u32::try_from(row.height).context("tree height out of range")?,
        };
        Ok(StoredTree {
            id: row.id,
            estate_id: row.estate_id,
            tree,
        })
    }
}
