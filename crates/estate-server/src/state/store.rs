//! In-memory estate store using DashMap, written through to SQLite.

use anyhow::Result;
use chrono::Utc;
use dashmap::DashMap;
use estate_core::{
    compute_drone_distance, compute_statistics, CreateEstateRequest, CreateTreeRequest, Estate,
    EstateRules, EstateStats, Tree,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::Config;
use crate::error::EstateError;
use crate::persistence::{self, Database};

/// Application state - thread-safe store for estates and their trees.
pub struct AppState {
    config: Config,
    db: Option<Database>,
    estates: DashMap<String, Estate>,
    /// Trees per estate, in insertion order
    trees: DashMap<String, Vec<Tree>>,
    /// Serializes the occupancy check and insert of new trees
    tree_write: Mutex<()>,
}

impl AppState {
    /// Purely in-memory state, nothing is persisted.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            db: None,
            estates: DashMap::new(),
            trees: DashMap::new(),
            tree_write: Mutex::new(()),
        }
    }

    pub fn with_database(db: Database, config: Config) -> Self {
        Self {
            db: Some(db),
            ..Self::new(config)
        }
    }

    pub fn rules(&self) -> &EstateRules {
        &self.config.rules
    }

    /// Fill the in-memory maps from the database.
    pub async fn load_from_database(&self) -> Result<()> {
        let Some(db) = &self.db else {
            return Ok(());
        };

        let estates = persistence::estates::load_all_estates(db.pool()).await?;
        let estate_count = estates.len();
        for estate in estates {
            self.estates.insert(estate.id.clone(), estate);
        }

        let trees = persistence::trees::load_all_trees(db.pool()).await?;
        let mut tree_count = 0usize;
        for stored in trees {
            if !self.estates.contains_key(&stored.estate_id) {
                tracing::warn!(
                    "Skipping tree {} of unknown estate {}",
                    stored.id,
                    stored.estate_id
                );
                continue;
            }
            self.trees
                .entry(stored.estate_id)
                .or_default()
                .push(stored.tree);
            tree_count += 1;
        }

        tracing::info!(
            "Loaded {} estates and {} trees from database",
            estate_count,
            tree_count
        );
        Ok(())
    }

    /// Validate and store a new estate.
    pub async fn create_estate(&self, req: CreateEstateRequest) -> Result<Estate, EstateError> {
        let (length, width) = self.rules().validate_estate(&req)?;
        let estate = Estate {
            id: Uuid::new_v4().to_string(),
            length,
            width,
            created_at: Utc::now(),
        };

        if let Some(db) = &self.db {
            persistence::estates::insert_estate(db.pool(), &estate).await?;
        }
        self.estates.insert(estate.id.clone(), estate.clone());

        tracing::info!("Created estate {} ({}x{})", estate.id, length, width);
        Ok(estate)
    }

    /// Validate and plant a tree, returning its id.
    pub async fn create_tree(
        &self,
        estate_id: &str,
        req: CreateTreeRequest,
    ) -> Result<String, EstateError> {
        let estate = self.resolve_estate(estate_id).ok_or(EstateError::NotFound)?;
        let tree = self.rules().validate_tree(&estate, &req)?;

        let _guard = self.tree_write.lock().await;
        if self.cell_occupied(estate_id, tree.cell()) {
            return Err(EstateError::CellOccupied { x: tree.x, y: tree.y });
        }

        let id = Uuid::new_v4().to_string();
        if let Some(db) = &self.db {
            persistence::trees::insert_tree(db.pool(), &id, estate_id, &tree).await?;
        }
        self.trees
            .entry(estate_id.to_string())
            .or_default()
            .push(tree);

        tracing::info!(
            "Planted tree {} in estate {} at ({}, {}) height {}",
            id,
            estate_id,
            tree.x,
            tree.y,
            tree.height
        );
        Ok(id)
    }

    /// Look up an estate by id.
    pub fn resolve_estate(&self, id: &str) -> Option<Estate> {
        self.estates.get(id).map(|r| r.value().clone())
    }

    /// All trees of an estate in insertion order.
    pub fn list_trees(&self, estate_id: &str) -> Vec<Tree> {
        self.trees
            .get(estate_id)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    pub fn estate_count(&self) -> usize {
        self.estates.len()
    }

    /// Height statistics for an existing estate with at least one tree.
    pub fn estate_stats(&self, estate_id: &str) -> Result<EstateStats, EstateError> {
        if !self.estates.contains_key(estate_id) {
            return Err(EstateError::NotFound);
        }
        let trees = self.list_trees(estate_id);
        compute_statistics(&trees).ok_or(EstateError::NoTrees)
    }

    /// Survey distance for an existing estate.
    pub fn drone_distance(&self, estate_id: &str) -> Result<u64, EstateError> {
        let estate = self.resolve_estate(estate_id).ok_or(EstateError::NotFound)?;
        let trees = self.list_trees(estate_id);
        let distance = compute_drone_distance(&trees, estate.length, estate.width);
        tracing::debug!(
            "Drone distance for estate {} over {} trees: {}",
            estate_id,
            trees.len(),
            distance
        );
        Ok(distance)
    }

    fn cell_occupied(&self, estate_id: &str, cell: (u32, u32)) -> bool {
        self.trees
            .get(estate_id)
            .map(|trees| trees.iter().any(|t| t.cell() == cell))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::ValidationError;

    async fn estate_with_trees(state: &AppState, length: i64, width: i64, trees: &[Tree]) -> String {
        let estate = state
            .create_estate(CreateEstateRequest { length, width })
            .await
            .unwrap();
        for tree in trees {
            state.create_tree(&estate.id, (*tree).into()).await.unwrap();
        }
        estate.id
    }

    #[tokio::test]
    async fn test_drone_distance_for_stored_estate() {
        let state = AppState::new(Config::in_memory());
        let id = estate_with_trees(
            &state,
            5,
            1,
            &[Tree::new(2, 1, 5), Tree::new(3, 1, 3), Tree::new(4, 1, 4)],
        )
        .await;

        assert_eq!(state.drone_distance(&id).unwrap(), 54);
    }

    #[tokio::test]
    async fn test_stats_for_stored_estate() {
        let state = AppState::new(Config::in_memory());
        let id = estate_with_trees(
            &state,
            5,
            2,
            &[
                Tree::new(2, 1, 5),
                Tree::new(3, 1, 3),
                Tree::new(4, 1, 4),
                Tree::new(4, 2, 4),
            ],
        )
        .await;

        let stats = state.estate_stats(&id).unwrap();
        assert_eq!(stats, EstateStats { count: 4, max: 5, min: 3, median: 4 });
    }

    #[tokio::test]
    async fn test_unknown_estate() {
        let state = AppState::new(Config::in_memory());
        assert!(matches!(state.drone_distance("nope"), Err(EstateError::NotFound)));
        assert!(matches!(state.estate_stats("nope"), Err(EstateError::NotFound)));
        let planted = state
            .create_tree("nope", CreateTreeRequest { x: 1, y: 1, height: 2 })
            .await;
        assert!(matches!(planted, Err(EstateError::NotFound)));
    }

    #[tokio::test]
    async fn test_stats_without_trees() {
        let state = AppState::new(Config::in_memory());
        let id = estate_with_trees(&state, 3, 3, &[]).await;
        assert!(matches!(state.estate_stats(&id), Err(EstateError::NoTrees)));
        assert_eq!(state.drone_distance(&id).unwrap(), 80);
    }

    #[tokio::test]
    async fn test_rejects_second_tree_on_cell() {
        let state = AppState::new(Config::in_memory());
        let id = estate_with_trees(&state, 2, 2, &[Tree::new(1, 1, 3)]).await;

        let second = state
            .create_tree(&id, CreateTreeRequest { x: 1, y: 1, height: 9 })
            .await;
        assert!(matches!(second, Err(EstateError::CellOccupied { x: 1, y: 1 })));
        assert_eq!(state.list_trees(&id), vec![Tree::new(1, 1, 3)]);
    }

    #[tokio::test]
    async fn test_drone_distance_without_height_ceiling() {
        let mut config = Config::in_memory();
        config.rules.enforce_tree_height = false;
        let state = AppState::new(config);
        let id = estate_with_trees(&state, 1, 1, &[]).await;

        state
            .create_tree(
                &id,
                CreateTreeRequest { x: 1, y: 1, height: i64::from(u32::MAX) },
            )
            .await
            .unwrap();

        let cruise = u64::from(u32::MAX) + 1;
        assert_eq!(state.drone_distance(&id).unwrap(), 2 * cruise);
    }

    #[tokio::test]
    async fn test_validation_errors_surface() {
        let state = AppState::new(Config::in_memory());
        let bad = state
            .create_estate(CreateEstateRequest { length: -2, width: 2 })
            .await;
        assert!(matches!(
            bad,
            Err(EstateError::Validation(ValidationError::LengthOutOfRange))
        ));
        assert_eq!(state.estate_count(), 0);

        let id = estate_with_trees(&state, 2, 2, &[]).await;
        let tall = state
            .create_tree(&id, CreateTreeRequest { x: 1, y: 1, height: 32 })
            .await;
        assert!(matches!(
            tall,
            Err(EstateError::Validation(ValidationError::TreeHeightOutOfRange))
        ));
    }

    #[tokio::test]
    async fn test_reload_from_database() {
        let path = std::env::temp_dir()
            .join(format!("estate-store-{}.db", Uuid::new_v4()))
            .to_string_lossy()
            .to_string();

        let db = persistence::init_database(&path, 1).await.unwrap();
        let state = AppState::with_database(db, Config::in_memory());
        let id = estate_with_trees(
            &state,
            5,
            2,
            &[Tree::new(2, 1, 5), Tree::new(4, 2, 4)],
        )
        .await;
        let expected = state.drone_distance(&id).unwrap();

        let db = persistence::init_database(&path, 1).await.unwrap();
        let reloaded = AppState::with_database(db, Config::in_memory());
        reloaded.load_from_database().await.unwrap();

        assert_eq!(reloaded.resolve_estate(&id).map(|e| (e.length, e.width)), Some((5, 2)));
        assert_eq!(reloaded.list_trees(&id).len(), 2);
        assert_eq!(reloaded.drone_distance(&id).unwrap(), expected);

        let _ = std::fs::remove_file(&path);
    }
}
