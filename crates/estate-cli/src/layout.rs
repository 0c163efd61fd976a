//! Offline estate layouts read from JSON.

use anyhow::{Context, Result};
use chrono::Utc;
use estate_core::{
    compute_drone_distance, compute_statistics, CreateEstateRequest, CreateTreeRequest, Estate,
    EstateRules, EstateStats, Tree,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// An estate and its trees described in a single file.
///
/// ```json
/// { "length": 5, "width": 2, "trees": [{ "x": 2, "y": 1, "height": 5 }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstateLayout {
    pub length: i64,
    pub width: i64,
    #[serde(default)]
    pub trees: Vec<CreateTreeRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub distance: u64,
    pub stats: Option<EstateStats>,
}

impl EstateLayout {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply the same checks the server does, then plan the survey.
    pub fn plan(&self, rules: &EstateRules) -> Result<LayoutReport> {
        let (length, width) = rules.validate_estate(&CreateEstateRequest {
            length: self.length,
            width: self.width,
        })?;
        let estate = Estate {
            id: "layout".to_string(),
            length,
            width,
            created_at: Utc::now(),
        };

        let mut seen = HashSet::new();
        let mut trees: Vec<Tree> = Vec::with_capacity(self.trees.len());
        for (idx, raw) in self.trees.iter().enumerate() {
            let tree = rules
                .validate_tree(&estate, raw)
                .with_context(|| format!("tree #{}", idx + 1))?;
            if !seen.insert(tree.cell()) {
                anyhow::bail!("tree #{}: a tree already stands at ({}, {})", idx + 1, tree.x, tree.y);
            }
            trees.push(tree);
        }

        Ok(LayoutReport {
            distance: compute_drone_distance(&trees, length, width),
            stats: compute_statistics(&trees),
        })
    }
}
