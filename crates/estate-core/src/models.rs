//! Core data models for estates and their trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rectangular plot laid out on an integer grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estate {
    pub id: String,
    /// Grid extent along X
    pub length: u32,
    /// Grid extent along Y
    pub width: u32,
    pub created_at: DateTime<Utc>,
}

/// A tree standing on one cell of an estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tree {
    /// 1-indexed column, at most the estate length
    pub x: u32,
    /// 1-indexed row, at most the estate width
    pub y: u32,
    pub height: u32,
}

impl Tree {
    pub fn new(x: u32, y: u32, height: u32) -> Self {
        Self { x, y, height }
    }

    /// Grid cell this tree occupies.
    pub fn cell(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

/// Height statistics over every tree of an estate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateStats {
    pub count: usize,
    pub max: u32,
    pub min: u32,
    pub median: u32,
}

/// Request body for creating an estate.
///
/// Dimensions are signed so that negative input surfaces as a validation
/// error instead of a deserialization error. Missing fields read as 0 and
/// are rejected the same way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateEstateRequest {
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub width: i64,
}

/// Request body for planting a tree in an estate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateTreeRequest {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
    #[serde(default)]
    pub height: i64,
}

impl From<Tree> for CreateTreeRequest {
    fn from(tree: Tree) -> Self {
        Self {
            x: tree.x.into(),
            y: tree.y.into(),
            height: tree.height.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Total distance travelled by the survey drone over an estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneDistance {
    pub distance: u64,
}
