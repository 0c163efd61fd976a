//! Creation-time rules for estates and trees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CreateEstateRequest, CreateTreeRequest, Estate, Tree};

/// Limits enforced before an estate or tree is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstateRules {
    /// Smallest allowed estate length or width
    pub min_dimension: i64,
    /// Estate length and width must stay strictly below this
    pub max_dimension: i64,
    /// Smallest allowed tree height
    pub min_tree_height: i64,
    /// Tallest allowed tree (inclusive)
    pub max_tree_height: i64,
    /// When false only `min_tree_height` is checked
    pub enforce_tree_height: bool,
}

impl Default for EstateRules {
    fn default() -> Self {
        Self {
            min_dimension: 1,
            max_dimension: 50_000,
            min_tree_height: 1,
            max_tree_height: 30,
            enforce_tree_height: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("length limit exceeded")]
    LengthOutOfRange,
    #[error("width limit exceeded")]
    WidthOutOfRange,
    #[error("tree's height is not in range")]
    TreeHeightOutOfRange,
    #[error("tree is outside estate")]
    TreeOutsideEstate,
}

impl EstateRules {
    /// Validate requested dimensions, returning `(length, width)`.
    pub fn validate_estate(&self, req: &CreateEstateRequest) -> Result<(u32, u32), ValidationError> {
        let length = self
            .checked_dimension(req.length)
            .ok_or(ValidationError::LengthOutOfRange)?;
        let width = self
            .checked_dimension(req.width)
            .ok_or(ValidationError::WidthOutOfRange)?;
        Ok((length, width))
    }

    /// Validate a tree against the estate it is planted in.
    pub fn validate_tree(&self, estate: &Estate, req: &CreateTreeRequest) -> Result<Tree, ValidationError> {
        let height = self
            .checked_height(req.height)
            .ok_or(ValidationError::TreeHeightOutOfRange)?;

        let x = in_axis(req.x, estate.length).ok_or(ValidationError::TreeOutsideEstate)?;
        let y = in_axis(req.y, estate.width).ok_or(ValidationError::TreeOutsideEstate)?;

        Ok(Tree { x, y, height })
    }

    fn checked_dimension(&self, value: i64) -> Option<u32> {
        if value < self.min_dimension.max(1) || value >= self.max_dimension {
            return None;
        }
        u32::try_from(value).ok()
    }

    fn checked_height(&self, value: i64) -> Option<u32> {
        if value < self.min_tree_height.max(1) {
            return None;
        }
        if self.enforce_tree_height && value > self.max_tree_height {
            return None;
        }
        u32::try_from(value).ok()
    }
}

/// 1-indexed coordinate check against one estate axis.
fn in_axis(value: i64, extent: u32) -> Option<u32> {
    if value < 1 || value > i64::from(extent) {
        return None;
    }
    u32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn estate(length: u32, width: u32) -> Estate {
        Estate {
            id: "aaa".to_string(),
            length,
            width,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_accepts_valid_estate() {
        let rules = EstateRules::default();
        let req = CreateEstateRequest { length: 2, width: 49_999 };
        assert_eq!(rules.validate_estate(&req), Ok((2, 49_999)));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let rules = EstateRules::default();
        for length in [-2, 0, 50_000] {
            let req = CreateEstateRequest { length, width: 2 };
            assert_eq!(rules.validate_estate(&req), Err(ValidationError::LengthOutOfRange));
        }
        for width in [-2, 0, 50_000] {
            let req = CreateEstateRequest { length: 2, width };
            assert_eq!(rules.validate_estate(&req), Err(ValidationError::WidthOutOfRange));
        }
    }

    #[test]
    fn test_length_checked_before_width() {
        let rules = EstateRules::default();
        let req = CreateEstateRequest { length: 0, width: 0 };
        assert_eq!(rules.validate_estate(&req), Err(ValidationError::LengthOutOfRange));
    }

    #[test]
    fn test_accepts_tree_on_estate_edge() {
        let rules = EstateRules::default();
        let req = CreateTreeRequest { x: 2, y: 2, height: 30 };
        assert_eq!(rules.validate_tree(&estate(2, 2), &req), Ok(Tree::new(2, 2, 30)));
    }

    #[test]
    fn test_rejects_tree_outside_estate() {
        let rules = EstateRules::default();
        for (x, y) in [(5, 1), (0, 1), (1, 0), (1, 3), (-1, -1)] {
            let req = CreateTreeRequest { x, y, height: 2 };
            assert_eq!(
                rules.validate_tree(&estate(2, 2), &req),
                Err(ValidationError::TreeOutsideEstate)
            );
        }
    }

    #[test]
    fn test_rejects_tree_height() {
        let rules = EstateRules::default();
        for height in [0, 31, 32] {
            let req = CreateTreeRequest { x: 1, y: 1, height };
            assert_eq!(
                rules.validate_tree(&estate(2, 2), &req),
                Err(ValidationError::TreeHeightOutOfRange)
            );
        }
    }

    #[test]
    fn test_height_ceiling_can_be_disabled() {
        let rules = EstateRules {
            enforce_tree_height: false,
            ..EstateRules::default()
        };
        let tall = CreateTreeRequest { x: 1, y: 1, height: 120 };
        assert_eq!(rules.validate_tree(&estate(2, 2), &tall), Ok(Tree::new(1, 1, 120)));

        let tallest = CreateTreeRequest { x: 1, y: 1, height: i64::from(u32::MAX) };
        assert_eq!(
            rules.validate_tree(&estate(2, 2), &tallest),
            Ok(Tree::new(1, 1, u32::MAX))
        );

        let beyond = CreateTreeRequest { x: 1, y: 1, height: i64::from(u32::MAX) + 1 };
        assert_eq!(
            rules.validate_tree(&estate(2, 2), &beyond),
            Err(ValidationError::TreeHeightOutOfRange)
        );

        let zero = CreateTreeRequest { x: 1, y: 1, height: 0 };
        assert_eq!(
            rules.validate_tree(&estate(2, 2), &zero),
            Err(ValidationError::TreeHeightOutOfRange)
        );
    }

    #[test]
    fn test_height_checked_before_bounds() {
        let rules = EstateRules::default();
        let req = CreateTreeRequest { x: 9, y: 9, height: 99 };
        assert_eq!(
            rules.validate_tree(&estate(2, 2), &req),
            Err(ValidationError::TreeHeightOutOfRange)
        );
    }
}
