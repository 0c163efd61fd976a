//! Survey drone distance over an estate.
//!
//! The drone sweeps the grid row by row (`y` ascending), always visiting the
//! columns of a row left to right (`x` ascending). Over a tree it must hold
//! exactly `height + 1`; over an empty cell it keeps whatever altitude it
//! last held. After the very last cell it lands.

use std::collections::HashMap;

use crate::models::Tree;

/// Cost of moving one cell along a row, or advancing to the next row.
pub const STEP_COST: u64 = 10;

/// Altitude kept above the top of a tree.
pub const CRUISE_CLEARANCE: u32 = 1;

/// Compute the total distance the drone travels to survey the estate.
///
/// Coordinates are expected to lie inside `length` x `width`; trees outside
/// the grid are never visited and so never contribute. If several trees share
/// a cell, the first one in `trees` wins.
pub fn compute_drone_distance(trees: &[Tree], length: u32, width: u32) -> u64 {
    let mut by_cell: HashMap<(u32, u32), u32> = HashMap::with_capacity(trees.len());
    for tree in trees {
        by_cell.entry(tree.cell()).or_insert(tree.height);
    }

    let mut total: u64 = 0;
    // u64 so `height + clearance` cannot overflow for any u32 height
    let mut altitude: u64 = 0;

    for y in 1..=width {
        for x in 1..=length {
            if let Some(height) = by_cell.get(&(x, y)) {
                let required = u64::from(*height) + u64::from(CRUISE_CLEARANCE);
                total += altitude.abs_diff(required);
                altitude = required;
            }
            if x != length {
                total += STEP_COST;
            }
        }
        if y != width {
            total += STEP_COST;
        } else {
            total += altitude;
        }
    }

    total
}
