use serde::{Deserialize, Serialize};

use crate::grid::{
    GRID_SIDE_BOOST, GRID_SIDE_MAX, GRID_SIDE_MIN, SCENE_DIMENSION_DEFAULT, TARGET_PIECE_DENSITY,
};

/// Tunables for grid sizing and scene projection. One value per puzzle
/// instance; the defaults are the reference constants in `grid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRules {
    pub target_piece_density: f32,
    pub grid_side_boost: f32,
    pub grid_side_min: u32,
    pub grid_side_max: u32,
    pub scene_dimension: u32,
}

impl Default for PuzzleRules {
    fn default() -> Self {
        Self {
            target_piece_density: TARGET_PIECE_DENSITY,
            grid_side_boost: GRID_SIDE_BOOST,
            grid_side_min: GRID_SIDE_MIN,
            grid_side_max: GRID_SIDE_MAX,
            scene_dimension: SCENE_DIMENSION_DEFAULT,
        }
    }
}
