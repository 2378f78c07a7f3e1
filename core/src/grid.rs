use crate::error::PuzzleError;
use crate::rules::PuzzleRules;

/// Target source-image pixel count per piece.
pub const TARGET_PIECE_DENSITY: f32 = 35_000.0;
/// Scale-up applied to the raw side length, biasing toward smaller pieces.
pub const GRID_SIDE_BOOST: f32 = 1.15;
pub const GRID_SIDE_MIN: u32 = 2;
pub const GRID_SIDE_MAX: u32 = 7;
/// Edge length of the square scene the source image is projected onto.
pub const SCENE_DIMENSION_DEFAULT: u32 = 300;

/// Derives the grid side length N from source image dimensions. Pure: the
/// same image always yields the same grid, so board shape is reproducible.
pub fn grid_side(width: u32, height: u32, rules: &PuzzleRules) -> Result<u32, PuzzleError> {
    if width == 0 || height == 0 {
        return Err(PuzzleError::InvalidConfiguration(format!(
            "non-positive image dimensions {width}x{height}"
        )));
    }
    let min_side = rules.grid_side_min.max(1);
    let max_side = rules.grid_side_max.max(min_side);
    let density = rules.target_piece_density.max(1.0);
    let area = width as f32 * height as f32;
    let raw = (area / density).sqrt() * rules.grid_side_boost;
    let mut side = raw.round() as u32;
    if side == 0 {
        side = min_side;
    }
    Ok(side.clamp(min_side, max_side))
}

pub fn grid_label(side: u32) -> String {
    format!("{side}x{side} ({} pieces)", side * side)
}
