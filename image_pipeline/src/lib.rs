use image::imageops::{self, FilterType};
use image::RgbaImage;

pub use image::RgbaImage as TileImage;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("invalid image dimensions")]
    Dimensions,
    #[error("scene is not square ({0}x{1})")]
    NotSquare(u32, u32),
    #[error("grid side {0} must be at least 1")]
    GridSide(u32),
}

/// Decodes raw image bytes to RGBA8. A failure here aborts puzzle
/// initialization; no model is constructed from an undecodable source.
pub fn decode_rgba8(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    let image =
        image::load_from_memory(bytes).map_err(|err| PipelineError::Decode(err.to_string()))?;
    let rgba = image.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(PipelineError::Dimensions);
    }
    Ok(rgba)
}

/// Projects the source onto a `scene_dim` square: cover-fit scale (the
/// larger of the two axis ratios), then a centered crop so the excess is
/// trimmed symmetrically.
pub fn project_scene(source: &RgbaImage, scene_dim: u32) -> Result<RgbaImage, PipelineError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 || scene_dim == 0 {
        return Err(PipelineError::Dimensions);
    }
    let scale = (scene_dim as f64 / width as f64).max(scene_dim as f64 / height as f64);
    let scaled_w = ((width as f64 * scale).round() as u32).max(scene_dim);
    let scaled_h = ((height as f64 * scale).round() as u32).max(scene_dim);
    let resized = imageops::resize(source, scaled_w, scaled_h, FilterType::Triangle);
    let offset_x = (scaled_w - scene_dim) / 2;
    let offset_y = (scaled_h - scene_dim) / 2;
    Ok(imageops::crop_imm(&resized, offset_x, offset_y, scene_dim, scene_dim).to_image())
}

/// Row-major slice of a square scene. Tile index k (0-based) carries the
/// content for piece id k+1, the same scan order the board assigns cell
/// ids in; that correspondence is what defines placement correctness.
#[derive(Debug, Clone)]
pub struct SceneSlices {
    pub scene_dim: u32,
    pub grid_side: u32,
    pub tiles: Vec<RgbaImage>,
}

impl SceneSlices {
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile for a 1-based piece id.
    pub fn tile_for_piece(&self, piece_id: u32) -> Option<&RgbaImage> {
        if piece_id == 0 {
            return None;
        }
        self.tiles.get((piece_id - 1) as usize)
    }
}

/// Partitions the scene into `grid_side`² tiles. Tile edges are rounded
/// cumulative bounds, so side lengths that do not divide the scene evenly
/// (e.g. 300/7) still partition it exactly, with at most one pixel of
/// variance between tiles.
pub fn slice_scene(scene: &RgbaImage, grid_side: u32) -> Result<SceneSlices, PipelineError> {
    let (width, height) = scene.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::Dimensions);
    }
    if width != height {
        return Err(PipelineError::NotSquare(width, height));
    }
    if grid_side == 0 {
        return Err(PipelineError::GridSide(grid_side));
    }
    let edges: Vec<u32> = (0..=grid_side)
        .map(|k| (k as f64 * width as f64 / grid_side as f64).round() as u32)
        .collect();
    let mut tiles = Vec::with_capacity((grid_side * grid_side) as usize);
    for row in 0..grid_side as usize {
        for col in 0..grid_side as usize {
            let x = edges[col];
            let y = edges[row];
            let tile_w = edges[col + 1] - x;
            let tile_h = edges[row + 1] - y;
            tiles.push(imageops::crop_imm(scene, x, y, tile_w, tile_h).to_image());
        }
    }
    Ok(SceneSlices {
        scene_dim: width,
        grid_side,
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    #[test]
    fn projection_covers_landscape_source() {
        let source = gradient(600, 300);
        let scene = project_scene(&source, 300).unwrap();
        assert_eq!(scene.dimensions(), (300, 300));
    }

    #[test]
    fn projection_covers_portrait_source() {
        let source = gradient(150, 450);
        let scene = project_scene(&source, 300).unwrap();
        assert_eq!(scene.dimensions(), (300, 300));
    }

    #[test]
    fn projection_rejects_zero_dimension() {
        let source = gradient(10, 10);
        assert!(matches!(
            project_scene(&source, 0),
            Err(PipelineError::Dimensions)
        ));
    }

    #[test]
    fn slicing_produces_row_major_tiles() {
        let scene = gradient(300, 300);
        let slices = slice_scene(&scene, 3).unwrap();
        assert_eq!(slices.tile_count(), 9);
        for tile in &slices.tiles {
            assert_eq!(tile.dimensions(), (100, 100));
        }
        // Tile for piece 5 (row 1, col 1) starts at scene (100, 100).
        let tile = slices.tile_for_piece(5).unwrap();
        assert_eq!(tile.get_pixel(0, 0), scene.get_pixel(100, 100));
        // Piece 1 is the top-left corner of the scene.
        let first = slices.tile_for_piece(1).unwrap();
        assert_eq!(first.get_pixel(0, 0), scene.get_pixel(0, 0));
    }

    #[test]
    fn slicing_partitions_uneven_side_exactly() {
        let scene = gradient(300, 300);
        let slices = slice_scene(&scene, 7).unwrap();
        assert_eq!(slices.tile_count(), 49);
        let row_width: u32 = slices.tiles[..7].iter().map(|tile| tile.width()).sum();
        assert_eq!(row_width, 300);
        for tile in &slices.tiles {
            assert!(tile.width() == 42 || tile.width() == 43);
        }
    }

    #[test]
    fn slicing_rejects_non_square_scene() {
        let scene = gradient(300, 200);
        assert!(matches!(
            slice_scene(&scene, 3),
            Err(PipelineError::NotSquare(300, 200))
        ));
    }

    #[test]
    fn tile_lookup_is_one_based() {
        let scene = gradient(300, 300);
        let slices = slice_scene(&scene, 2).unwrap();
        assert!(slices.tile_for_piece(0).is_none());
        assert!(slices.tile_for_piece(4).is_some());
        assert!(slices.tile_for_piece(5).is_none());
    }
}
