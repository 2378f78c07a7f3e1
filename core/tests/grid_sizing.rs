use kakera_core::grid::{GRID_SIDE_MAX, GRID_SIDE_MIN};
use kakera_core::{grid_side, PuzzleError, PuzzleRules};

#[test]
fn same_dimensions_same_grid() {
    let rules = PuzzleRules::default();
    let first = grid_side(1920, 1080, &rules).unwrap();
    let second = grid_side(1920, 1080, &rules).unwrap();
    assert_eq!(first, second);
    assert!((GRID_SIDE_MIN..=GRID_SIDE_MAX).contains(&first));
}

#[test]
fn tiny_image_clamps_up_to_min() {
    // 100x100: raw side = sqrt(10000/35000) * 1.15 = 0.615, rounds to 1.
    let rules = PuzzleRules::default();
    assert_eq!(grid_side(100, 100, &rules).unwrap(), GRID_SIDE_MIN);
}

#[test]
fn huge_image_clamps_down_to_max() {
    let rules = PuzzleRules::default();
    assert_eq!(grid_side(8000, 8000, &rules).unwrap(), GRID_SIDE_MAX);
}

#[test]
fn mid_size_image_lands_between_bounds() {
    // 1200x800: raw side = sqrt(960000/35000) * 1.15 = 6.02, rounds to 6.
    let rules = PuzzleRules::default();
    assert_eq!(grid_side(1200, 800, &rules).unwrap(), 6);
}

#[test]
fn zero_dimension_is_invalid_configuration() {
    let rules = PuzzleRules::default();
    let err = grid_side(0, 600, &rules).unwrap_err();
    assert!(matches!(err, PuzzleError::InvalidConfiguration(_)));
    let err = grid_side(600, 0, &rules).unwrap_err();
    assert!(matches!(err, PuzzleError::InvalidConfiguration(_)));
}

#[test]
fn custom_rules_shift_the_grid() {
    let rules = PuzzleRules {
        target_piece_density: 5_000.0,
        ..PuzzleRules::default()
    };
    let dense = grid_side(1200, 800, &rules).unwrap();
    let sparse = grid_side(1200, 800, &PuzzleRules::default()).unwrap();
    assert!(dense >= sparse);
}
