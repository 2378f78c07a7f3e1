pub mod action;
pub mod catalog;
pub mod error;
pub mod game;
pub mod grid;
pub mod rules;

pub use action::ModelEvent;
pub use error::PuzzleError;
pub use game::{
    rand_unit, shuffle_seed, splitmix32, Cell, CellId, Completion, Piece, PieceId, PieceLocation,
    PuzzleModel, SHUFFLE_SEED_BASE,
};
pub use grid::{grid_label, grid_side};
pub use rules::PuzzleRules;
