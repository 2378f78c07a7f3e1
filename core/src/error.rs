use thiserror::Error;

/// Operation-level failures. `PieceNotFound`/`CellNotFound` are recoverable
/// no-ops (the model is left untouched); `InvalidConfiguration` aborts
/// construction and never occurs once a model exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("unknown piece id {0}")]
    PieceNotFound(u32),
    #[error("unknown cell id {0}")]
    CellNotFound(u32),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl PuzzleError {
    /// True for the recoverable id-lookup failures a caller may log and ignore.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PuzzleError::PieceNotFound(_) | PuzzleError::CellNotFound(_)
        )
    }
}
