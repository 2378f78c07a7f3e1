use serde::{Deserialize, Serialize};

use crate::game::{CellId, Completion, PieceId};

/// Discriminated result emitted by every model operation. Carries the
/// re-evaluated completion state so a feedback subsystem can react without
/// re-reading the model; the model itself never depends on a subscriber
/// being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelEvent {
    Placed {
        piece: PieceId,
        cell: CellId,
        /// Previous occupant of the cell, evicted to the holding area.
        displaced: Option<PieceId>,
        completion: Completion,
        completion_changed: bool,
    },
    Returned {
        piece: PieceId,
        completion: Completion,
        completion_changed: bool,
    },
    Shuffled {
        completion: Completion,
        completion_changed: bool,
    },
}

impl ModelEvent {
    pub fn completion(&self) -> Completion {
        match *self {
            ModelEvent::Placed { completion, .. }
            | ModelEvent::Returned { completion, .. }
            | ModelEvent::Shuffled { completion, .. } => completion,
        }
    }

    pub fn completion_changed(&self) -> bool {
        match *self {
            ModelEvent::Placed {
                completion_changed, ..
            }
            | ModelEvent::Returned {
                completion_changed, ..
            }
            | ModelEvent::Shuffled {
                completion_changed, ..
            } => completion_changed,
        }
    }
}
