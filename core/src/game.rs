use serde::{Deserialize, Serialize};

use crate::action::ModelEvent;
use crate::error::PuzzleError;
use crate::grid::{GRID_SIDE_MAX, GRID_SIDE_MIN};

pub type PieceId = u32;
pub type CellId = u32;

pub const SHUFFLE_SEED_BASE: u32 = 0x5EED_0CA4;

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ salt);
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

/// Mixes a caller-supplied nonce with the grid shape so two boards of
/// different sizes never share a shuffle stream.
pub fn shuffle_seed(base: u32, nonce: u32, side: u32) -> u32 {
    let grid = (side << 16) ^ side;
    base ^ nonce.wrapping_mul(0x9E37_79B9) ^ grid ^ 0x5CA7_7EED
}

/// Where a piece currently sits: the holding area, or exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceLocation {
    Holding,
    Cell(CellId),
}

/// One tile of the sliced image. `correct_cell` is fixed by the row-major
/// scan order at slicing time; the tile's pixel content lives in the image
/// pipeline's slice store, keyed by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub correct_cell: CellId,
    pub location: PieceLocation,
}

/// One board position. Holds at most one piece, kept in lock-step with
/// that piece's `location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub occupant: Option<PieceId>,
}

/// Three-way completion state. `FilledIncorrect` lets a caller distinguish
/// "every cell filled but some pieces swapped" from "still working".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    InProgress,
    FilledIncorrect,
    Solved,
}

/// Authoritative puzzle state for one loaded image. Pieces and cells are
/// created once at construction and replaced only by constructing a new
/// model; loading a new image means dropping this value for a fresh one,
/// so no caller can mutate a stale instance. All mutation goes through
/// `place_piece`, `return_to_holding`, and `shuffle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleModel {
    grid_side: u32,
    pieces: Vec<Piece>,
    cells: Vec<Cell>,
    /// Presentation order of pieces in the holding area. Affects layout
    /// only, never correctness.
    holding_order: Vec<PieceId>,
    shuffle_nonce: u32,
    completion: Completion,
}

impl PuzzleModel {
    /// Builds a board of `grid_side`² cells with every piece in the holding
    /// area, in id order. Callers shuffle once before presenting.
    pub fn new(grid_side: u32) -> Result<Self, PuzzleError> {
        if !(GRID_SIDE_MIN..=GRID_SIDE_MAX).contains(&grid_side) {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "grid side {grid_side} outside {GRID_SIDE_MIN}..={GRID_SIDE_MAX}"
            )));
        }
        let total = grid_side * grid_side;
        let pieces = (1..=total)
            .map(|id| Piece {
                id,
                correct_cell: id,
                location: PieceLocation::Holding,
            })
            .collect();
        let cells = (1..=total).map(|id| Cell { id, occupant: None }).collect();
        Ok(Self {
            grid_side,
            pieces,
            cells,
            holding_order: (1..=total).collect(),
            shuffle_nonce: 0,
            completion: Completion::InProgress,
        })
    }

    pub fn grid_side(&self) -> u32 {
        self.grid_side
    }

    pub fn piece_count(&self) -> u32 {
        self.grid_side * self.grid_side
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.piece_index(id).ok().map(|index| &self.pieces[index])
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cell_index(id).ok().map(|index| &self.cells[index])
    }

    /// Pieces currently in the holding area, in presentation order.
    pub fn holding_order(&self) -> &[PieceId] {
        &self.holding_order
    }

    pub fn shuffle_nonce(&self) -> u32 {
        self.shuffle_nonce
    }

    /// Completion as of the last mutation.
    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Moves a piece into a cell, evicting any differing occupant to the
    /// holding area first. Idempotent when the piece already sits there.
    /// Unknown ids leave the model untouched.
    pub fn place_piece(
        &mut self,
        piece: PieceId,
        cell: CellId,
    ) -> Result<ModelEvent, PuzzleError> {
        let piece_index = self.piece_index(piece)?;
        let cell_index = self.cell_index(cell)?;
        if self.pieces[piece_index].location == PieceLocation::Cell(cell) {
            let (completion, completion_changed) = self.reevaluate();
            return Ok(ModelEvent::Placed {
                piece,
                cell,
                displaced: None,
                completion,
                completion_changed,
            });
        }
        self.detach(piece_index);
        let displaced = self.cells[cell_index].occupant.take();
        if let Some(evicted) = displaced {
            let evicted_index = (evicted - 1) as usize;
            self.pieces[evicted_index].location = PieceLocation::Holding;
            self.holding_order.push(evicted);
        }
        self.cells[cell_index].occupant = Some(piece);
        self.pieces[piece_index].location = PieceLocation::Cell(cell);
        debug_assert!(self.bijection_holds());
        let (completion, completion_changed) = self.reevaluate();
        Ok(ModelEvent::Placed {
            piece,
            cell,
            displaced,
            completion,
            completion_changed,
        })
    }

    /// Moves a piece back to the holding area; idempotent if already there.
    pub fn return_to_holding(&mut self, piece: PieceId) -> Result<ModelEvent, PuzzleError> {
        let piece_index = self.piece_index(piece)?;
        if self.pieces[piece_index].location != PieceLocation::Holding {
            self.detach(piece_index);
            self.pieces[piece_index].location = PieceLocation::Holding;
            self.holding_order.push(piece);
        }
        debug_assert!(self.bijection_holds());
        let (completion, completion_changed) = self.reevaluate();
        Ok(ModelEvent::Returned {
            piece,
            completion,
            completion_changed,
        })
    }

    /// Evicts every placed piece to the holding area, then applies a
    /// Fisher–Yates permutation to the holding order. Places nothing;
    /// called once at load to scramble, and again as a reset action.
    pub fn shuffle(&mut self, nonce: u32) -> ModelEvent {
        for index in 0..self.cells.len() {
            if let Some(piece) = self.cells[index].occupant.take() {
                self.pieces[(piece - 1) as usize].location = PieceLocation::Holding;
                self.holding_order.push(piece);
            }
        }
        let seed = shuffle_seed(SHUFFLE_SEED_BASE, nonce, self.grid_side);
        for i in (1..self.holding_order.len()).rev() {
            let salt = 0xC0DE_u32 + i as u32;
            let j = (rand_unit(seed, salt) * (i as f32 + 1.0)) as usize;
            self.holding_order.swap(i, j);
        }
        self.shuffle_nonce = nonce;
        debug_assert!(self.bijection_holds());
        let (completion, completion_changed) = self.reevaluate();
        ModelEvent::Shuffled {
            completion,
            completion_changed,
        }
    }

    /// Pure read over current occupancy; safe to call at any time.
    pub fn evaluate(&self) -> Completion {
        let mut filled = true;
        let mut correct = true;
        for cell in &self.cells {
            match cell.occupant {
                None => filled = false,
                Some(piece) => {
                    if self.pieces[(piece - 1) as usize].correct_cell != cell.id {
                        correct = false;
                    }
                }
            }
        }
        if !filled {
            Completion::InProgress
        } else if correct {
            Completion::Solved
        } else {
            Completion::FilledIncorrect
        }
    }

    /// Checks the partition invariant: every piece in exactly one location,
    /// every occupied cell pointing back at its occupant, holding order a
    /// permutation of the held pieces.
    pub fn bijection_holds(&self) -> bool {
        let mut held = vec![false; self.pieces.len()];
        for &piece in &self.holding_order {
            let index = (piece - 1) as usize;
            if index >= held.len() || held[index] {
                return false;
            }
            held[index] = true;
        }
        for piece in &self.pieces {
            let in_holding = held[(piece.id - 1) as usize];
            match piece.location {
                PieceLocation::Holding if !in_holding => return false,
                PieceLocation::Cell(cell) => {
                    if in_holding {
                        return false;
                    }
                    let occupant = self.cell(cell).and_then(|c| c.occupant);
                    if occupant != Some(piece.id) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        for cell in &self.cells {
            if let Some(piece) = cell.occupant {
                let located = self.piece(piece).map(|p| p.location);
                if located != Some(PieceLocation::Cell(cell.id)) {
                    return false;
                }
            }
        }
        true
    }

    fn piece_index(&self, id: PieceId) -> Result<usize, PuzzleError> {
        if id >= 1 && id <= self.piece_count() {
            Ok((id - 1) as usize)
        } else {
            Err(PuzzleError::PieceNotFound(id))
        }
    }

    fn cell_index(&self, id: CellId) -> Result<usize, PuzzleError> {
        if id >= 1 && id <= self.piece_count() {
            Ok((id - 1) as usize)
        } else {
            Err(PuzzleError::CellNotFound(id))
        }
    }

    /// Removes the piece from its current location without assigning a new
    /// one. Callers set `location` immediately after.
    fn detach(&mut self, piece_index: usize) {
        match self.pieces[piece_index].location {
            PieceLocation::Holding => {
                let id = self.pieces[piece_index].id;
                self.holding_order.retain(|held| *held != id);
            }
            PieceLocation::Cell(cell) => {
                self.cells[(cell - 1) as usize].occupant = None;
            }
        }
    }

    fn reevaluate(&mut self) -> (Completion, bool) {
        let next = self.evaluate();
        let changed = next != self.completion;
        self.completion = next;
        (next, changed)
    }
}
