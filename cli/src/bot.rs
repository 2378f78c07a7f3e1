use kakera_core::{rand_unit, Completion, ModelEvent, PieceId, PuzzleError, PuzzleModel};

pub(crate) struct BotConfig {
    pub(crate) seed: u32,
    /// Chance per move of deliberately picking a wrong cell, exercising
    /// the displacement and return paths.
    pub(crate) error_rate: f32,
}

/// Drives the model to `Solved` through its public operations only, the
/// way a presentation adapter would. Returns the full event log.
pub(crate) fn run_bot(
    model: &mut PuzzleModel,
    config: &BotConfig,
) -> Result<Vec<ModelEvent>, PuzzleError> {
    let total = model.piece_count();
    let error_rate = config.error_rate.clamp(0.0, 1.0);
    let mut events = Vec::new();
    let mut move_index: u32 = 0;
    // Generous bound against a looping bug; mistake-heavy runs stay far
    // under it.
    let move_cap = total * 16 + 32;

    while model.completion() != Completion::Solved {
        if move_index >= move_cap {
            break;
        }
        let piece = match next_piece(model) {
            Some(piece) => piece,
            None => break,
        };
        let salt = 0xB07_u32 ^ (move_index << 4);
        let mistake = rand_unit(config.seed, salt) < error_rate;
        let target = if mistake {
            wrong_cell_for(model, piece, config.seed, salt)
        } else {
            None
        };
        let event = match target {
            Some(cell) => model.place_piece(piece, cell)?,
            None => {
                let correct = model
                    .piece(piece)
                    .map(|p| p.correct_cell)
                    .ok_or(PuzzleError::PieceNotFound(piece))?;
                model.place_piece(piece, correct)?
            }
        };
        events.push(event);
        move_index += 1;
    }
    Ok(events)
}

/// Next piece worth moving: head of the holding area, else the lowest
/// misplaced piece on the board.
fn next_piece(model: &PuzzleModel) -> Option<PieceId> {
    if let Some(&piece) = model.holding_order().first() {
        return Some(piece);
    }
    model
        .pieces()
        .iter()
        .find(|piece| {
            model
                .cell(piece.correct_cell)
                .map(|cell| cell.occupant != Some(piece.id))
                .unwrap_or(false)
        })
        .map(|piece| piece.id)
}

fn wrong_cell_for(model: &PuzzleModel, piece: PieceId, seed: u32, salt: u32) -> Option<u32> {
    let total = model.piece_count();
    if total < 2 {
        return None;
    }
    let correct = model.piece(piece)?.correct_cell;
    let pick = (rand_unit(seed, salt ^ 0xCE11) * total as f32) as u32 + 1;
    let cell = pick.min(total);
    if cell == correct {
        Some(if cell == total { 1 } else { cell + 1 })
    } else {
        Some(cell)
    }
}
