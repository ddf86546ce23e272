//! The board: a validated, ordered path of cells.

use crate::cell::{Cell, CellKind, CellType};
use crate::decoration::Decoration;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Smallest board the engine accepts.
pub const MIN_BOARD_LENGTH: usize = 4;

/// Largest board the engine accepts.
pub const MAX_BOARD_LENGTH: usize = 500;

/// Every n-th cell receives a catalog decoration.
pub const DECORATION_STRIDE: usize = 3;

/// An ordered sequence of cells from start to goal.
///
/// Invariants held by construction:
/// - ids are contiguous and equal to their index
/// - cell 0 is the only start, the last cell is the only goal
/// - every warp target lies on the board
/// - every skip, advance and back magnitude is at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Accepts a caller-built board (e.g. from a map editor) after checking
    /// every board invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`BoardError`] found, scanning from cell 0.
    #[instrument(skip(cells), fields(length = cells.len()))]
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, BoardError> {
        validate(&cells).inspect_err(|e| warn!(error = %e, "Rejected board"))?;
        debug!("Board accepted");
        Ok(Self { cells })
    }

    /// Builds a board the generator already guarantees to be valid.
    pub(crate) fn from_generated(cells: Vec<Cell>) -> Self {
        debug_assert!(validate(&cells).is_ok(), "generator produced an invalid board");
        Self { cells }
    }

    /// All cells, start first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a board holds at least [`MIN_BOARD_LENGTH`] cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Id of the goal cell.
    pub fn last_cell_id(&self) -> usize {
        self.cells.len() - 1
    }

    /// Cell with the given id.
    pub fn get(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Cell at a position already clamped onto the board.
    pub(crate) fn cell_at(&self, id: usize) -> &Cell {
        &self.cells[id.min(self.last_cell_id())]
    }

    /// Counts cells per type.
    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells
            .iter()
            .filter(|c| c.kind().cell_type() == cell_type)
            .count()
    }

    /// Attaches decorations to every [`DECORATION_STRIDE`]-th cell, in
    /// order, while decorations last.
    #[instrument(skip(self, decorations), fields(available = decorations.len()))]
    pub fn decorate(&mut self, decorations: Vec<Decoration>) {
        let mut decorations = decorations.into_iter();
        let mut attached = 0;
        for cell in self.cells.iter_mut().step_by(DECORATION_STRIDE) {
            match decorations.next() {
                Some(decoration) => {
                    cell.set_decoration(decoration);
                    attached += 1;
                }
                None => break,
            }
        }
        debug!(attached, "Board decorated");
    }

    /// Number of decorations [`Board::decorate`] can use on a board of
    /// `length` cells.
    pub fn decoration_slots(length: usize) -> usize {
        length.div_ceil(DECORATION_STRIDE)
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = BoardError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

pub(crate) fn validate(cells: &[Cell]) -> Result<(), BoardError> {
    let length = cells.len();
    if length < MIN_BOARD_LENGTH {
        return Err(BoardError::TooShort { length });
    }
    if length > MAX_BOARD_LENGTH {
        return Err(BoardError::TooLong { length });
    }

    let first = cells[0].kind();
    if first != CellKind::Start {
        return Err(BoardError::MissingStart {
            found: first.cell_type(),
        });
    }
    let last = cells[length - 1].kind();
    if last != CellKind::Goal {
        return Err(BoardError::MissingGoal {
            found: last.cell_type(),
        });
    }

    for (index, cell) in cells.iter().enumerate() {
        let id = cell.id();
        if id != index {
            return Err(BoardError::NonContiguousId { index, id });
        }
        let is_end = index == 0 || index == length - 1;
        match cell.kind() {
            CellKind::Start | CellKind::Goal if !is_end => {
                return Err(BoardError::MisplacedEndpoint {
                    id,
                    kind: cell.kind().cell_type(),
                });
            }
            CellKind::Warp { warp_to } if warp_to >= length => {
                return Err(BoardError::WarpOutOfRange {
                    id,
                    target: warp_to,
                    length,
                });
            }
            CellKind::Skip { value: 0 } | CellKind::Advance { value: 0 } | CellKind::Back { value: 0 } => {
                return Err(BoardError::ZeroMagnitude { id });
            }
            _ => {}
        }
    }

    Ok(())
}
