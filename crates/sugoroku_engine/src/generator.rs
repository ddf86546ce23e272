//! Random board generation.

use crate::board::{Board, MAX_BOARD_LENGTH, MIN_BOARD_LENGTH};
use crate::cell::{Cell, CellKind, CellType};
use crate::error::BoardError;
use crate::random::RandomSource;
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument};

/// Turns a skip cell can cost.
pub const SKIP_TURNS: RangeInclusive<u32> = 1..=2;

/// Cells an advance cell can move forward.
pub const ADVANCE_STEPS: RangeInclusive<usize> = 2..=4;

/// Cells a back cell can move backward.
pub const BACK_STEPS: RangeInclusive<usize> = 1..=3;

/// Warps neither sit on nor target the first or last this-many cells.
pub const WARP_MARGIN: usize = 5;

/// Special cell types in band order: `[0, d/4)` skip, then advance, back,
/// warp; draws at or above the density are normal.
const BANDS: [CellType; 4] = [CellType::Skip, CellType::Advance, CellType::Back, CellType::Warp];

/// Generates a board of `length` cells.
///
/// Cell 0 is the start and cell `length - 1` the goal. Each interior cell
/// draws one uniform value: the interval `[0, density)` is split into four
/// equal bands (skip, advance, back, warp) and anything above is normal.
/// Warps are only placed strictly inside [`WARP_MARGIN`] of both ends; a
/// warp draw outside that window yields a normal cell.
///
/// # Errors
///
/// - [`BoardError::TooShort`] if `length < MIN_BOARD_LENGTH`
/// - [`BoardError::TooLong`] if `length > MAX_BOARD_LENGTH`
/// - [`BoardError::DensityOutOfRange`] if `density` is NaN or outside `[0, 1]`
#[instrument(skip(rng))]
pub fn generate_board<R>(length: usize, density: f64, rng: &mut R) -> Result<Board, BoardError>
where
    R: RandomSource + ?Sized,
{
    if length < MIN_BOARD_LENGTH {
        return Err(BoardError::TooShort { length });
    }
    if length > MAX_BOARD_LENGTH {
        return Err(BoardError::TooLong { length });
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(BoardError::DensityOutOfRange { density });
    }

    let mut cells = Vec::with_capacity(length);
    cells.push(Cell::with_flavor(0, CellKind::Start));
    for id in 1..length - 1 {
        let kind = interior_kind(id, length, density, rng);
        cells.push(Cell::with_flavor(id, kind));
    }
    cells.push(Cell::with_flavor(length - 1, CellKind::Goal));

    let board = Board::from_generated(cells);
    info!(
        length,
        skip = board.count(CellType::Skip),
        advance = board.count(CellType::Advance),
        back = board.count(CellType::Back),
        warp = board.count(CellType::Warp),
        "Board generated"
    );
    Ok(board)
}

fn interior_kind<R>(id: usize, length: usize, density: f64, rng: &mut R) -> CellKind
where
    R: RandomSource + ?Sized,
{
    let draw = rng.next_unit();
    let Some(band) = band_for(draw, density) else {
        return CellKind::Normal;
    };

    match band {
        CellType::Skip => CellKind::Skip {
            value: rng.next_in_range(*SKIP_TURNS.start() as usize, *SKIP_TURNS.end() as usize) as u32,
        },
        CellType::Advance => CellKind::Advance {
            value: rng.next_in_range(*ADVANCE_STEPS.start(), *ADVANCE_STEPS.end()),
        },
        CellType::Back => CellKind::Back {
            value: rng.next_in_range(*BACK_STEPS.start(), *BACK_STEPS.end()),
        },
        CellType::Warp if warp_allowed(id, length) => CellKind::Warp {
            warp_to: rng.next_in_range(WARP_MARGIN, length - 1 - WARP_MARGIN),
        },
        _ => {
            debug!(id, "Warp draw outside margin, using normal cell");
            CellKind::Normal
        }
    }
}

fn band_for(draw: f64, density: f64) -> Option<CellType> {
    if draw >= density {
        return None;
    }
    let width = density / BANDS.len() as f64;
    let index = ((draw / width) as usize).min(BANDS.len() - 1);
    Some(BANDS[index])
}

/// Warps sit strictly inside the margin: `WARP_MARGIN < id < length - WARP_MARGIN`.
fn warp_allowed(id: usize, length: usize) -> bool {
    id > WARP_MARGIN && id + WARP_MARGIN < length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Draw, ScriptedRandom};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rejects_bad_requests() {
        let mut rng = ScriptedRandom::default();
        assert_eq!(
            generate_board(3, 0.25, &mut rng).unwrap_err(),
            BoardError::TooShort { length: 3 }
        );
        assert_eq!(
            generate_board(usize::MAX, 0.25, &mut rng).unwrap_err(),
            BoardError::TooLong { length: usize::MAX }
        );
        assert_eq!(
            generate_board(MAX_BOARD_LENGTH + 1, 0.25, &mut rng).unwrap_err(),
            BoardError::TooLong {
                length: MAX_BOARD_LENGTH + 1
            }
        );
        assert!(matches!(
            generate_board(10, 1.5, &mut rng),
            Err(BoardError::DensityOutOfRange { .. })
        ));
        assert!(matches!(
            generate_board(10, f64::NAN, &mut rng),
            Err(BoardError::DensityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_band_partition() {
        let d = 0.4;
        assert_eq!(band_for(0.0, d), Some(CellType::Skip));
        assert_eq!(band_for(0.099, d), Some(CellType::Skip));
        assert_eq!(band_for(0.1, d), Some(CellType::Advance));
        assert_eq!(band_for(0.25, d), Some(CellType::Back));
        assert_eq!(band_for(0.35, d), Some(CellType::Warp));
        assert_eq!(band_for(0.4, d), None);
        assert_eq!(band_for(0.0, 0.0), None);
    }

    #[test]
    fn test_scripted_board() {
        // Length 14: interior 1..=12, warps allowed on 6..=8.
        let mut rng = ScriptedRandom::new([
            Draw::Unit(0.01), // 1: skip
            Draw::Int(2),
            Draw::Unit(0.07), // 2: advance
            Draw::Int(4),
            Draw::Unit(0.13), // 3: back
            Draw::Int(1),
            Draw::Unit(0.19), // 4: warp outside margin -> normal
            Draw::Unit(0.5),  // 5: normal
            Draw::Unit(0.19), // 6: warp
            Draw::Int(8),
        ]);
        let board = generate_board(14, 0.2, &mut rng).expect("board");

        let kinds: Vec<CellKind> = board.cells().iter().map(Cell::kind).collect();
        assert_eq!(kinds[0], CellKind::Start);
        assert_eq!(kinds[1], CellKind::Skip { value: 2 });
        assert_eq!(kinds[2], CellKind::Advance { value: 4 });
        assert_eq!(kinds[3], CellKind::Back { value: 1 });
        assert_eq!(kinds[4], CellKind::Normal);
        assert_eq!(kinds[5], CellKind::Normal);
        assert_eq!(kinds[6], CellKind::Warp { warp_to: 8 });
        assert!(kinds[7..13].iter().all(|k| *k == CellKind::Normal));
        assert_eq!(kinds[13], CellKind::Goal);
        assert_eq!(board.get(1).and_then(Cell::message), Some("Skip 2 turns!"));
    }

    #[test]
    fn test_random_boards_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        for length in [4, 5, 11, 12, 30, 60, MAX_BOARD_LENGTH] {
            for density in [0.0, 0.25, 0.6, 1.0] {
                let board = generate_board(length, density, &mut rng).expect("board");
                assert_eq!(board.len(), length);
                assert!(Board::from_cells(board.cells().to_vec()).is_ok());
                for cell in board.cells() {
                    match cell.kind() {
                        CellKind::Skip { value } => assert!(SKIP_TURNS.contains(&value)),
                        CellKind::Advance { value } => assert!(ADVANCE_STEPS.contains(&value)),
                        CellKind::Back { value } => assert!(BACK_STEPS.contains(&value)),
                        CellKind::Warp { warp_to } => {
                            assert!(warp_allowed(cell.id(), length));
                            assert!((WARP_MARGIN..length - WARP_MARGIN).contains(&warp_to));
                        }
                        _ => {}
                    }
                    assert!(cell.message().is_some());
                }
            }
        }
    }

    #[test]
    fn test_zero_density_is_all_normal() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = generate_board(30, 0.0, &mut rng).expect("board");
        assert_eq!(board.count(CellType::Normal), 28);
    }
}
