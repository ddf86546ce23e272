//! Cell effect application.

use crate::cell::{Cell, CellKind};
use crate::player::Player;
use tracing::{debug, instrument};

/// Applies the effect of `cell` to a player standing at `position`.
///
/// Returns the player's new position; a skip cell instead sets the
/// player's skip counter for their following turns. Advance stops at
/// `last_cell_id`, back stops at 0, warp goes straight to its target.
/// Exactly one effect applies: the cell reached by the effect is not
/// itself triggered.
#[instrument(skip(cell, player), fields(kind = %cell.kind(), player = %player.id()))]
pub fn apply_effect(position: usize, cell: &Cell, player: &mut Player, last_cell_id: usize) -> usize {
    let next = match cell.kind() {
        CellKind::Normal | CellKind::Start | CellKind::Goal => position,
        CellKind::Skip { value } => {
            player.skip_turns = value;
            position
        }
        CellKind::Advance { value } => position.saturating_add(value).min(last_cell_id),
        CellKind::Back { value } => position.saturating_sub(value),
        CellKind::Warp { warp_to } => warp_to,
    };
    if next != position {
        debug!(from = position, to = next, "Cell effect moved player");
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAST: usize = 9;

    fn apply(position: usize, kind: CellKind) -> (usize, Player) {
        let mut player = Player::seated(0, "Ann");
        let cell = Cell::new(position, kind);
        let next = apply_effect(position, &cell, &mut player, LAST);
        (next, player)
    }

    #[test]
    fn test_plain_cells_are_noops() {
        for kind in [CellKind::Normal, CellKind::Start, CellKind::Goal] {
            let (next, player) = apply(4, kind);
            assert_eq!(next, 4);
            assert_eq!(*player.skip_turns(), 0);
        }
    }

    #[test]
    fn test_skip_sets_counter_without_moving() {
        let (next, player) = apply(2, CellKind::Skip { value: 2 });
        assert_eq!(next, 2);
        assert_eq!(*player.skip_turns(), 2);
    }

    #[test]
    fn test_advance_clamps_to_goal() {
        assert_eq!(apply(3, CellKind::Advance { value: 2 }).0, 5);
        assert_eq!(apply(8, CellKind::Advance { value: 4 }).0, LAST);
    }

    #[test]
    fn test_back_clamps_to_start() {
        assert_eq!(apply(5, CellKind::Back { value: 3 }).0, 2);
        assert_eq!(apply(1, CellKind::Back { value: 3 }).0, 0);
    }

    #[test]
    fn test_warp_is_unconditional() {
        assert_eq!(apply(5, CellKind::Warp { warp_to: 1 }).0, 1);
        assert_eq!(apply(2, CellKind::Warp { warp_to: 7 }).0, 7);
    }
}
