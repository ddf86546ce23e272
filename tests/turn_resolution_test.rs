//! Tests for turn resolution through the public engine API.

use sugoroku_engine::{Board, Cell, CellKind, GameState, Player, TurnError, TurnEvent};

fn board(kinds: &[CellKind]) -> Board {
    let cells = kinds.iter().enumerate().map(|(id, kind)| Cell::new(id, *kind)).collect();
    Board::from_cells(cells).expect("valid board")
}

fn game(kinds: &[CellKind], players: &[&str]) -> GameState {
    let players = players
        .iter()
        .enumerate()
        .map(|(seat, name)| Player::seated(seat, *name))
        .collect();
    GameState::new("game-test", players, board(kinds)).expect("valid game")
}

fn position(state: &GameState, seat: usize) -> usize {
    *state.players()[seat].position()
}

#[test]
fn test_overshoot_lands_on_goal_and_wins() {
    use CellKind::*;
    let state = game(&[Start, Normal, Normal, Goal], &["Ann", "Bob"]);
    // Ann to cell 1, Bob rolls, then Ann rolls 5 from 1.
    let state = state.resolve_turn(1).expect("turn");
    let state = state.resolve_turn(1).expect("turn");
    assert_eq!(position(&state, 0), 1);

    let state = state.resolve_turn(5).expect("turn");
    assert_eq!(position(&state, 0), 3);
    assert!(state.game_ended());
    assert_eq!(state.winner().map(|p| p.id().as_str()), Some("player-0"));
    assert_eq!(state.last_die_value(), Some(5));
}

#[test]
fn test_skip_cell_costs_following_turns() {
    use CellKind::*;
    let state = game(&[Start, Normal, Skip { value: 2 }, Normal, Normal, Normal, Goal], &["Ann"]);

    let state = state.resolve_turn(2).expect("land on skip");
    assert_eq!(position(&state, 0), 2);
    assert_eq!(*state.players()[0].skip_turns(), 2);

    let state = state.resolve_turn(3).expect("first skipped turn");
    assert_eq!(position(&state, 0), 2);
    assert_eq!(
        state.last_turn(),
        Some(&TurnEvent::Skipped {
            player_id: "player-0".to_string(),
            remaining: 1
        })
    );

    let state = state.resolve_turn(3).expect("second skipped turn");
    assert_eq!(position(&state, 0), 2);
    assert_eq!(*state.players()[0].skip_turns(), 0);

    let state = state.resolve_turn(3).expect("normal roll");
    assert_eq!(position(&state, 0), 5);
}

#[test]
fn test_warp_ends_turn_on_target() {
    use CellKind::*;
    let state = game(
        &[Start, Normal, Normal, Advance { value: 3 }, Normal, Warp { warp_to: 1 }, Normal, Goal],
        &["Ann"],
    );
    let state = state.resolve_turn(5).expect("turn");
    assert_eq!(position(&state, 0), 1);

    let last_move = state.last_move().expect("moved");
    assert_eq!((last_move.from, last_move.to), (0, 1));
    match state.last_turn() {
        Some(TurnEvent::Moved { landed, to, cell, .. }) => {
            assert_eq!((*landed, *to), (5, 1));
            assert_eq!(*cell, Warp { warp_to: 1 });
        }
        other => panic!("expected a move, got {:?}", other),
    }
}

#[test]
fn test_effect_is_not_chained() {
    use CellKind::*;
    // Back from 4 lands on the advance cell at 2, which must not fire.
    let state = game(
        &[Start, Normal, Advance { value: 3 }, Normal, Back { value: 2 }, Normal, Normal, Goal],
        &["Ann"],
    );
    let state = state.resolve_turn(4).expect("turn");
    assert_eq!(position(&state, 0), 2);
}

#[test]
fn test_three_players_cycle_regardless_of_effects() {
    use CellKind::*;
    let state = game(
        &[Start, Skip { value: 1 }, Warp { warp_to: 4 }, Normal, Normal, Normal, Normal, Normal, Goal],
        &["Ann", "Bob", "Cho"],
    );
    let mut state = state;
    let mut order = Vec::new();
    for die in [1, 2, 3, 1, 1, 1] {
        order.push(state.current_player_index());
        state = state.resolve_turn(die).expect("turn");
    }
    assert_eq!(order, vec![0, 1, 2, 0, 1, 2]);
    assert_eq!(state.current_player_index(), 0);
}

#[test]
fn test_rejected_turns() {
    use CellKind::*;
    let state = game(&[Start, Normal, Normal, Goal], &["Ann", "Bob"]);
    assert_eq!(state.resolve_turn(0).unwrap_err(), TurnError::InvalidDie { value: 0 });

    let finished = state.resolve_turn(6).expect("win");
    assert!(finished.game_ended());
    assert_eq!(finished.resolve_turn(1).unwrap_err(), TurnError::GameOver);
    assert_eq!(finished.current_player_index(), 1);
}

#[test]
fn test_state_serializes_for_clients() {
    use CellKind::*;
    let state = game(&[Start, Advance { value: 2 }, Normal, Normal, Goal], &["Ann"]);
    let state = state.resolve_turn(1).expect("turn");

    let json = serde_json::to_value(&state).expect("encode");
    assert_eq!(json["currentPlayerIndex"], 0);
    assert_eq!(json["lastDieValue"], 1);
    assert_eq!(json["players"][0]["position"], 3);
    assert_eq!(json["players"][0]["colorTag"], "red");
    assert_eq!(json["lastTurn"]["outcome"], "moved");
    assert_eq!(json["lastTurn"]["cell"]["type"], "advance");
    assert_eq!(json["gameEnded"], false);
}
