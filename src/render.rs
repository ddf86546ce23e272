//! Plain-text rendering for the terminal `play` command.

use sugoroku_engine::{CellKind, GameState, TurnEvent};

/// Cells per printed row.
const ROW_WIDTH: usize = 10;

/// One-character symbol for a cell kind.
pub fn cell_symbol(kind: CellKind) -> char {
    match kind {
        CellKind::Normal => '.',
        CellKind::Start => 'S',
        CellKind::Goal => 'G',
        CellKind::Skip { .. } => 'z',
        CellKind::Advance { .. } => '+',
        CellKind::Back { .. } => '-',
        CellKind::Warp { .. } => '@',
    }
}

/// Renders the board with each player's seat number on their cell.
///
/// Cells holding several players show `*`.
pub fn render_board(state: &GameState) -> String {
    let mut out = String::new();
    for row in state.board().cells().chunks(ROW_WIDTH) {
        let Some(first) = row.first() else { continue };
        out.push_str(&format!("{:>4} ", first.id()));
        for cell in row {
            let mut here = state
                .players()
                .iter()
                .enumerate()
                .filter(|(_, p)| *p.position() == cell.id());
            let mark = match (here.next(), here.next()) {
                (None, _) => cell_symbol(cell.kind()),
                (Some((seat, _)), None) => char::from_digit((seat % 10) as u32, 10).unwrap_or('?'),
                (Some(_), Some(_)) => '*',
            };
            out.push(mark);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// One-line description of a resolved turn.
pub fn describe_turn(state: &GameState, die: u32) -> String {
    let Some(event) = state.last_turn() else {
        return String::from("No turn played yet");
    };
    let name = state
        .player(event.player_id())
        .map_or(event.player_id().as_str(), |p| p.name().as_str());
    match event {
        TurnEvent::Skipped { remaining, .. } => {
            format!("{} sits out this turn ({} more to skip)", name, remaining)
        }
        TurnEvent::Moved {
            from,
            landed,
            to,
            cell,
            reached_goal,
            ..
        } => {
            let mut line = format!("{} rolls {}: {} -> {}", name, die, from, landed);
            if cell.is_special() {
                line.push_str(&format!(" ({}) -> {}", cell.flavor_message(), to));
            }
            if *reached_goal {
                line.push_str(" GOAL!");
            }
            line
        }
    }
}

/// Legend for [`render_board`].
pub fn legend() -> &'static str {
    "S start  G goal  . normal  z skip  + advance  - back  @ warp  0-9 player  * several"
}
