//! Tests for board generation and custom board validation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sugoroku_engine::{
    ADVANCE_STEPS, BACK_STEPS, Board, BoardError, Cell, CellKind, CellType, Decoration, Draw, SKIP_TURNS,
    ScriptedRandom, WARP_MARGIN, generate_board,
};

fn assert_well_formed(board: &Board) {
    let last = board.last_cell_id();
    assert_eq!(board.cells()[0].kind(), CellKind::Start);
    assert_eq!(board.cells()[last].kind(), CellKind::Goal);
    assert_eq!(board.count(CellType::Start), 1);
    assert_eq!(board.count(CellType::Goal), 1);

    for (index, cell) in board.cells().iter().enumerate() {
        assert_eq!(cell.id(), index, "ids must be contiguous");
        match cell.kind() {
            CellKind::Skip { value } => assert!(SKIP_TURNS.contains(&value)),
            CellKind::Advance { value } => assert!(ADVANCE_STEPS.contains(&value)),
            CellKind::Back { value } => assert!(BACK_STEPS.contains(&value)),
            CellKind::Warp { warp_to } => {
                assert!(index > WARP_MARGIN && index + WARP_MARGIN < board.len());
                assert!(warp_to >= WARP_MARGIN && warp_to <= last - WARP_MARGIN);
            }
            CellKind::Normal => {}
            CellKind::Start | CellKind::Goal => assert!(index == 0 || index == last),
        }
    }
}

#[test]
fn test_seeded_boards_are_well_formed() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let length = 4 + (seed as usize % 60);
        let board = generate_board(length, 0.5, &mut rng).expect("valid request");
        assert_eq!(board.len(), length);
        assert_well_formed(&board);
    }
}

#[test]
fn test_same_seed_same_board() {
    let a = generate_board(30, 0.25, &mut StdRng::seed_from_u64(42)).expect("board");
    let b = generate_board(30, 0.25, &mut StdRng::seed_from_u64(42)).expect("board");
    assert_eq!(a, b);
}

#[test]
fn test_full_density_fills_interior() {
    let board = generate_board(40, 1.0, &mut StdRng::seed_from_u64(9)).expect("board");
    let normal = board.count(CellType::Normal);
    // Only warp draws outside the margin fall back to normal cells.
    assert!(normal <= 2 * WARP_MARGIN, "too many normal cells: {}", normal);
    assert_well_formed(&board);
}

#[test]
fn test_scripted_bands() {
    // Density 0.4: bands are [0, 0.1) skip, [0.1, 0.2) advance, [0.2, 0.3) back, [0.3, 0.4) warp.
    let mut rng = ScriptedRandom::new([
        Draw::Unit(0.05),
        Draw::Int(2),
        Draw::Unit(0.15),
        Draw::Int(3),
        Draw::Unit(0.25),
        Draw::Int(1),
        Draw::Unit(0.9),
    ]);
    let board = generate_board(6, 0.4, &mut rng).expect("board");
    let kinds: Vec<CellKind> = board.cells().iter().map(Cell::kind).collect();
    assert_eq!(
        kinds,
        vec![
            CellKind::Start,
            CellKind::Skip { value: 2 },
            CellKind::Advance { value: 3 },
            CellKind::Back { value: 1 },
            CellKind::Normal,
            CellKind::Goal,
        ]
    );
}

#[test]
fn test_generation_rejects_bad_input() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        generate_board(3, 0.2, &mut rng).unwrap_err(),
        BoardError::TooShort { length: 3 }
    );
    assert!(matches!(
        generate_board(10, 1.5, &mut rng),
        Err(BoardError::DensityOutOfRange { .. })
    ));
}

#[test]
fn test_custom_board_round_trips_through_json() {
    let json = r#"[
        {"id": 0, "type": "start"},
        {"id": 1, "type": "skip", "value": 1, "message": "Nap time"},
        {"id": 2, "type": "warp", "warpTo": 0},
        {"id": 3, "type": "goal"}
    ]"#;
    let board: Board = serde_json::from_str(json).expect("valid board");
    assert_eq!(board.cells()[1].message(), Some("Nap time"));
    assert_eq!(board.cells()[2].kind(), CellKind::Warp { warp_to: 0 });

    let encoded = serde_json::to_value(&board).expect("encode");
    assert_eq!(encoded[2]["warpTo"], 0);
    assert_eq!(encoded[1]["type"], "skip");
}

#[test]
fn test_custom_board_rejections() {
    let out_of_range = r#"[
        {"id": 0, "type": "start"},
        {"id": 1, "type": "warp", "warpTo": 9},
        {"id": 2, "type": "normal"},
        {"id": 3, "type": "goal"}
    ]"#;
    assert!(serde_json::from_str::<Board>(out_of_range).is_err());

    let no_goal = vec![
        Cell::new(0, CellKind::Start),
        Cell::new(1, CellKind::Normal),
        Cell::new(2, CellKind::Normal),
        Cell::new(3, CellKind::Normal),
    ];
    assert!(matches!(
        Board::from_cells(no_goal),
        Err(BoardError::MissingGoal { .. })
    ));

    let zero_skip = vec![
        Cell::new(0, CellKind::Start),
        Cell::new(1, CellKind::Skip { value: 0 }),
        Cell::new(2, CellKind::Normal),
        Cell::new(3, CellKind::Goal),
    ];
    assert_eq!(
        Board::from_cells(zero_skip).unwrap_err(),
        BoardError::ZeroMagnitude { id: 1 }
    );
}

#[test]
fn test_decorations_land_on_every_third_cell() {
    let mut board = generate_board(10, 0.0, &mut StdRng::seed_from_u64(1)).expect("board");
    let slots = Board::decoration_slots(board.len());
    assert_eq!(slots, 4);

    let decorations = (0..slots as u32)
        .map(|i| Decoration::new(i, format!("mon-{}", i), format!("{}.png", i)))
        .collect();
    board.decorate(decorations);

    let decorated: Vec<usize> = board
        .cells()
        .iter()
        .filter(|c| c.decoration().is_some())
        .map(Cell::id)
        .collect();
    assert_eq!(decorated, vec![0, 3, 6, 9]);
}
