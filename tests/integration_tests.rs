//! Integration tests - whole-session scenarios

use booster_tetris::core::{GameConfig, GameEvent, GameSession};
use booster_tetris::types::{Color, GameCommand, ShapeKind};

fn session_with(config: GameConfig) -> GameSession {
    GameSession::new(config).unwrap()
}

/// Shift the active piece, soft drop until it is blocked, then let the fall
/// tick commit it.
fn place(session: &mut GameSession, dx: i32) {
    let command = if dx < 0 {
        GameCommand::MoveLeft
    } else {
        GameCommand::MoveRight
    };
    for _ in 0..dx.unsigned_abs() {
        assert!(session.apply_command(command));
    }
    while session.apply_command(GameCommand::SoftDrop) {}
    session.tick(1000);
}

#[test]
fn test_filling_bottom_row_clears_and_levels_up() {
    let mut session = session_with(GameConfig::default());
    session.queue_piece(ShapeKind::Line, 0);
    session.queue_piece(ShapeKind::Line, 0);
    session.queue_piece(ShapeKind::Line, 1);
    session.queue_piece(ShapeKind::Line, 1);
    session.start();

    place(&mut session, -3); // columns 0..=3
    place(&mut session, 1); // columns 4..=7
    place(&mut session, 3); // column 8, rows 16..=19
    assert_eq!(session.total_lines_cleared(), 0);
    place(&mut session, 4); // column 9, completes row 19

    assert_eq!(session.total_lines_cleared(), 1);
    assert_eq!(session.level(), 1);
    assert_eq!(session.booster(), 1);
    assert!(session.booster_enabled());
    assert!((session.fall_speed() - 60.0).abs() < 1e-9);

    // The two vertical lines lost their bottom cell and shifted down.
    let board = session.board();
    assert_eq!(board.occupied_count(), 6);
    for row in 17..20 {
        assert_eq!(board.color(row, 8), Some(Color::RED));
        assert_eq!(board.color(row, 9), Some(Color::RED));
    }

    let events = session.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::LinesCleared { rows, total_lines: 1 } if rows == &vec![19]
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::LevelUp { level: 1, booster: 1, .. })));
}

#[test]
fn test_booster_destroys_isolated_cell() {
    let mut session = session_with(GameConfig {
        booster_initial: 1,
        destroy_animation_ms: 0,
        ..GameConfig::default()
    });
    session.board_mut().set_cell(19, 0, Color::RED);

    assert!(session.activate_cell(19, 0));
    assert!(!session.board().is_occupied(19, 0));
    assert_eq!(session.booster(), 0);
    assert!(!session.booster_enabled());

    // No charges left.
    session.board_mut().set_cell(19, 0, Color::RED);
    assert!(!session.activate_cell(19, 0));
    assert!(session.board().is_occupied(19, 0));
}

#[test]
fn test_booster_then_gravity_after_fade() {
    let mut session = session_with(GameConfig {
        booster_initial: 2,
        destroy_animation_ms: 100,
        ..GameConfig::default()
    });
    {
        let board = session.board_mut();
        board.set_cell(17, 0, Color::YELLOW);
        board.set_cell(18, 0, Color::GREEN);
        board.set_cell(19, 0, Color::GREEN);
    }

    assert!(session.activate_cell(19, 0));
    assert!(session.is_destroying());
    // The yellow cell hangs until the fade completes.
    assert!(session.board().is_occupied(17, 0));
    assert_eq!(session.fading_cells().count(), 2);

    session.tick(60);
    assert!(session.board().is_occupied(17, 0));
    session.tick(60);
    assert!(!session.is_destroying());
    assert_eq!(session.board().color(19, 0), Some(Color::YELLOW));
    assert_eq!(session.board().occupied_count(), 1);
}

#[test]
fn test_activation_on_empty_cell_keeps_charge() {
    let mut session = session_with(GameConfig {
        booster_initial: 1,
        ..GameConfig::default()
    });
    assert!(!session.activate_cell(10, 5));
    assert_eq!(session.booster(), 1);
}

#[test]
fn test_floating_square_drops_to_floor() {
    let mut session = session_with(GameConfig::default());
    for (row, col) in [(5, 0), (5, 1), (6, 0), (6, 1)] {
        session.board_mut().set_cell(row, col, Color::YELLOW);
    }

    let report = session.drop_floating_blocks();
    assert_eq!(report.clusters_moved, 1);

    let board = session.board();
    for (row, col) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
        assert!(board.is_occupied(row, col));
    }
    assert_eq!(board.occupied_count(), 4);
}

fn full_row_with_hanging_cell() -> GameSession {
    let mut session = session_with(GameConfig::default());
    let board = session.board_mut();
    for col in 0..10 {
        board.set_cell(19, col, Color::GREEN);
    }
    board.set_cell(16, 2, Color::PURPLE);
    session
}

#[test]
fn test_clear_then_drop() {
    let mut session = full_row_with_hanging_cell();
    assert_eq!(session.clear_lines().lines_cleared(), 1);
    assert!(session.board().is_occupied(17, 2));
    session.drop_floating_blocks();

    assert_eq!(session.board().color(19, 2), Some(Color::PURPLE));
    assert_eq!(session.board().occupied_count(), 1);
}

#[test]
fn test_drop_then_clear() {
    let mut session = full_row_with_hanging_cell();
    session.drop_floating_blocks();
    assert_eq!(session.board().color(18, 2), Some(Color::PURPLE));
    assert_eq!(session.clear_lines().lines_cleared(), 1);

    assert_eq!(session.board().color(19, 2), Some(Color::PURPLE));
    assert_eq!(session.board().occupied_count(), 1);
}

#[test]
fn test_game_over_on_occupied_top_row() {
    let mut session = session_with(GameConfig::default());
    session.board_mut().set_cell(0, 0, Color::ORANGE);

    assert!(!session.start());
    assert!(session.is_game_over());
    assert!(session.active().is_none());
    assert!(!session.apply_command(GameCommand::MoveLeft));

    // Restart is always honored.
    assert!(session.apply_command(GameCommand::Restart));
    assert!(!session.is_game_over());
    assert!(session.active().is_some());
    assert_eq!(session.board().occupied_count(), 0);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut session = session_with(GameConfig::default());
    session.queue_piece(ShapeKind::T, 0);
    session.start();
    session.board_mut().set_cell(19, 9, Color::RED);

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["rows"], 20);
    assert_eq!(json["cols"], 10);
    assert_eq!(json["board"][19][9], 0xff0000);
    assert_eq!(json["active"]["kind"], "t");
    assert_eq!(json["game_over"], false);
}

#[test]
fn test_same_seed_same_pieces() {
    let config = GameConfig {
        seed: 42,
        ..GameConfig::default()
    };
    let mut a = session_with(config.clone());
    let mut b = session_with(config);
    a.start();
    b.start();

    for _ in 0..5 {
        assert_eq!(a.active().map(|p| (p.kind, p.offsets)), b.active().map(|p| (p.kind, p.offsets)));
        while a.apply_command(GameCommand::SoftDrop) {}
        while b.apply_command(GameCommand::SoftDrop) {}
        a.tick(1000);
        b.tick(1000);
    }
}
