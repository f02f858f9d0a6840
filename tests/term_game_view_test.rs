use booster_tetris::core::{GameConfig, GameSession};
use booster_tetris::term::{BoardCanvas, CanvasCell, GameView, Hud, Viewport};
use booster_tetris::types::Color;

fn scene(config: GameConfig) -> (GameSession, BoardCanvas, Hud) {
    let canvas = BoardCanvas::new(config.rows, config.cols, config.destroy_animation_ms);
    let session = GameSession::new(config).unwrap();
    (session, canvas, Hud::default())
}

#[test]
fn term_view_renders_border_corners() {
    let (mut session, mut canvas, mut hud) = scene(GameConfig::default());
    session.flush(&mut canvas, &mut hud);
    let view = GameView::default();

    // 10 cells * 2 columns by 20 rows, plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&canvas, &hud, &session.snapshot(), vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let (mut session, mut canvas, mut hud) = scene(GameConfig::default());
    session.board_mut().set_cell(19, 0, Color::GREEN);
    session.flush(&mut canvas, &mut hud);

    let fb = GameView::default().render(&canvas, &hud, &session.snapshot(), Viewport::new(22, 22));
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_pointer_click_fades_region_then_clears_it() {
    let (mut session, mut canvas, mut hud) = scene(GameConfig {
        booster_initial: 1,
        destroy_animation_ms: 100,
        ..GameConfig::default()
    });
    session.board_mut().set_cell(19, 0, Color::RED);
    session.board_mut().set_cell(19, 1, Color::RED);
    session.flush(&mut canvas, &mut hud);

    let view = GameView::default();
    let vp = Viewport::new(22, 22);
    // Terminal column 2 is the right half of board column 0.
    let (row, col) = view.cell_at(20, 10, vp, 2, 20).unwrap();
    assert_eq!((row, col), (19, 0));
    assert!(session.activate_cell(row, col));

    session.flush(&mut canvas, &mut hud);
    assert_eq!(hud.booster, 0);
    assert!(matches!(canvas.get(19, 1), CanvasCell::Fading { .. }));
    let fb = view.render(&canvas, &hud, &session.snapshot(), vp);
    assert_eq!(fb.get(1, 20).unwrap().ch, '▓');

    session.tick(100);
    canvas.advance(100);
    session.flush(&mut canvas, &mut hud);
    assert_eq!(canvas.get(19, 0), CanvasCell::Empty);
    assert_eq!(canvas.get(19, 1), CanvasCell::Empty);
}

#[test]
fn term_cell_at_outside_board_is_none() {
    let view = GameView::default();
    let vp = Viewport::new(22, 22);
    // Border cells.
    assert_eq!(view.cell_at(20, 10, vp, 0, 5), None);
    assert_eq!(view.cell_at(20, 10, vp, 21, 5), None);
    assert_eq!(view.cell_at(20, 10, vp, 5, 21), None);
}
