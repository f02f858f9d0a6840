//! Terminal game runner (default binary).
//!
//! Reads `BOOSTER_TETRIS_*` configuration, then runs a fixed-timestep loop:
//! poll crossterm events into the command queue, apply them, tick the session,
//! flush visual changes into the canvas and draw.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use booster_tetris::core::{GameConfig, GameSession};
use booster_tetris::event_log::EventLog;
use booster_tetris::input::{map_event, CommandQueue, InputEvent};
use booster_tetris::term::{BoardCanvas, FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use booster_tetris::types::TICK_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    config.validate()?;

    // Open the log before touching the terminal so errors print normally.
    let log = config.log_path.as_deref().map(EventLog::open).transpose()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, log.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(log) = log {
        log.close();
    }
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig, log: Option<&EventLog>) -> Result<()> {
    let mut canvas = BoardCanvas::new(config.rows, config.cols, config.destroy_animation_ms);
    let mut hud = Hud::default();
    let mut session = GameSession::new(config)?;
    session.start();

    let view = GameView::default();
    let mut queue = CommandQueue::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        session.flush(&mut canvas, &mut hud);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&canvas, &hud, &session.snapshot(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                term.invalidate();
            }
            if let Some(input) = map_event(&ev) {
                queue.push(input);
            }
        }

        for input in queue.drain() {
            match input {
                InputEvent::Quit => return Ok(()),
                InputEvent::Command(command) => {
                    session.apply_command(command);
                }
                InputEvent::Pointer { column, row } => {
                    let (rows, cols) = (canvas.rows(), canvas.cols());
                    if let Some((r, c)) = view.cell_at(rows, cols, viewport, column, row) {
                        session.activate_cell(r, c);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
            canvas.advance(TICK_MS);
        }

        for game_event in session.take_events() {
            if let Some(log) = log {
                log.record(&game_event);
            }
        }
    }
}
