//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! A frame is encoded into an in-memory byte buffer with crossterm commands and
//! written in one go. The first frame, a frame of a different size, and the
//! frame after [`TerminalRenderer::invalidate`] are painted in full; otherwise
//! only horizontal runs of changed glyphs are repainted.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen, if it can be trusted for diffing
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    /// Renderer with mouse capture, so board clicks reach the game.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.queue(EnableMouseCapture)?;
        self.write_out()
    }

    /// Undo everything [`TerminalRenderer::enter`] did.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(DisableMouseCapture)?;
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previously shown buffer through `fb`.
    ///
    /// Keep one framebuffer in the game loop and pass it every frame: the two
    /// buffers trade places instead of being cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut previous = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.out)?;
                shown
            }
            Some(mut stale) => {
                encode_full_into(fb, &mut self.out)?;
                stale.resize(fb.width(), fb.height());
                stale
            }
            None => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.write_out()?;

        std::mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Encode a complete repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let glyph = fb.get(x, y).unwrap_or_default();
            pen.set(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    pen.reset(out)
}

/// Encode only what differs between `prev` and `next` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for run in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let glyph = next.get(x, run.y).unwrap_or_default();
            pen.set(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    pen.reset(out)
}

/// Tracks the terminal's current style so unchanged parts are not re-sent.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    attrs: Option<(bool, bool)>,
}

impl Pen {
    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let attrs = (style.bold, style.dim);
        if self.attrs != Some(attrs) {
            // Attribute reset also clears colors on some terminals.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.attrs = Some(attrs);
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(style.fg) {
            out.queue(SetForegroundColor(term_color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            out.queue(SetBackgroundColor(term_color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        Ok(())
    }

    fn reset(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal stretch of changed glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Maximal runs of glyphs that differ between two same-sized frames, row by
/// row, left to right.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    let width = next.width();
    let differs = move |x: u16, y: u16| prev.get(x, y) != next.get(x, y);

    (0..next.height()).flat_map(move |y| {
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x, y) {
                x += 1;
            }
            if x >= width {
                return None;
            }
            let start = x;
            while x < width && differs(x, y) {
                x += 1;
            }
            Some(Run { x: start, y, len: x - start })
        })
    })
}
