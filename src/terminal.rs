// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Intensity;
use crate::frame::Edit;

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;
pub const MAX_WIDTH: u16 = 120;

pub enum Input {
    Key(KeyEvent),
    Resize,
}

/// Raw-mode terminal guard and edit-list sink. Restores the terminal on drop.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(cursor::Hide)?;
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.execute(cursor::MoveTo(0, 0))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self { stdout: out })
    }

    /// Current viewport with the rain constraints applied: width capped, one
    /// line reserved for the input row. Falls back silently to a fixed size
    /// when the query fails.
    pub fn size(&self) -> (u16, u16) {
        match terminal::size() {
            Ok((w, h)) => (w.min(MAX_WIDTH), h.saturating_sub(1).max(1)),
            Err(_) => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }

    /// Non-blocking input check: waits at most `timeout`, then reads at most
    /// one event. Key releases and unrecognized events are swallowed.
    pub fn poll_key(&mut self, timeout: Duration) -> Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => Ok(Some(Input::Key(k))),
            Event::Resize(_, _) => Ok(Some(Input::Resize)),
            _ => Ok(None),
        }
    }

    /// Apply one tick's edit list. All cursor moves and glyphs are queued and
    /// flushed in a single write; a failed tick is not retried since the next
    /// diff reissues anything still relevant.
    pub fn apply(&mut self, edits: &[Edit]) -> Result<()> {
        let mut cur_intensity: Option<Intensity> = None;
        for &edit in edits {
            match edit {
                Edit::Clear { row, col } => {
                    self.stdout.queue(cursor::MoveTo(col, row))?;
                    self.stdout.queue(Print(' '))?;
                }
                Edit::Write { row, col, cell } => {
                    self.stdout.queue(cursor::MoveTo(col, row))?;
                    if cur_intensity != Some(cell.intensity) {
                        self.queue_intensity(cell.intensity)?;
                        cur_intensity = Some(cell.intensity);
                    }
                    self.stdout.queue(Print(cell.glyph))?;
                }
            }
        }
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()
    }

    fn queue_intensity(&mut self, intensity: Intensity) -> Result<()> {
        // NormalIntensity first: Bold and Dim do not cancel each other.
        self.stdout
            .queue(SetAttribute(Attribute::NormalIntensity))?;
        match intensity {
            Intensity::Bright => {
                self.stdout.queue(SetForegroundColor(Color::Green))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            Intensity::Normal => {
                self.stdout.queue(SetForegroundColor(Color::Green))?;
            }
            Intensity::Dim => {
                self.stdout.queue(SetForegroundColor(Color::DarkGreen))?;
                self.stdout.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        self.stdout.execute(SetAttribute(Attribute::Reset))?;
        self.stdout.execute(ResetColor)?;
        self.stdout
            .execute(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.execute(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        self.stdout.execute(cursor::Show)?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        self.stdout.execute(cursor::Hide)?;
        Ok(())
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.stdout
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
