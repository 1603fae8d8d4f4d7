// Copyright (c) 2026 rezky_nightky

use std::io::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chat;
use crate::frame::{diff, CellMap};
use crate::rain::Rain;
use crate::store::MessageStore;
use crate::terminal::{Input, Terminal};

/// Minimum elapsed time between rain ticks. Work is skipped, not queued, when
/// the loop comes around faster than this.
const TICK_DELAY: Duration = Duration::from_millis(70);
/// Input poll timeout; doubles as the idle sleep between iterations.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Rain,
    Hidden,
}

/// Mode machine plus the previous-frame cell cache. The cache is dropped on
/// every transition so the next rain frame redraws fully instead of diffing
/// against stale overlay content.
pub struct ModeState {
    mode: Mode,
    prev_cells: CellMap,
}

impl ModeState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Rain,
            prev_cells: CellMap::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            Mode::Rain => Mode::Hidden,
            Mode::Hidden => Mode::Rain,
        };
        self.prev_cells.clear();
    }

    pub fn force_rain(&mut self) {
        self.mode = Mode::Rain;
        self.prev_cells.clear();
    }

    pub fn invalidate(&mut self) {
        self.prev_cells.clear();
    }

    pub fn prev_cells(&self) -> &CellMap {
        &self.prev_cells
    }

    pub fn put_prev(&mut self, cells: CellMap) {
        self.prev_cells = cells;
    }
}

/// Application context owning every collaborator; only the single loop in
/// `run` ever touches it.
pub struct App {
    term: Terminal,
    rain: Rain,
    store: MessageStore,
    state: ModeState,
    input: String,
    sender: String,
    last_tick: Instant,
    chat_dirty: bool,
    running: bool,
}

impl App {
    pub fn new(store: MessageStore) -> Result<Self> {
        let term = Terminal::new()?;
        let (width, height) = term.size();
        Ok(Self {
            term,
            rain: Rain::new(width, height),
            store,
            state: ModeState::new(),
            input: String::new(),
            sender: chat::sender_name(),
            last_tick: Instant::now() - TICK_DELAY,
            chat_dirty: true,
            running: true,
        })
    }

    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<()> {
        while self.running && !shutdown.load(Ordering::Relaxed) {
            match self.state.mode() {
                Mode::Rain => self.rain_tick()?,
                Mode::Hidden => self.chat_tick()?,
            }

            if let Some(input) = self.term.poll_key(POLL_TIMEOUT)? {
                match input {
                    Input::Key(key) => self.handle_key(key)?,
                    Input::Resize => {
                        self.term.clear_screen()?;
                        self.state.invalidate();
                        self.chat_dirty = true;
                    }
                }
            }
        }
        Ok(())
    }

    fn rain_tick(&mut self) -> Result<()> {
        let now = Instant::now();
        if now.duration_since(self.last_tick) < TICK_DELAY {
            return Ok(());
        }
        self.last_tick = now;

        let (width, height) = self.term.size();
        self.rain.advance(height);
        let cells = self.rain.project(width, height);
        let edits = diff(self.state.prev_cells(), &cells);
        if !edits.is_empty() {
            self.term.apply(&edits)?;
        }
        self.state.put_prev(cells);
        Ok(())
    }

    fn chat_tick(&mut self) -> Result<()> {
        if !self.chat_dirty {
            return Ok(());
        }
        self.chat_dirty = false;

        let (width, height) = self.term.size();
        // Listing errors degrade to an empty history rather than surfacing.
        let messages = self.store.list_recent(chat::HISTORY_LIMIT).unwrap_or_default();
        chat::draw(self.term.out(), &messages, &self.input, width, height)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Raw mode swallows SIGINT; Ctrl-C arrives here as a key event.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return Ok(());
        }

        // Destructive, immediate, no confirmation.
        if key.code == KeyCode::F(1) {
            let _ = self.store.clear_all();
            self.chat_dirty = true;
            return Ok(());
        }

        match self.state.mode() {
            Mode::Rain => {
                if let KeyCode::Char('m') | KeyCode::Char('M') = key.code {
                    self.enter_hidden()?;
                }
            }
            Mode::Hidden => match key.code {
                KeyCode::Esc => self.leave_hidden()?,
                KeyCode::Enter => {
                    let content = self.input.trim().to_string();
                    self.input.clear();
                    if !content.is_empty() {
                        // Append errors drop the message silently; nothing
                        // partial is ever committed.
                        let _ = self.store.append(&self.sender, &content);
                    }
                    self.chat_dirty = true;
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    self.chat_dirty = true;
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    self.chat_dirty = true;
                }
                _ => {}
            },
        }
        Ok(())
    }

    fn enter_hidden(&mut self) -> Result<()> {
        self.state.toggle();
        self.input.clear();
        self.chat_dirty = true;
        self.term.clear_screen()?;
        self.term.show_cursor()
    }

    fn leave_hidden(&mut self) -> Result<()> {
        self.state.force_rain();
        self.term.hide_cursor()?;
        self.term.clear_screen()
    }
}
