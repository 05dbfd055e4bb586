//! Terminal setup, teardown and the event source of the main loop
//!
//! The loop only ever sees three things: a key press, a resize, or a tick.
//! A tick is produced whenever the poll times out or the event is one the
//! app does not react to, so the data loop keeps draining requests.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            // Releases and repeats arrive on some platforms; act on presses only
            Event::Key(key) if key.kind == KeyEventKind::Press => TuiEvent::Key(key),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            _ => TuiEvent::Tick,
        }
    }
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    /// Raw mode and the alternate screen are on
    active: bool,
}

impl Tui {
    pub fn new(tick_rate: Duration) -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            tick_rate,
            active: false,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.active = true;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    /// Wait up to one tick for input
    pub fn next_event(&self) -> Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            Ok(event::read()?.into())
        } else {
            Ok(TuiEvent::Tick)
        }
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
