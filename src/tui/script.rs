//! Scripted surface for session tests: a TestBackend plus queued keys.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};

use super::run::Surface;

/// Plain key presses for each code.
pub fn keys(codes: &[KeyCode]) -> Vec<KeyEvent> {
    codes
        .iter()
        .map(|&code| KeyEvent::new(code, KeyModifiers::NONE))
        .collect()
}

pub struct ScriptedSurface {
    terminal: Terminal<TestBackend>,
    events: VecDeque<KeyEvent>,
    suspended: bool,
    pub draws: usize,
    pub suspends: usize,
    pub resumes: usize,
}

impl ScriptedSurface {
    pub fn new(events: Vec<KeyEvent>) -> Self {
        ScriptedSurface {
            terminal: Terminal::new(TestBackend::new(60, 24)).expect("test terminal"),
            events: events.into(),
            suspended: false,
            draws: 0,
            suspends: 0,
            resumes: 0,
        }
    }

    /// Screen contents of the last draw, one string per row.
    pub fn rows(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }
}

impl Surface for ScriptedSurface {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
        assert!(!self.suspended, "drew while suspended");
        self.terminal.draw(|frame| render(frame)).expect("test backend draw");
        self.draws += 1;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        assert!(!self.suspended, "read a key while suspended");
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn suspend(&mut self) -> io::Result<()> {
        self.suspended = true;
        self.suspends += 1;
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.suspended = false;
        self.resumes += 1;
        Ok(())
    }
}
