//! Effects boundary: key mapping, terminal lifecycle, session loop.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to a [`Surface`]; [`TerminalSurface`] is the real
//! crossterm + ratatui implementation.
//!
//! The session is a single-threaded loop: draw, block on one key, apply
//! the transition. Action callbacks run between `suspend` and `resume`
//! so they get the terminal in its normal mode.
//!
//! The menu is drawn on stderr. Stdout stays free for whatever the caller
//! prints after the session, so `sel=$(picklist ...)` captures only the
//! selection. Keys are read from the controlling tty by crossterm.

use std::io::{self, Stderr, Write};
use std::sync::Once;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use crate::action::ActionRegistry;
use crate::error::MenuError;
use crate::types::{ItemId, MenuItem};

use super::state::{Input, MenuState, Transition};
use super::update::{apply_result, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Input.
///
/// Returns None for keys the menu ignores.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Input::Interrupt),
            // LF and CR typed as control characters
            KeyCode::Char('j') | KeyCode::Char('m') => Some(Input::Commit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(Input::SwitchGroup),
        KeyCode::Up => Some(Input::MoveUp),
        KeyCode::Down => Some(Input::MoveDown),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(Input::Commit),
        _ => None,
    }
}

// ============================================================================
// SURFACE
// ============================================================================

/// Terminal primitives the session loop needs.
///
/// `suspend` hands the terminal back to normal mode before an action
/// callback runs; `resume` reclaims it afterwards and must force a full
/// redraw on the next `draw`.
pub trait Surface {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()>;
    fn read_key(&mut self) -> io::Result<KeyEvent>;
    fn suspend(&mut self) -> io::Result<()>;
    fn resume(&mut self) -> io::Result<()>;
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

fn enter_screen<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.execute(EnterAlternateScreen)?;
    Ok(())
}

fn leave_screen<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.execute(LeaveAlternateScreen)?;
    out.execute(crossterm::cursor::Show)?;
    Ok(())
}

/// Put the terminal into menu mode: raw input, alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    enter_screen(&mut io::stderr())
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    leave_screen(&mut io::stderr())
}

/// Install (once per process) a panic hook that restores the terminal
/// before printing the panic.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Best-effort terminal restoration
            let _ = restore_terminal();
            original_hook(panic_info);
        }));
    });
}

/// The real terminal, owned exclusively for the duration of a session.
///
/// Call [`release`](Self::release) to restore the terminal and observe
/// failures; dropping an unreleased surface restores it best-effort.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    active: bool,
}

impl TerminalSurface {
    /// Take over the terminal.
    pub fn acquire() -> io::Result<Self> {
        install_panic_hook();
        setup_terminal()?;

        let terminal = match Terminal::new(CrosstermBackend::new(io::stderr())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = restore_terminal();
                return Err(e);
            }
        };

        let mut surface = TerminalSurface {
            terminal,
            active: true,
        };
        surface.terminal.hide_cursor()?;
        surface.redraw_all()?;
        log::debug!("terminal acquired");
        Ok(surface)
    }

    /// Clear the screen and force a full repaint on the next draw.
    ///
    /// `Terminal::clear` asks the terminal for the cursor position, and
    /// crossterm sends that query to stdout, which may be a pipe. A
    /// fullscreen resize clears without asking.
    fn redraw_all(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        self.terminal.resize(Rect::new(0, 0, size.width, size.height))
    }

    /// Give the terminal back.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        log::debug!("terminal released");
        restore_terminal()
    }
}

impl Surface for TerminalSurface {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => return Ok(key),
                // Null maps to no input, so the loop redraws at the new size
                Event::Resize(_, _) => return Ok(KeyEvent::new(KeyCode::Null, KeyModifiers::NONE)),
                _ => {} // ignore mouse, focus, paste
            }
        }
    }

    fn suspend(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            restore_terminal()?;
        }
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        if !self.active {
            setup_terminal()?;
            self.active = true;
            self.terminal.hide_cursor()?;
            self.redraw_all()?;
        }
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if self.active {
            let _ = restore_terminal();
        }
    }
}

// ============================================================================
// SESSION LOOP
// ============================================================================

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ending {
    /// Finished with these items (list order).
    Finished(Vec<ItemId>),
    /// Ctrl+C.
    Interrupted,
}

/// Run the render/input loop until the session ends.
///
/// The surface must already be acquired; the caller releases it.
pub fn drive<T, S>(
    surface: &mut S,
    state: &mut MenuState<T>,
    registry: &mut ActionRegistry<T>,
) -> Result<Ending, MenuError>
where
    T: MenuItem,
    S: Surface + ?Sized,
{
    loop {
        surface.draw(&mut |frame: &mut Frame<'_>| render(state, frame))?;

        let key = surface.read_key()?;
        let Some(input) = map_key(key) else {
            log::trace!("ignoring key {:?}", key.code);
            continue;
        };

        match update(state, &input) {
            Transition::Continue => {}
            Transition::Finish(ids) => return Ok(Ending::Finished(ids)),
            Transition::Interrupt => return Ok(Ending::Interrupted),
            Transition::Invoke(index) => {
                let selection = state.selected_values();

                surface.suspend()?;
                let result = registry.invoke(index, &selection);
                surface.resume()?;

                if let Transition::Finish(ids) = apply_result(state, result.unwrap_or_default()) {
                    return Ok(Ending::Finished(ids));
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionResult;
    use crate::tui::script::{keys, ScriptedSurface};
    use crate::types::MenuOptions;

    fn session(
        items: Vec<&'static str>,
        toggle: bool,
        mut registry: ActionRegistry<&'static str>,
    ) -> (MenuState<&'static str>, ActionRegistry<&'static str>) {
        registry.ensure_finish();
        let options = MenuOptions {
            toggle,
            ..MenuOptions::default()
        };
        let state = MenuState::new("Pick", items, options, registry.names());
        (state, registry)
    }

    // -- Key mapping --

    #[test]
    fn tab_switches_group() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Input::SwitchGroup));
    }

    #[test]
    fn arrow_keys_map_to_movement() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(map_key(up), Some(Input::MoveUp));
        assert_eq!(map_key(down), Some(Input::MoveDown));
    }

    #[test]
    fn enter_variants_commit() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        let ctrl_m = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL);
        assert_eq!(map_key(enter), Some(Input::Commit));
        assert_eq!(map_key(ctrl_j), Some(Input::Commit));
        assert_eq!(map_key(ctrl_m), Some(Input::Commit));
    }

    #[test]
    fn ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Input::Interrupt));
    }

    #[test]
    fn other_keys_are_ignored() {
        for code in [KeyCode::Char('j'), KeyCode::Char('q'), KeyCode::Esc, KeyCode::Left] {
            assert_eq!(map_key(KeyEvent::new(code, KeyModifiers::NONE)), None);
        }
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    // -- Terminal output --

    #[test]
    fn screen_switch_writes_to_the_given_stream() {
        let mut out: Vec<u8> = Vec::new();
        enter_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?1049h");

        out.clear();
        leave_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?1049l\x1b[?25h");
    }

    // -- Session loop --

    #[test]
    fn toggle_then_finish_returns_selection() {
        let (mut state, mut registry) = session(vec!["A", "B", "C"], true, ActionRegistry::new());
        let mut surface = ScriptedSurface::new(keys(&[
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Tab,
            KeyCode::Enter,
        ]));

        let ending = drive(&mut surface, &mut state, &mut registry).unwrap();

        let b = state.items[1].id;
        assert_eq!(ending, Ending::Finished(vec![b]));
        assert_eq!(surface.suspends, 0);
    }

    #[test]
    fn ignored_keys_keep_looping() {
        let (mut state, mut registry) = session(vec!["A", "B"], false, ActionRegistry::new());
        let mut surface = ScriptedSurface::new(keys(&[
            KeyCode::Char('x'),
            KeyCode::Esc,
            KeyCode::Enter,
        ]));

        let ending = drive(&mut surface, &mut state, &mut registry).unwrap();

        assert_eq!(ending, Ending::Finished(vec![state.items[0].id]));
        assert_eq!(surface.draws, 3);
    }

    #[test]
    fn action_runs_between_suspend_and_resume() {
        let registry = ActionRegistry::new()
            .with("Add", |_: &[&'static str]| ActionResult::none().adding(vec!["D"]));
        let (mut state, mut registry) = session(vec!["A"], true, registry);
        let mut surface = ScriptedSurface::new(keys(&[
            KeyCode::Tab,
            KeyCode::Enter, // Add
            KeyCode::Down,
            KeyCode::Enter, // Finish
        ]));

        drive(&mut surface, &mut state, &mut registry).unwrap();

        assert_eq!(surface.suspends, 1);
        assert_eq!(surface.resumes, 1);
        let values: Vec<_> = state.items.iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["A", "D"]);
    }

    #[test]
    fn action_finish_ends_session() {
        let registry = ActionRegistry::new()
            .with("Done", |_: &[&'static str]| ActionResult::none().finishing());
        let (mut state, mut registry) = session(vec!["A", "B"], true, registry);
        let mut surface = ScriptedSurface::new(keys(&[
            KeyCode::Enter, // select A
            KeyCode::Tab,
            KeyCode::Enter, // Done
        ]));

        let ending = drive(&mut surface, &mut state, &mut registry).unwrap();

        assert_eq!(ending, Ending::Finished(vec![state.items[0].id]));
    }

    #[test]
    fn ctrl_c_ends_session_interrupted() {
        let (mut state, mut registry) = session(vec!["A"], true, ActionRegistry::new());
        let mut surface = ScriptedSurface::new(vec![KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )]);

        let ending = drive(&mut surface, &mut state, &mut registry).unwrap();
        assert_eq!(ending, Ending::Interrupted);
    }

    #[test]
    fn exhausted_input_is_a_terminal_error() {
        let (mut state, mut registry) = session(vec!["A"], true, ActionRegistry::new());
        let mut surface = ScriptedSurface::new(vec![]);

        let err = drive(&mut surface, &mut state, &mut registry).unwrap_err();
        assert!(matches!(err, MenuError::Terminal(_)));
    }
}
