//! Menu sessions: the public entry point.
//!
//! ```no_run
//! use picklist::{ActionResult, Menu};
//!
//! let picked = Menu::new("Fruit", vec!["apple".to_string(), "pear".to_string()])
//!     .toggle(true)
//!     .action("Drop", |selection: &[String]| {
//!         ActionResult::none().removing(selection.to_vec())
//!     })
//!     .run()?;
//! # Ok::<(), picklist::MenuError>(())
//! ```
//!
//! Use [`Menu::run_outcome`] to also get the item list after the actions
//! changed it.

use crate::action::{ActionRegistry, ActionResult};
use crate::error::MenuError;
use crate::tui::run::{drive, Ending, Surface, TerminalSurface};
use crate::tui::state::MenuState;
use crate::types::{HighlightColor, MenuItem, MenuOptions, Selector};

/// What a finished session leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOutcome<T> {
    /// Selected items in list order (or the single committed item).
    pub selected: Vec<T>,
    /// The item list after every action mutation.
    pub items: Vec<T>,
}

/// A configured, not yet started menu session.
pub struct Menu<T> {
    title: String,
    items: Vec<T>,
    options: MenuOptions,
    actions: ActionRegistry<T>,
}

impl<T: MenuItem> Menu<T> {
    pub fn new(title: impl Into<String>, items: Vec<T>) -> Self {
        Menu {
            title: title.into(),
            items,
            options: MenuOptions::default(),
            actions: ActionRegistry::new(),
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    pub fn color(mut self, color: impl Into<HighlightColor>) -> Self {
        self.options.color = color.into();
        self
    }

    pub fn selector(mut self, inactive: impl Into<String>, active: impl Into<String>) -> Self {
        self.options.selector = Selector::new(inactive, active);
        self
    }

    pub fn toggle(mut self, toggle: bool) -> Self {
        self.options.toggle = toggle;
        self
    }

    pub fn display(mut self, field: impl Into<String>) -> Self {
        self.options.display = Some(field.into());
        self
    }

    pub fn preselect_all(mut self, preselect_all: bool) -> Self {
        self.options.preselect_all = preselect_all;
        self
    }

    /// Register an action. See [`ActionRegistry::register`].
    pub fn action<F, R>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&[T]) -> R + 'static,
        R: Into<ActionResult<T>>,
    {
        self.actions.register(name, callback);
        self
    }

    /// Replace the whole action registry.
    pub fn actions(mut self, actions: ActionRegistry<T>) -> Self {
        self.actions = actions;
        self
    }

    /// Run on the real terminal and return the selection.
    pub fn run(self) -> Result<Vec<T>, MenuError> {
        self.run_outcome().map(|outcome| outcome.selected)
    }

    /// Run on the real terminal and return the selection together with
    /// the item list as the actions left it.
    ///
    /// ```no_run
    /// use picklist::{ActionResult, Menu};
    ///
    /// let outcome = Menu::new("Queue", vec!["a".to_string(), "b".to_string()])
    ///     .toggle(true)
    ///     .action("Drop", |selection: &[String]| {
    ///         ActionResult::none().removing(selection.to_vec())
    ///     })
    ///     .run_outcome()?;
    /// println!("{} item(s) left", outcome.items.len());
    /// # Ok::<(), picklist::MenuError>(())
    /// ```
    pub fn run_outcome(self) -> Result<MenuOutcome<T>, MenuError> {
        let mut surface = TerminalSurface::acquire()?;
        let outcome = self.run_on(&mut surface);
        let released = surface.release();

        let outcome = outcome?;
        released?;
        Ok(outcome)
    }

    /// Run against any surface. The surface is neither acquired nor
    /// released here.
    pub fn run_on<S: Surface + ?Sized>(self, surface: &mut S) -> Result<MenuOutcome<T>, MenuError> {
        let Menu {
            title,
            items,
            options,
            mut actions,
        } = self;

        actions.ensure_finish();
        let mut state = MenuState::new(title, items, options, actions.names());
        log::debug!(
            "menu session started: {} item(s), {} action(s) {:?}",
            state.items.len(),
            actions.len(),
            state.actions
        );

        match drive(surface, &mut state, &mut actions)? {
            Ending::Finished(ids) => {
                let selected = state.values_for(&ids);
                log::debug!("menu session finished with {} item(s)", selected.len());
                Ok(MenuOutcome {
                    selected,
                    items: state.into_items(),
                })
            }
            Ending::Interrupted => Err(MenuError::Interrupted),
        }
    }
}

/// Run a menu session on the terminal.
///
/// Returns the selected items in list order; in single-select mode, the
/// one item committed on.
pub fn run<T: MenuItem>(
    title: &str,
    items: Vec<T>,
    options: MenuOptions,
    actions: ActionRegistry<T>,
) -> Result<Vec<T>, MenuError> {
    Menu::new(title, items)
        .options(options)
        .actions(actions)
        .run()
}

// ============================================================================
// TESTS
// ============================================================================
