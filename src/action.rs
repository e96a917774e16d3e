//! Actions: named callbacks shown in the Actions group.
//!
//! A callback receives the current selection (in list order) and returns
//! an [`ActionResult`] describing how the item list should change. The
//! registry always carries a Finish action, which ends the session and is
//! never invoked as a callback.

use std::fmt;

/// Name of the action that always ends the session.
pub const FINISH: &str = "Finish";

/// True when `name` refers to the Finish action (case-insensitive).
pub fn is_finish(name: &str) -> bool {
    name.eq_ignore_ascii_case(FINISH)
}

// ============================================================================
// ACTION RESULT
// ============================================================================

/// Effect requested by an action callback.
///
/// Every field is optional: the default value has no effect at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult<T> {
    /// Items appended to the end of the list, in order.
    pub add: Vec<T>,
    /// Items removed from the list by value match. Non-members are ignored.
    pub remove: Vec<T>,
    /// End the session after applying `add` and `remove`.
    pub finish: bool,
}

impl<T> ActionResult<T> {
    /// No effect.
    pub fn none() -> Self {
        ActionResult {
            add: Vec::new(),
            remove: Vec::new(),
            finish: false,
        }
    }

    pub fn adding(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.add.extend(items);
        self
    }

    pub fn removing(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.remove.extend(items);
        self
    }

    pub fn finishing(mut self) -> Self {
        self.finish = true;
        self
    }

    pub fn is_none(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && !self.finish
    }
}

impl<T> Default for ActionResult<T> {
    fn default() -> Self {
        ActionResult::none()
    }
}

impl<T> From<()> for ActionResult<T> {
    fn from(_: ()) -> Self {
        ActionResult::none()
    }
}

impl<T> From<Option<ActionResult<T>>> for ActionResult<T> {
    fn from(result: Option<ActionResult<T>>) -> Self {
        result.unwrap_or_default()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Boxed action callback.
pub type ActionFn<T> = Box<dyn FnMut(&[T]) -> ActionResult<T>>;

/// Ordered mapping from action name to callback.
///
/// Names are unique; registering an existing name replaces its callback
/// and keeps its position. Render order is registration order.
pub struct ActionRegistry<T> {
    entries: Vec<(String, ActionFn<T>)>,
}

impl<T> ActionRegistry<T> {
    pub fn new() -> Self {
        ActionRegistry {
            entries: Vec::new(),
        }
    }

    /// Register `callback` under `name`.
    ///
    /// The callback may return anything convertible into an
    /// [`ActionResult`], including `()` for "no effect".
    pub fn register<F, R>(&mut self, name: impl Into<String>, mut callback: F) -> &mut Self
    where
        F: FnMut(&[T]) -> R + 'static,
        R: Into<ActionResult<T>>,
    {
        let name = name.into();
        let boxed: ActionFn<T> = Box::new(move |selection: &[T]| callback(selection).into());

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = boxed,
            None => self.entries.push((name, boxed)),
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F, R>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&[T]) -> R + 'static,
        R: Into<ActionResult<T>>,
    {
        self.register(name, callback);
        self
    }

    /// Append a no-op Finish action unless one is registered under that exact name.
    pub fn ensure_finish(&mut self) {
        if !self.contains(FINISH) {
            let finish: ActionFn<T> = Box::new(|_: &[T]| ActionResult::none());
            self.entries.push((FINISH.to_string(), finish));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke the action at `index` with the current selection.
    ///
    /// Returns None when the index is out of range.
    pub fn invoke(&mut self, index: usize, selection: &[T]) -> Option<ActionResult<T>> {
        let (name, callback) = self.entries.get_mut(index)?;
        log::debug!("invoking action {:?} on {} selected item(s)", name, selection.len());
        Some(callback(selection))
    }
}

impl<T> Default for ActionRegistry<T> {
    fn default() -> Self {
        ActionRegistry::new()
    }
}

impl<T> fmt::Debug for ActionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
