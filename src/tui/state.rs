//! Menu state algebra: items, selection, cursor.
//!
//! These types define the entire state space of a menu session. The
//! transition functions in `update` and the renderer in `view` both
//! program against them; only `run` touches the terminal.
//!
//! Invariants upheld by every transition:
//! - `cursor.position < max(1, len(active group))`
//! - `selected` only holds handles of items currently in `items`

use std::collections::BTreeSet;

use crate::types::{ItemId, MenuOptions};

// ============================================================================
// CURSOR
// ============================================================================

/// The two navigable groups, rendered in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Items,
    Actions,
}

impl Group {
    /// The group Tab switches to.
    pub fn other(self) -> Self {
        match self {
            Group::Items => Group::Actions,
            Group::Actions => Group::Items,
        }
    }
}

/// Active group plus zero-based row within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub group: Group,
    pub position: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            group: Group::Items,
            position: 0,
        }
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Semantic user input, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Tab: switch between Items and Actions.
    SwitchGroup,
    MoveUp,
    MoveDown,
    /// Enter: act on the highlighted row.
    Commit,
    /// Ctrl+C: abandon the session.
    Interrupt,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a state transition.
///
/// The effects layer in `run` interprets it: keep looping, return to
/// the caller, or hand the terminal to an action callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Redraw and wait for the next key.
    Continue,
    /// End the session returning these items, in list order.
    Finish(Vec<ItemId>),
    /// Invoke the action at this index of the registry.
    Invoke(usize),
    /// End the session without a result.
    Interrupt,
}

// ============================================================================
// SESSION STATE
// ============================================================================

/// One item in the list, tagged with its handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub id: ItemId,
    pub value: T,
}

/// Everything a running menu knows.
#[derive(Debug)]
pub struct MenuState<T> {
    pub title: String,
    pub options: MenuOptions,
    /// Ordered item list. Order drives rendering and cursor indexing.
    pub items: Vec<Entry<T>>,
    /// Action names in registry order.
    pub actions: Vec<String>,
    /// Handles of selected items.
    pub selected: BTreeSet<ItemId>,
    pub cursor: Cursor,
    next_id: u64,
}

impl<T> MenuState<T> {
    /// Start a session. In toggle mode with `preselect_all`, every
    /// initial item starts selected.
    pub fn new(
        title: impl Into<String>,
        items: Vec<T>,
        options: MenuOptions,
        actions: Vec<String>,
    ) -> Self {
        let preselect = options.toggle && options.preselect_all;
        let mut state = MenuState {
            title: title.into(),
            options,
            items: Vec::with_capacity(items.len()),
            actions,
            selected: BTreeSet::new(),
            cursor: Cursor::default(),
            next_id: 0,
        };

        for value in items {
            let id = state.push(value);
            if preselect {
                state.selected.insert(id);
            }
        }
        state
    }

    /// Append an item with a fresh handle. It starts unselected.
    pub fn push(&mut self, value: T) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(Entry { id, value });
        id
    }

    /// Number of rows in a group.
    pub fn group_len(&self, group: Group) -> usize {
        match group {
            Group::Items => self.items.len(),
            Group::Actions => self.actions.len(),
        }
    }

    /// Highest valid cursor position in the active group.
    pub fn last_position(&self) -> usize {
        self.group_len(self.cursor.group).saturating_sub(1)
    }

    /// Pull the cursor back into the active group after it shrank.
    pub fn clamp_cursor(&mut self) {
        self.cursor.position = self.cursor.position.min(self.last_position());
    }

    /// Drop handles of items that are no longer listed.
    pub fn retain_selection(&mut self) {
        let listed: BTreeSet<ItemId> = self.items.iter().map(|e| e.id).collect();
        self.selected.retain(|id| listed.contains(id));
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected handles in list order.
    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|e| self.selected.contains(&e.id))
            .map(|e| e.id)
            .collect()
    }

    /// Entry under the cursor, if the cursor is in the Items group.
    pub fn current_item(&self) -> Option<&Entry<T>> {
        match self.cursor.group {
            Group::Items => self.items.get(self.cursor.position),
            Group::Actions => None,
        }
    }

    /// Consume the state, returning the final item list.
    pub fn into_items(self) -> Vec<T> {
        self.items.into_iter().map(|e| e.value).collect()
    }
}

impl<T: Clone> MenuState<T> {
    /// Values for the given handles, in list order. Unknown handles are skipped.
    pub fn values_for(&self, ids: &[ItemId]) -> Vec<T> {
        self.items
            .iter()
            .filter(|e| ids.contains(&e.id))
            .map(|e| e.value.clone())
            .collect()
    }

    /// Currently selected values, in list order.
    pub fn selected_values(&self) -> Vec<T> {
        self.items
            .iter()
            .filter(|e| self.selected.contains(&e.id))
            .map(|e| e.value.clone())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
