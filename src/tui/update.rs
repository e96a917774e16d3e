//! State transitions: (MenuState, Input) → Transition.
//!
//! This is the core logic of the menu. Fully testable without a terminal.
//! Key handling lives in [`update`]; applying what an action callback
//! returned lives in [`apply_result`].

use crate::action::{is_finish, ActionResult};

use super::state::{Group, Input, MenuState, Transition};

/// Handle one input.
pub fn update<T>(state: &mut MenuState<T>, input: &Input) -> Transition {
    match input {
        Input::SwitchGroup => {
            state.cursor.group = state.cursor.group.other();
            state.cursor.position = 0;
            Transition::Continue
        }
        Input::MoveUp => {
            state.cursor.position = state.cursor.position.saturating_sub(1);
            Transition::Continue
        }
        Input::MoveDown => {
            state.cursor.position = (state.cursor.position + 1).min(state.last_position());
            Transition::Continue
        }
        Input::Commit => commit(state),
        Input::Interrupt => Transition::Interrupt,
    }
}

/// Commit on the highlighted row.
fn commit<T>(state: &mut MenuState<T>) -> Transition {
    match state.cursor.group {
        Group::Items => {
            let Some(id) = state.current_item().map(|e| e.id) else {
                // Empty list: nothing to act on
                return Transition::Continue;
            };

            if !state.options.toggle {
                return Transition::Finish(vec![id]);
            }

            if !state.selected.remove(&id) {
                state.selected.insert(id);
            }
            Transition::Continue
        }
        Group::Actions => match state.actions.get(state.cursor.position) {
            Some(name) if is_finish(name) => Transition::Finish(state.selected_ids()),
            Some(_) => Transition::Invoke(state.cursor.position),
            None => Transition::Continue,
        },
    }
}

/// Apply what an action callback returned.
///
/// `add` items are appended with fresh handles, `remove` items are
/// deleted by value match and purged from the selection, then the
/// cursor returns to the top of its group. Returns `Finish` with the
/// surviving selection when the result asks for it.
pub fn apply_result<T: PartialEq>(state: &mut MenuState<T>, result: ActionResult<T>) -> Transition {
    let ActionResult { add, remove, finish } = result;

    let added = add.len();
    for value in add {
        state.push(value);
    }

    let mut removed = 0;
    for value in &remove {
        match find_match(state, value) {
            Some(index) => {
                let entry = state.items.remove(index);
                state.selected.remove(&entry.id);
                log::trace!("removed item {}", entry.id);
                removed += 1;
            }
            None => log::warn!("remove target is not in the list, ignoring"),
        }
    }

    state.retain_selection();
    state.cursor.position = 0;
    state.clamp_cursor();

    log::debug!(
        "applied action result: {} added, {} removed, finish={}",
        added,
        removed,
        finish
    );

    if finish {
        Transition::Finish(state.selected_ids())
    } else {
        Transition::Continue
    }
}

/// Index of the item a `remove` entry refers to.
///
/// Prefers a selected item among equal values, so removing what the
/// callback was handed hits the selected copy of a duplicate.
fn find_match<T: PartialEq>(state: &MenuState<T>, value: &T) -> Option<usize> {
    state
        .items
        .iter()
        .position(|e| e.value == *value && state.selected.contains(&e.id))
        .or_else(|| state.items.iter().position(|e| e.value == *value))
}

// ============================================================================
// TESTS
// ============================================================================
