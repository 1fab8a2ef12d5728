//! Standard invariant checks.

use hostbridge_app::View;

use super::{Invariant, InvariantResult, SessionSnapshot, Violation};

/// The selection must name a character in the list.
pub struct SelectedInCharacters;

impl Invariant for SelectedInCharacters {
    fn name(&self) -> &'static str {
        "selected_in_characters"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        if let Some(selected) = &state.selected
            && !state.characters.contains(selected)
        {
            return Err(Violation {
                invariant: self.name(),
                message: format!("selected {selected:?} not in {:?}", state.characters),
            });
        }
        Ok(())
    }
}

/// The login view never carries a character selection.
pub struct NoSelectionOnLogin;

impl Invariant for NoSelectionOnLogin {
    fn name(&self) -> &'static str {
        "no_selection_on_login"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        if state.view == View::Login && state.selected.is_some() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("login view with selection {:?}", state.selected),
            });
        }
        Ok(())
    }
}

/// The character list is only shown once authentication settled.
///
/// `enterGame` sets and clears `loading` within one event, so no observer
/// sees the list while loading.
pub struct CharactersViewSettled;

impl Invariant for CharactersViewSettled {
    fn name(&self) -> &'static str {
        "characters_view_settled"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        if state.view == View::Characters && state.loading {
            return Err(Violation {
                invariant: self.name(),
                message: "character list shown while loading".to_owned(),
            });
        }
        Ok(())
    }
}

/// A translation key is pending or resolved, never both.
pub struct PendingDisjointFromResolved;

impl Invariant for PendingDisjointFromResolved {
    fn name(&self) -> &'static str {
        "pending_disjoint_from_resolved"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let mut both: Vec<_> = state.pending.intersection(&state.resolved).collect();
        if both.is_empty() {
            return Ok(());
        }
        both.sort();
        Err(Violation { invariant: self.name(), message: format!("pending and resolved: {both:?}") })
    }
}
