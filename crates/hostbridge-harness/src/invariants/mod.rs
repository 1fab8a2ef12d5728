//! Session and translation cache invariants.
//!
//! Checks run against a [`SessionSnapshot`] taken after each event, so a
//! property test or fuzz target can feed the bridge anything and ask the
//! same questions every step.

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    CharactersViewSettled, NoSelectionOnLogin, PendingDisjointFromResolved, SelectedInCharacters,
};
pub use snapshot::SessionSnapshot;

/// Outcome of a single check.
pub type InvariantResult = Result<(), Violation>;

/// A failed check.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the check that failed.
    pub invariant: &'static str,
    /// What the snapshot showed.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

/// A property of observable bridge state.
pub trait Invariant {
    /// Stable name used in violation reports.
    fn name(&self) -> &'static str;

    /// Check the snapshot.
    fn check(&self, state: &SessionSnapshot) -> InvariantResult;
}

/// The set of checks run after every step.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Every session and cache invariant:
    ///
    /// - [`SelectedInCharacters`]
    /// - [`NoSelectionOnLogin`]
    /// - [`CharactersViewSettled`]
    /// - [`PendingDisjointFromResolved`]
    pub fn standard() -> Self {
        Self {
            invariants: vec![
                Box::new(SelectedInCharacters),
                Box::new(NoSelectionOnLogin),
                Box::new(CharactersViewSettled),
                Box::new(PendingDisjointFromResolved),
            ],
        }
    }

    /// Run every check. Collects all violations rather than stopping early.
    pub fn check_all(&self, state: &SessionSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Panic with every violation, prefixed by `context`.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, state: &SessionSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("invariant violated after {context}:\n  {}", messages.join("\n  "));
        }
    }
}
