//! Game session status.

use serde::{Deserialize, Serialize};

/// Body of `game_state_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// A game session is running in the host.
    #[serde(rename = "isOnline")]
    pub is_online: bool,
}
