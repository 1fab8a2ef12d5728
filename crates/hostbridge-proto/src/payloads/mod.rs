//! Typed message bodies.
//!
//! Field names follow the host's JSON spelling (`apiUrl`, `isOnline`,
//! `remaining_premium_days`), which is not consistent across messages. The
//! serde attributes on each struct pin the exact wire names.

pub mod auth;
pub mod config;
pub mod game;
pub mod translation;

pub use auth::{AuthResponse, Character, Credentials, LoginComplete, LoginMethod};
pub use config::{ClientConfig, Endpoints};
pub use game::GameState;
pub use translation::{TranslationBatch, TranslationReply};
