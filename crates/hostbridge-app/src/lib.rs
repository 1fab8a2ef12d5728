//! Application layer for the UI/host bridge
//!
//! Pure state machines and a generic runtime for the login flow, enabling
//! deterministic testing with the same code that runs against a real host.
//!
//! # Components
//!
//! - [`Session`]: login → character-selection state machine
//! - [`Bridge`]: context object wiring the session, the translation cache,
//!   the inbound dispatch table and the outbound transport
//! - [`Screen`]: view model with every user-visible string resolved
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic event loop using a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod credentials;
mod driver;
mod error;
mod event;
mod notice;
mod runtime;
mod session;
mod view;

pub use action::{AuthRequest, SessionAction};
pub use bridge::{Bridge, BridgeContext, COMMON_KEYS};
pub use credentials::{
    REMEMBER_ME_KEY, RememberStore, RememberedLogin, SAVED_EMAIL_KEY, SAVED_PASSWORD_KEY,
    SESSION_TOKEN_KEY,
};
pub use driver::{Driver, DriverEvent};
pub use error::{AuthFailure, AuthOutcome};
pub use event::{SessionEvent, UiInput};
pub use notice::Notice;
pub use runtime::Runtime;
pub use session::{Session, View};
pub use view::{CharacterRow, CharacterScreen, LOGIN_VIEW_KEYS, LoginScreen, Screen, render};
