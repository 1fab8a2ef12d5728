//! Message names in both directions.
//!
//! The host matches on these literally, so they are part of the wire format.

/// UI finished loading. Sent once at startup.
pub const JS_LOADED: &str = "js_loaded";
/// Request a single translation. Data is the key.
pub const TRANSLATE: &str = "translate";
/// Request several translations. Data is a comma-joined key list.
pub const TRANSLATE_MULTIPLE: &str = "translate_multiple";
/// Hand the chosen character and credentials to the host.
pub const LOGIN_COMPLETE: &str = "login_complete";

/// Host configuration (api url, endpoints, timeout).
pub const INIT_CONFIG: &str = "init_config";
/// Host asks the UI to return to the login view.
pub const RESET_AND_SHOW_LOGIN: &str = "reset_and_show_login";
/// Host reports whether a game session is running.
pub const GAME_STATE_CHANGED: &str = "game_state_changed";
/// Host logged out. Cleanup is driven by `reset_and_show_login`.
pub const LOGOUT: &str = "logout";
/// Host locale descriptor.
pub const SET_LOCALE_INFO: &str = "set_locale_info";
/// Reply to a single [`TRANSLATE`] request.
pub const TRANSLATION_RESULT: &str = "translation_result";
/// Reply to a [`TRANSLATE_MULTIPLE`] request.
pub const TRANSLATIONS_RESULT: &str = "translations_result";
