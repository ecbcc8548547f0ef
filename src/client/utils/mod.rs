pub mod prefs;
pub mod session_store;
