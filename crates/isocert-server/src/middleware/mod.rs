// HTTP middleware implementations

pub mod auth; // Bearer token authentication (uses AppState)
