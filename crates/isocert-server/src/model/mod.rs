pub mod app_state;
pub mod config;
pub mod constants;
pub mod response;
