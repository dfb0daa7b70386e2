// REST API handlers, mounted under the configured context path

pub mod application;
pub mod company;
pub mod document;
pub mod health;
pub mod model;
pub mod qms_type;
pub mod route;
