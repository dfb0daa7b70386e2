//! isocert server - HTTP surface for the certification record store
//!
//! This crate provides:
//! - Configuration, logging and HTTP server startup
//! - Token authentication middleware and the `Secured` access check
//! - REST handlers for companies, QMS types, document templates and
//!   applications
//! - Upload storage and document generation services

pub mod api;
pub mod error;
pub mod middleware;
pub mod model;
pub mod secured;
pub mod service;
pub mod startup;
