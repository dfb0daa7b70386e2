//! isocert persistence - database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions for the certification tables
//! - Persistence trait abstractions, one per entity
//! - Domain model types returned by the persistence traits
//! - The SQL backend (PostgreSQL/MySQL/SQLite via SeaORM)

pub mod entity;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

pub use entity::prelude::*;

pub use traits::{
    ApplicationPersistence, CompanyPersistence, DocumentPersistence, PersistenceService,
    QmsTypePersistence,
};

pub use sql::SqlPersistService;

pub use model::{
    ApplicationInfo, ApplicationPatch, CompanyInfo, CompanyPatch, DocumentInfo, DocumentPatch,
    NewApplication, NewCompany, NewDocument, NewQmsType, Page, QmsTypeInfo, QmsTypePatch,
};
