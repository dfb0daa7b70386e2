//! SQL persistence backend (PostgreSQL/MySQL/SQLite via SeaORM)
//!
//! `SqlPersistService` implements every persistence trait over a single
//! `DatabaseConnection`. The per-entity implementations live in the child
//! modules.

mod application;
mod company;
mod document;
mod qms_type;

use async_trait::async_trait;
use sea_orm::{prelude::Expr, *};

use crate::entity::qms_type as qms_type_entity;
use crate::traits::PersistenceService;

/// Drivers bind offset and limit as signed 64-bit integers
const MAX_PAGE_BOUND: u64 = i64::MAX as u64;

fn page_bound(value: u64) -> u64 {
    value.min(MAX_PAGE_BOUND)
}

/// Database backed persistence service
pub struct SqlPersistService {
    db: DatabaseConnection,
}

impl SqlPersistService {
    /// Create a new SqlPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl PersistenceService for SqlPersistService {
    async fn health_check(&self) -> anyhow::Result<()> {
        qms_type_entity::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "health")
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;
        Ok(())
    }
}
