//! Persistence traits for the certification record store
//!
//! One trait per entity. `PersistenceService` combines them so the HTTP layer
//! can hold a single `Arc<dyn PersistenceService>`.

pub mod application;
pub mod company;
pub mod document;
pub mod qms_type;

pub use application::ApplicationPersistence;
pub use company::CompanyPersistence;
pub use document::DocumentPersistence;
pub use qms_type::QmsTypePersistence;

use async_trait::async_trait;

/// Unified persistence service trait
#[async_trait]
pub trait PersistenceService:
    CompanyPersistence + QmsTypePersistence + DocumentPersistence + ApplicationPersistence + Send + Sync
{
    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
