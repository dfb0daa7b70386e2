//! Application persistence trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{ApplicationInfo, ApplicationPatch, NewApplication, Page};

/// Application persistence operations
#[async_trait]
pub trait ApplicationPersistence: Send + Sync {
    /// Insert an application
    ///
    /// Fails with `IsocertError::CompanyNotFound` or
    /// `IsocertError::QmsTypeNotFound` when a referenced row is missing.
    async fn application_create(
        &self,
        application: NewApplication,
    ) -> anyhow::Result<ApplicationInfo>;

    async fn application_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<ApplicationInfo>>;

    /// List applications, newest first
    async fn application_find_page(
        &self,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Page<ApplicationInfo>>;

    /// Apply a patch and refresh `updated_at`
    ///
    /// Changed references are checked the same way as on create.
    async fn application_update(
        &self,
        id: Uuid,
        patch: ApplicationPatch,
    ) -> anyhow::Result<Option<ApplicationInfo>>;

    async fn application_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
