//! Company persistence trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{CompanyInfo, CompanyPatch, NewCompany, Page};

/// Company persistence operations
#[async_trait]
pub trait CompanyPersistence: Send + Sync {
    /// Insert a company with a freshly generated id
    async fn company_create(&self, company: NewCompany) -> anyhow::Result<CompanyInfo>;

    async fn company_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<CompanyInfo>>;

    /// List companies ordered by name, with the total row count
    async fn company_find_page(&self, skip: u64, limit: u64)
    -> anyhow::Result<Page<CompanyInfo>>;

    /// Apply a patch. Returns `None` when the company does not exist.
    async fn company_update(
        &self,
        id: Uuid,
        patch: CompanyPatch,
    ) -> anyhow::Result<Option<CompanyInfo>>;

    /// Delete a company and, through the cascade, its applications
    async fn company_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
