//! Document template persistence trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{DocumentInfo, DocumentPatch, NewDocument, Page};

/// Document template persistence operations
#[async_trait]
pub trait DocumentPersistence: Send + Sync {
    /// Insert a template record
    ///
    /// Fails with `IsocertError::QmsTypeNotFound` when the owning QMS type is
    /// missing at insert time.
    async fn document_create(&self, document: NewDocument) -> anyhow::Result<DocumentInfo>;

    async fn document_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<DocumentInfo>>;

    /// List templates, optionally restricted to one QMS type
    async fn document_find_page(
        &self,
        qms_type_id: Option<Uuid>,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Page<DocumentInfo>>;

    /// All templates of a QMS type, in title order
    async fn documents_find_by_qms_type(
        &self,
        qms_type_id: Uuid,
    ) -> anyhow::Result<Vec<DocumentInfo>>;

    async fn document_update(
        &self,
        id: Uuid,
        patch: DocumentPatch,
    ) -> anyhow::Result<Option<DocumentInfo>>;

    async fn document_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
