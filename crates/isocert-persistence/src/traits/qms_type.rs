//! QMS type persistence trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{NewQmsType, Page, QmsTypeInfo, QmsTypePatch};

/// QMS type persistence operations
///
/// Names are unique. Create and rename fail with
/// `IsocertError::AlreadyExists` when the name is taken.
#[async_trait]
pub trait QmsTypePersistence: Send + Sync {
    async fn qms_type_create(&self, qms_type: NewQmsType) -> anyhow::Result<QmsTypeInfo>;

    async fn qms_type_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<QmsTypeInfo>>;

    async fn qms_type_find_page(&self, skip: u64, limit: u64)
    -> anyhow::Result<Page<QmsTypeInfo>>;

    async fn qms_type_update(
        &self,
        id: Uuid,
        patch: QmsTypePatch,
    ) -> anyhow::Result<Option<QmsTypeInfo>>;

    /// Delete a QMS type together with its documents and applications
    async fn qms_type_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
