use async_trait::async_trait;
use isocert_common::IsocertError;
use sea_orm::*;
use uuid::Uuid;

use super::{SqlPersistService, page_bound};
use crate::entity::{document, qms_type};
use crate::model::{DocumentInfo, DocumentPatch, NewDocument, Page};
use crate::traits::DocumentPersistence;

#[async_trait]
impl DocumentPersistence for SqlPersistService {
    async fn document_create(&self, document: NewDocument) -> anyhow::Result<DocumentInfo> {
        let txn = self.db.begin().await?;

        if qms_type::Entity::find_by_id(document.qms_type_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(IsocertError::QmsTypeNotFound.into());
        }

        let entity = document::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(document.title),
            qms_type_id: Set(document.qms_type_id),
            file_path: Set(document.file_path),
        };
        let model = entity.insert(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            document_id = %model.id,
            qms_type_id = %model.qms_type_id,
            file_path = %model.file_path,
            "Document template registered"
        );

        Ok(model.into())
    }

    async fn document_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<DocumentInfo>> {
        let model = document::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(DocumentInfo::from))
    }

    async fn document_find_page(
        &self,
        qms_type_id: Option<Uuid>,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Page<DocumentInfo>> {
        let mut select = document::Entity::find();
        if let Some(qms_type_id) = qms_type_id {
            select = select.filter(document::Column::QmsTypeId.eq(qms_type_id));
        }

        let total = select.clone().count(&self.db).await?;

        let items = select
            .order_by_asc(document::Column::Title)
            .order_by_asc(document::Column::Id)
            .offset(page_bound(skip))
            .limit(page_bound(limit))
            .all(&self.db)
            .await?
            .into_iter()
            .map(DocumentInfo::from)
            .collect();

        Ok(Page::new(items, total))
    }

    async fn documents_find_by_qms_type(
        &self,
        qms_type_id: Uuid,
    ) -> anyhow::Result<Vec<DocumentInfo>> {
        let items = document::Entity::find()
            .filter(document::Column::QmsTypeId.eq(qms_type_id))
            .order_by_asc(document::Column::Title)
            .order_by_asc(document::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(DocumentInfo::from)
            .collect();

        Ok(items)
    }

    async fn document_update(
        &self,
        id: Uuid,
        patch: DocumentPatch,
    ) -> anyhow::Result<Option<DocumentInfo>> {
        let Some(entity) = document::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: document::ActiveModel = entity.clone().into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }

        if !active.is_changed() {
            return Ok(Some(entity.into()));
        }

        let model = active.update(&self.db).await?;
        tracing::info!(document_id = %id, title = %model.title, "Document template updated");

        Ok(Some(model.into()))
    }

    async fn document_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = document::Entity::delete_many()
            .filter(document::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(document_id = %id, "Document template deleted");
        }

        Ok(result.rows_affected > 0)
    }
}
