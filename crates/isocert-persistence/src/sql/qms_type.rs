use async_trait::async_trait;
use isocert_common::IsocertError;
use sea_orm::*;
use uuid::Uuid;

use super::{SqlPersistService, page_bound};
use crate::entity::qms_type;
use crate::model::{NewQmsType, Page, QmsTypeInfo, QmsTypePatch};
use crate::traits::QmsTypePersistence;

/// Turn a unique-name violation into a typed conflict
fn name_conflict(err: DbErr, name: &str) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            IsocertError::AlreadyExists(format!("QMS type '{name}' already exists")).into()
        }
        _ => err.into(),
    }
}

#[async_trait]
impl QmsTypePersistence for SqlPersistService {
    async fn qms_type_create(&self, qms_type: NewQmsType) -> anyhow::Result<QmsTypeInfo> {
        let entity = qms_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(qms_type.name.clone()),
        };

        let model = entity
            .insert(&self.db)
            .await
            .map_err(|e| name_conflict(e, &qms_type.name))?;
        tracing::info!(qms_type_id = %model.id, name = %model.name, "QMS type created");

        Ok(model.into())
    }

    async fn qms_type_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<QmsTypeInfo>> {
        let model = qms_type::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(QmsTypeInfo::from))
    }

    async fn qms_type_find_page(
        &self,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Page<QmsTypeInfo>> {
        let total = qms_type::Entity::find().count(&self.db).await?;

        let items = qms_type::Entity::find()
            .order_by_asc(qms_type::Column::Name)
            .offset(page_bound(skip))
            .limit(page_bound(limit))
            .all(&self.db)
            .await?
            .into_iter()
            .map(QmsTypeInfo::from)
            .collect();

        Ok(Page::new(items, total))
    }

    async fn qms_type_update(
        &self,
        id: Uuid,
        patch: QmsTypePatch,
    ) -> anyhow::Result<Option<QmsTypeInfo>> {
        let Some(entity) = qms_type::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let Some(name) = patch.name else {
            return Ok(Some(entity.into()));
        };
        if name == entity.name {
            return Ok(Some(entity.into()));
        }

        let mut active: qms_type::ActiveModel = entity.into();
        active.name = Set(name.clone());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| name_conflict(e, &name))?;
        tracing::info!(qms_type_id = %id, name = %model.name, "QMS type renamed");

        Ok(Some(model.into()))
    }

    async fn qms_type_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = qms_type::Entity::delete_many()
            .filter(qms_type::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(qms_type_id = %id, "QMS type deleted");
        }

        Ok(result.rows_affected > 0)
    }
}
