use async_trait::async_trait;
use chrono::{Duration, Utc};
use isocert_common::IsocertError;
use sea_orm::*;
use serde_json::Value;
use uuid::Uuid;

use super::{SqlPersistService, page_bound};
use crate::entity::{application, company, qms_type};
use crate::model::{ApplicationInfo, ApplicationPatch, NewApplication, Page};
use crate::traits::ApplicationPersistence;

async fn ensure_company<C: ConnectionTrait>(conn: &C, id: Uuid) -> anyhow::Result<()> {
    if company::Entity::find_by_id(id).one(conn).await?.is_none() {
        return Err(IsocertError::CompanyNotFound.into());
    }
    Ok(())
}

async fn ensure_qms_type<C: ConnectionTrait>(conn: &C, id: Uuid) -> anyhow::Result<()> {
    if qms_type::Entity::find_by_id(id).one(conn).await?.is_none() {
        return Err(IsocertError::QmsTypeNotFound.into());
    }
    Ok(())
}

#[async_trait]
impl ApplicationPersistence for SqlPersistService {
    async fn application_create(
        &self,
        application: NewApplication,
    ) -> anyhow::Result<ApplicationInfo> {
        let txn = self.db.begin().await?;

        ensure_company(&txn, application.company_id).await?;
        ensure_qms_type(&txn, application.qms_type_id).await?;

        let now = Utc::now();
        let entity = application::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(application.company_id),
            qms_type_id: Set(application.qms_type_id),
            created_at: Set(now),
            updated_at: Set(now),
            form_data: Set(Some(Value::Object(application.form_data))),
        };
        let model = entity.insert(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            application_id = %model.id,
            company_id = %model.company_id,
            qms_type_id = %model.qms_type_id,
            "Application created"
        );

        Ok(model.into())
    }

    async fn application_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<ApplicationInfo>> {
        let model = application::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(ApplicationInfo::from))
    }

    async fn application_find_page(
        &self,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Page<ApplicationInfo>> {
        let total = application::Entity::find().count(&self.db).await?;

        let items = application::Entity::find()
            .order_by_desc(application::Column::CreatedAt)
            .order_by_asc(application::Column::Id)
            .offset(page_bound(skip))
            .limit(page_bound(limit))
            .all(&self.db)
            .await?
            .into_iter()
            .map(ApplicationInfo::from)
            .collect();

        Ok(Page::new(items, total))
    }

    async fn application_update(
        &self,
        id: Uuid,
        patch: ApplicationPatch,
    ) -> anyhow::Result<Option<ApplicationInfo>> {
        let txn = self.db.begin().await?;

        let Some(entity) = application::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        if let Some(company_id) = patch.company_id.filter(|c| *c != entity.company_id) {
            ensure_company(&txn, company_id).await?;
        }
        if let Some(qms_type_id) = patch.qms_type_id.filter(|q| *q != entity.qms_type_id) {
            ensure_qms_type(&txn, qms_type_id).await?;
        }

        // updated_at advances on every update, even within one clock tick
        let now = Utc::now().max(entity.updated_at + Duration::microseconds(1));

        let mut active: application::ActiveModel = entity.into();
        if let Some(company_id) = patch.company_id {
            active.company_id = Set(company_id);
        }
        if let Some(qms_type_id) = patch.qms_type_id {
            active.qms_type_id = Set(qms_type_id);
        }
        if let Some(form_data) = patch.form_data {
            active.form_data = Set(Some(Value::Object(form_data)));
        }
        active.updated_at = Set(now);

        let model = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(application_id = %id, updated_at = %model.updated_at, "Application updated");

        Ok(Some(model.into()))
    }

    async fn application_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = application::Entity::delete_many()
            .filter(application::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(application_id = %id, "Application deleted");
        }

        Ok(result.rows_affected > 0)
    }
}
