use async_trait::async_trait;
use sea_orm::*;
use uuid::Uuid;

use super::{SqlPersistService, page_bound};
use crate::entity::company;
use crate::model::{CompanyInfo, CompanyPatch, NewCompany, Page};
use crate::traits::CompanyPersistence;

#[async_trait]
impl CompanyPersistence for SqlPersistService {
    async fn company_create(&self, company: NewCompany) -> anyhow::Result<CompanyInfo> {
        let entity = company::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(company.name),
            address: Set(company.address),
            contact_person: Set(company.contact_person),
            email: Set(company.email),
            phone: Set(company.phone),
            industry: Set(company.industry),
            registration_number: Set(company.registration_number),
            employees: Set(company.employees),
            website: Set(company.website),
            logo: Set(company.logo),
        };

        let model = entity.insert(&self.db).await?;
        tracing::info!(company_id = %model.id, name = %model.name, "Company created");

        Ok(model.into())
    }

    async fn company_get_by_id(&self, id: Uuid) -> anyhow::Result<Option<CompanyInfo>> {
        let model = company::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(CompanyInfo::from))
    }

    async fn company_find_page(
        &self,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<Page<CompanyInfo>> {
        let total = company::Entity::find().count(&self.db).await?;

        let items = company::Entity::find()
            .order_by_asc(company::Column::Name)
            .order_by_asc(company::Column::Id)
            .offset(page_bound(skip))
            .limit(page_bound(limit))
            .all(&self.db)
            .await?
            .into_iter()
            .map(CompanyInfo::from)
            .collect();

        Ok(Page::new(items, total))
    }

    async fn company_update(
        &self,
        id: Uuid,
        patch: CompanyPatch,
    ) -> anyhow::Result<Option<CompanyInfo>> {
        let Some(entity) = company::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: company::ActiveModel = entity.clone().into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(address) = patch.address {
            active.address = Set(address);
        }
        if let Some(contact_person) = patch.contact_person {
            active.contact_person = Set(contact_person);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(phone);
        }
        if let Some(industry) = patch.industry {
            active.industry = Set(industry);
        }
        if let Some(registration_number) = patch.registration_number {
            active.registration_number = Set(registration_number);
        }
        if let Some(employees) = patch.employees {
            active.employees = Set(employees);
        }
        if let Some(website) = patch.website {
            active.website = Set(website);
        }
        if let Some(logo) = patch.logo {
            active.logo = Set(logo);
        }

        if !active.is_changed() {
            return Ok(Some(entity.into()));
        }

        let model = active.update(&self.db).await?;
        tracing::info!(company_id = %id, "Company updated");

        Ok(Some(model.into()))
    }

    async fn company_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = company::Entity::delete_many()
            .filter(company::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(company_id = %id, "Company deleted");
        }

        Ok(result.rows_affected > 0)
    }
}
