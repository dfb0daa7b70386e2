//! Domain model types for the persistence layer
//!
//! These types are the inputs and return values of the persistence traits,
//! decoupled from the SeaORM entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::entity::{application, company, document, qms_type};

/// Paginated listing result
///
/// `total` is the number of rows in the whole table (or filter), not the size
/// of `items`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ============================================================================
// Company
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub registration_number: String,
    pub employees: i32,
    pub website: Option<String>,
    pub logo: Option<String>,
}

impl From<company::Model> for CompanyInfo {
    fn from(value: company::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            contact_person: value.contact_person,
            email: value.email,
            phone: value.phone,
            industry: value.industry,
            registration_number: value.registration_number,
            employees: value.employees,
            website: value.website,
            logo: value.logo,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub registration_number: String,
    pub employees: i32,
    pub website: Option<String>,
    pub logo: Option<String>,
}

/// Field-by-field company update
///
/// `None` leaves a field untouched. For the optional columns, `Some(None)`
/// clears the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub registration_number: Option<String>,
    pub employees: Option<i32>,
    pub website: Option<Option<String>>,
    pub logo: Option<Option<String>>,
}

impl CompanyPatch {
    /// Patch that only replaces the logo reference
    pub fn logo(path: impl Into<String>) -> Self {
        Self {
            logo: Some(Some(path.into())),
            ..Default::default()
        }
    }
}

// ============================================================================
// QMS type
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QmsTypeInfo {
    pub id: Uuid,
    pub name: String,
}

impl From<qms_type::Model> for QmsTypeInfo {
    fn from(value: qms_type::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQmsType {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QmsTypePatch {
    pub name: Option<String>,
}

// ============================================================================
// Document template
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub id: Uuid,
    pub title: String,
    pub qms_type_id: Uuid,
    pub file_path: String,
}

impl From<document::Model> for DocumentInfo {
    fn from(value: document::Model) -> Self {
        Self {
            id: value.id,
            title: value.title,
            qms_type_id: value.qms_type_id,
            file_path: value.file_path,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub qms_type_id: Uuid,
    pub file_path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
}

// ============================================================================
// Application
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub id: Uuid,
    pub company_id: Uuid,
    pub qms_type_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub form_data: Map<String, Value>,
}

impl From<application::Model> for ApplicationInfo {
    fn from(value: application::Model) -> Self {
        let form_data = match value.form_data {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        Self {
            id: value.id,
            company_id: value.company_id,
            qms_type_id: value.qms_type_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
            form_data,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewApplication {
    pub company_id: Uuid,
    pub qms_type_id: Uuid,
    pub form_data: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplicationPatch {
    pub company_id: Option<Uuid>,
    pub qms_type_id: Option<Uuid>,
    pub form_data: Option<Map<String, Value>>,
}
