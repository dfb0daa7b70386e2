//! Request models for the REST API
//!
//! Bodies reject unknown keys. Update bodies only carry the fields the
//! caller wants to change.

use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationErrors};

use isocert_common::{DEFAULT_LIMIT, DEFAULT_SKIP, IsocertError};
use isocert_persistence::{
    ApplicationPatch, CompanyPatch, DocumentPatch, NewApplication, NewCompany, NewQmsType,
    QmsTypePatch,
};

const INVALID_EMAIL: &str = "value is not a valid email address";
const INVALID_URL: &str = "value is not a valid URL";
const EMPTY_STRING: &str = "value must not be empty";
const NEGATIVE_NUMBER: &str = "value must not be negative";
const CONTROL_CHARACTERS: &str = "value must not contain control characters";

fn default_skip() -> u64 {
    DEFAULT_SKIP
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// `skip`/`limit` query parameters of list endpoints
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_skip")]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

// ============================================================================
// Company
// ============================================================================

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CompanyCreate {
    #[validate(length(min = 1, message = "value must not be empty"))]
    pub name: String,
    pub address: String,
    pub contact_person: String,
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    pub phone: String,
    pub industry: String,
    #[validate(length(min = 1, message = "value must not be empty"))]
    pub registration_number: String,
    #[validate(range(min = 0, message = "value must not be negative"))]
    pub employees: i32,
    #[serde(default)]
    #[validate(url(message = "value is not a valid URL"))]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl From<CompanyCreate> for NewCompany {
    fn from(value: CompanyCreate) -> Self {
        Self {
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

/// Partial company update
///
/// `website` and `logo` tell an absent key apart from an explicit `null`,
/// which clears the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub registration_number: Option<String>,
    pub employees: Option<i32>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub logo: Option<Option<String>>,
}

impl Validate for CompanyUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(email) = &self.email
            && !validator::ValidateEmail::validate_email(email)
        {
            errors.add("email", validation_error("email", INVALID_EMAIL));
        }
        if let Some(Some(website)) = &self.website
            && !website.validate_url()
        {
            errors.add("website", validation_error("url", INVALID_URL));
        }
        if self.name.as_deref().is_some_and(str::is_empty) {
            errors.add("name", validation_error("length", EMPTY_STRING));
        }
        if self
            .registration_number
            .as_deref()
            .is_some_and(str::is_empty)
        {
            errors.add(
                "registration_number",
                validation_error("length", EMPTY_STRING),
            );
        }
        if self.employees.is_some_and(|n| n < 0) {
            errors.add("employees", validation_error("range", NEGATIVE_NUMBER));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<CompanyUpdate> for CompanyPatch {
    fn from(value: CompanyUpdate) -> Self {
        Self {
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

// ============================================================================
// QMS type
// ============================================================================

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct QmsTypeCreate {
    #[validate(length(min = 1, message = "value must not be empty"))]
    pub name: String,
}

impl From<QmsTypeCreate> for NewQmsType {
    fn from(value: QmsTypeCreate) -> Self {
        Self { name: value.name }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct QmsTypeUpdate {
    #[validate(length(min = 1, message = "value must not be empty"))]
    pub name: Option<String>,
}

impl From<QmsTypeUpdate> for QmsTypePatch {
    fn from(value: QmsTypeUpdate) -> Self {
        Self { name: value.name }
    }
}

// ============================================================================
// Document template
// ============================================================================

/// Query parameters of the template upload
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct DocumentUploadParams {
    pub qms_type_id: Uuid,
    #[validate(
        length(min = 1, message = "value must not be empty"),
        custom(function = "validate_title")
    )]
    pub title: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DocumentListParams {
    pub qms_type_id: Option<Uuid>,
    #[serde(default = "default_skip")]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DocumentUpdate {
    #[validate(
        length(min = 1, message = "value must not be empty"),
        custom(function = "validate_title")
    )]
    pub title: Option<String>,
}

impl From<DocumentUpdate> for DocumentPatch {
    fn from(value: DocumentUpdate) -> Self {
        Self { title: value.title }
    }
}

// ============================================================================
// Application
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationCreate {
    pub company_id: Uuid,
    pub qms_type_id: Uuid,
    pub form_data: Map<String, Value>,
}

impl From<ApplicationCreate> for NewApplication {
    fn from(value: ApplicationCreate) -> Self {
        Self {
            company_id: value.company_id,
            qms_type_id: value.qms_type_id,
            form_data: value.form_data,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationUpdate {
    pub company_id: Option<Uuid>,
    pub qms_type_id: Option<Uuid>,
    pub form_data: Option<Map<String, Value>>,
}

impl From<ApplicationUpdate> for ApplicationPatch {
    fn from(value: ApplicationUpdate) -> Self {
        Self {
            company_id: value.company_id,
            qms_type_id: value.qms_type_id,
            form_data: value.form_data,
        }
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Titles end up in file names and the download `Content-Disposition`
fn validate_title(title: &str) -> Result<(), validator::ValidationError> {
    if title.chars().any(char::is_control) {
        return Err(validation_error("title_control_chars", CONTROL_CHARACTERS));
    }
    Ok(())
}

fn validation_error(code: &'static str, message: &'static str) -> validator::ValidationError {
    validator::ValidationError::new(code).with_message(message.into())
}

/// Flatten validator errors into `field: message; field: message`, sorted by
/// field name
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Run the validator and turn failures into a 422 error
pub fn validate<T: Validate>(value: &T) -> Result<(), IsocertError> {
    value
        .validate()
        .map_err(|e| IsocertError::IllegalArgument(format_validation_errors(&e)))
}
