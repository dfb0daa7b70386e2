//! Template context construction

use isocert_persistence::CompanyInfo;
use serde_json::{Map, Value};

/// Flat key/value mapping handed to the renderer
pub type Context = Map<String, Value>;

/// Build the rendering context for an application
///
/// Company fields come first under fixed keys. Every form field is merged on
/// top, so a form field with the same name as a company key wins.
pub fn build_context(company: &CompanyInfo, form_data: &Map<String, Value>) -> Context {
    let mut context = Context::new();

    context.insert("company_name".into(), company.name.clone().into());
    context.insert("company_address".into(), company.address.clone().into());
    context.insert(
        "contact_person".into(),
        company.contact_person.clone().into(),
    );
    context.insert("contact_email".into(), company.email.clone().into());
    context.insert("contact_phone".into(), company.phone.clone().into());
    context.insert("industry".into(), company.industry.clone().into());
    context.insert(
        "registration_number".into(),
        company.registration_number.clone().into(),
    );
    context.insert("employees".into(), company.employees.into());
    context.insert(
        "website".into(),
        company.website.clone().map_or(Value::Null, Value::String),
    );

    for (key, value) in form_data {
        if context.insert(key.clone(), value.clone()).is_some() {
            tracing::warn!(
                company_id = %company.id,
                key = %key,
                "Form field overrides company field"
            );
        }
    }

    context
}
