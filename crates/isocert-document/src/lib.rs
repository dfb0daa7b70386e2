//! isocert document - certification document generation
//!
//! Merges company and application data into `.docx` templates that use
//! `{{ key }}` placeholders.

pub mod context;
pub mod error;
pub mod template;

pub use context::{Context, build_context};
pub use error::DocumentError;
pub use template::DocxTemplate;

use std::path::Path;

use isocert_persistence::{ApplicationInfo, CompanyInfo};

/// Render `template` for an application and write the result to `output`
pub fn generate_document(
    template: &Path,
    output: &Path,
    application: &ApplicationInfo,
    company: &CompanyInfo,
) -> Result<(), DocumentError> {
    let context = build_context(company, &application.form_data);

    DocxTemplate::open(template)?.render_to_file(&context, output)?;

    tracing::info!(
        application_id = %application.id,
        template = %template.display(),
        output = %output.display(),
        "Document generated"
    );

    Ok(())
}
