//! Document generation for an application

use std::path::{Path, PathBuf};

use actix_web::web;
use uuid::Uuid;

use isocert_common::IsocertError;
use isocert_persistence::{ApplicationInfo, CompanyInfo, DocumentInfo, PersistenceService};

use crate::model::response::GeneratedFile;

use super::storage::UploadStorage;

/// Render every template of the application's QMS type
///
/// Templates are rendered one after another; the first failure aborts the
/// run and no partial result is returned.
pub async fn generate_for_application(
    persistence: &dyn PersistenceService,
    storage: &UploadStorage,
    application_id: Uuid,
) -> anyhow::Result<Vec<GeneratedFile>> {
    let application = persistence
        .application_get_by_id(application_id)
        .await?
        .ok_or(IsocertError::ApplicationNotFound)?;

    let company = persistence
        .company_get_by_id(application.company_id)
        .await?
        .ok_or(IsocertError::CompanyNotFound)?;

    let templates = persistence
        .documents_find_by_qms_type(application.qms_type_id)
        .await?;

    let jobs: Vec<(DocumentInfo, PathBuf)> = templates
        .into_iter()
        .map(|template| {
            let output = storage.generated_path(application.id, &template.title);
            (template, output)
        })
        .collect();

    tracing::info!(
        application_id = %application.id,
        qms_type_id = %application.qms_type_id,
        templates = jobs.len(),
        "Generating documents"
    );

    let files = web::block(move || render_all(&application, &company, jobs)).await??;

    Ok(files)
}

fn render_all(
    application: &ApplicationInfo,
    company: &CompanyInfo,
    jobs: Vec<(DocumentInfo, PathBuf)>,
) -> anyhow::Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(jobs.len());

    for (template, output) in jobs {
        if let Err(e) = isocert_document::generate_document(
            Path::new(&template.file_path),
            &output,
            application,
            company,
        ) {
            tracing::error!(
                application_id = %application.id,
                document_id = %template.id,
                title = %template.title,
                error = %e,
                "Document generation failed"
            );
            return Err(e.into());
        }

        files.push(GeneratedFile {
            title: template.title,
            path: output.display().to_string(),
        });
    }

    Ok(files)
}
