//! Application endpoints, including document generation and download

use actix_web::{
    HttpRequest, HttpResponse, Scope, delete, get,
    http::header::{CONTENT_TYPE, ContentDisposition, DispositionParam, DispositionType},
    post, put, web,
};
use uuid::Uuid;

use isocert_common::IsocertError;

use crate::{
    error::AppError,
    model::{
        app_state::AppState,
        constants::{APPLICATION_DELETED, DOCUMENTS_GENERATED, DOCX_CONTENT_TYPE},
        response::{GenerationResult, MessageResult},
    },
    secured::Secured,
    service::generation,
};

use super::model::{ApplicationCreate, ApplicationUpdate, PageParams};

#[post("")]
async fn create_application(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<ApplicationCreate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let application = data
        .persistence
        .application_create(body.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(application))
}

#[get("")]
async fn list_applications(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let page = data
        .persistence
        .application_find_page(params.skip, params.limit)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}")]
async fn get_application(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let application = data
        .persistence
        .application_get_by_id(path.into_inner())
        .await?
        .ok_or(IsocertError::ApplicationNotFound)?;

    Ok(HttpResponse::Ok().json(application))
}

#[put("/{id}")]
async fn update_application(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ApplicationUpdate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let application = data
        .persistence
        .application_update(path.into_inner(), body.into_inner().into())
        .await?
        .ok_or(IsocertError::ApplicationNotFound)?;

    Ok(HttpResponse::Ok().json(application))
}

#[delete("/{id}")]
async fn delete_application(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    if !data.persistence.application_delete(path.into_inner()).await? {
        return Err(IsocertError::ApplicationNotFound.into());
    }

    Ok(MessageResult::http_ok(APPLICATION_DELETED))
}

#[post("/{id}/generate-documents")]
async fn generate_documents(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let files = generation::generate_for_application(
        data.persistence.as_ref(),
        &data.storage,
        path.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(GenerationResult {
        message: DOCUMENTS_GENERATED.to_string(),
        files,
    }))
}

#[get("/{id}/download/{document_id}")]
async fn download_document(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let (id, document_id) = path.into_inner();

    let application = data
        .persistence
        .application_get_by_id(id)
        .await?
        .ok_or(IsocertError::ApplicationNotFound)?;

    let document = data
        .persistence
        .document_get_by_id(document_id)
        .await?
        .ok_or(IsocertError::DocumentNotFound)?;

    let generated = data
        .storage
        .generated_path(application.id, &document.title);
    let bytes = match web::block(move || std::fs::read(generated)).await? {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IsocertError::GeneratedDocumentNotFound.into());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, DOCX_CONTENT_TYPE))
        .insert_header(attachment(&document.title))
        .body(bytes))
}

/// `attachment; filename="{title}.docx"` with the name quoted and escaped
fn attachment(title: &str) -> ContentDisposition {
    let title: String = title.chars().filter(|c| !c.is_control()).collect();
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(format!("{title}.docx"))],
    }
}

pub fn routes() -> Scope {
    web::scope("/applications")
        .service(create_application)
        .service(list_applications)
        .service(get_application)
        .service(update_application)
        .service(delete_application)
        .service(generate_documents)
        .service(download_document)
}
