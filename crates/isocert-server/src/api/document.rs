//! Document template endpoints

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use uuid::Uuid;

use isocert_common::IsocertError;
use isocert_persistence::NewDocument;

use crate::{
    error::AppError,
    model::{
        app_state::AppState,
        constants::{DOCUMENT_DELETED, QMS_DOCUMENTS_DIR},
        response::MessageResult,
    },
    secured::Secured,
    service::upload,
};

use super::model::{DocumentListParams, DocumentUpdate, DocumentUploadParams, validate};

#[post("/upload")]
async fn upload_document(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<DocumentUploadParams>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).superuser().build().authorize()?;

    let params = params.into_inner();
    validate(&params)?;

    data.persistence
        .qms_type_get_by_id(params.qms_type_id)
        .await?
        .ok_or(IsocertError::QmsTypeNotFound)?;

    let file = upload::read_file_field(payload).await?;
    let template_path = data
        .storage
        .template_path(params.qms_type_id, &file.filename);
    upload::write_file(template_path.clone(), file.data).await?;

    let new_document = NewDocument {
        title: params.title,
        qms_type_id: params.qms_type_id,
        file_path: template_path.display().to_string(),
    };

    match data.persistence.document_create(new_document).await {
        Ok(document) => Ok(HttpResponse::Ok().json(document)),
        Err(e) => {
            data.storage.remove_file(QMS_DOCUMENTS_DIR, &template_path);
            Err(e.into())
        }
    }
}

#[get("")]
async fn list_documents(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<DocumentListParams>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let page = data
        .persistence
        .document_find_page(params.qms_type_id, params.skip, params.limit)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}")]
async fn get_document(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let document = data
        .persistence
        .document_get_by_id(path.into_inner())
        .await?
        .ok_or(IsocertError::DocumentNotFound)?;

    Ok(HttpResponse::Ok().json(document))
}

#[put("/{id}")]
async fn update_document(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<DocumentUpdate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).superuser().build().authorize()?;

    let body = body.into_inner();
    validate(&body)?;

    let document = data
        .persistence
        .document_update(path.into_inner(), body.into())
        .await?
        .ok_or(IsocertError::DocumentNotFound)?;

    Ok(HttpResponse::Ok().json(document))
}

#[delete("/{id}")]
async fn delete_document(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).superuser().build().authorize()?;

    let id = path.into_inner();
    let document = data
        .persistence
        .document_get_by_id(id)
        .await?
        .ok_or(IsocertError::DocumentNotFound)?;

    if !data.persistence.document_delete(id).await? {
        return Err(IsocertError::DocumentNotFound.into());
    }

    data.storage.remove_file(QMS_DOCUMENTS_DIR, &document.file_path);

    Ok(MessageResult::http_ok(DOCUMENT_DELETED))
}

pub fn routes() -> Scope {
    web::scope("/documents")
        .service(upload_document)
        .service(list_documents)
        .service(get_document)
        .service(update_document)
        .service(delete_document)
}
