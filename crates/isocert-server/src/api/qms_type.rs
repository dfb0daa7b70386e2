//! QMS type endpoints
//!
//! Reads need an active user; changes to the catalogue need a superuser.

use actix_web::{HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use uuid::Uuid;

use isocert_common::IsocertError;

use crate::{
    error::AppError,
    model::{
        app_state::AppState,
        constants::{QMS_DOCUMENTS_DIR, QMS_TYPE_DELETED},
        response::MessageResult,
    },
    secured::Secured,
};

use super::model::{PageParams, QmsTypeCreate, QmsTypeUpdate, validate};

#[post("")]
async fn create_qms_type(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<QmsTypeCreate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).superuser().build().authorize()?;

    let body = body.into_inner();
    validate(&body)?;

    let qms_type = data.persistence.qms_type_create(body.into()).await?;

    Ok(HttpResponse::Ok().json(qms_type))
}

#[get("")]
async fn list_qms_types(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let page = data
        .persistence
        .qms_type_find_page(params.skip, params.limit)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}")]
async fn get_qms_type(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let qms_type = data
        .persistence
        .qms_type_get_by_id(path.into_inner())
        .await?
        .ok_or(IsocertError::QmsTypeNotFound)?;

    Ok(HttpResponse::Ok().json(qms_type))
}

#[get("/{id}/documents")]
async fn list_qms_type_documents(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let id = path.into_inner();
    data.persistence
        .qms_type_get_by_id(id)
        .await?
        .ok_or(IsocertError::QmsTypeNotFound)?;

    let page = data
        .persistence
        .document_find_page(Some(id), params.skip, params.limit)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[put("/{id}")]
async fn update_qms_type(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<QmsTypeUpdate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).superuser().build().authorize()?;

    let body = body.into_inner();
    validate(&body)?;

    let qms_type = data
        .persistence
        .qms_type_update(path.into_inner(), body.into())
        .await?
        .ok_or(IsocertError::QmsTypeNotFound)?;

    Ok(HttpResponse::Ok().json(qms_type))
}

#[delete("/{id}")]
async fn delete_qms_type(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).superuser().build().authorize()?;

    let id = path.into_inner();
    data.persistence
        .qms_type_get_by_id(id)
        .await?
        .ok_or(IsocertError::QmsTypeNotFound)?;

    // Cascaded template rows are gone after the delete, collect their files first
    let templates = data.persistence.documents_find_by_qms_type(id).await?;

    if !data.persistence.qms_type_delete(id).await? {
        return Err(IsocertError::QmsTypeNotFound.into());
    }

    for template in &templates {
        data.storage.remove_file(QMS_DOCUMENTS_DIR, &template.file_path);
    }

    tracing::info!(
        qms_type_id = %id,
        templates = templates.len(),
        "QMS type deleted"
    );

    Ok(MessageResult::http_ok(QMS_TYPE_DELETED))
}

pub fn routes() -> Scope {
    web::scope("/qms-types")
        .service(create_qms_type)
        .service(list_qms_types)
        .service(get_qms_type)
        .service(list_qms_type_documents)
        .service(update_qms_type)
        .service(delete_qms_type)
}
