//! Company endpoints

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use uuid::Uuid;

use isocert_common::IsocertError;
use isocert_persistence::CompanyPatch;

use crate::{
    error::AppError,
    model::{
        app_state::AppState,
        constants::{COMPANY_DELETED, COMPANY_LOGOS_DIR, LOGO_UPLOADED},
        response::{LogoUploadResult, MessageResult},
    },
    secured::Secured,
    service::upload,
};

use super::model::{CompanyCreate, CompanyUpdate, PageParams, validate};

#[post("")]
async fn create_company(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<CompanyCreate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let body = body.into_inner();
    validate(&body)?;

    let company = data.persistence.company_create(body.into()).await?;

    Ok(HttpResponse::Ok().json(company))
}

#[get("")]
async fn list_companies(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let page = data
        .persistence
        .company_find_page(params.skip, params.limit)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}")]
async fn get_company(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let company = data
        .persistence
        .company_get_by_id(path.into_inner())
        .await?
        .ok_or(IsocertError::CompanyNotFound)?;

    Ok(HttpResponse::Ok().json(company))
}

#[put("/{id}")]
async fn update_company(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CompanyUpdate>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let body = body.into_inner();
    validate(&body)?;

    let company = data
        .persistence
        .company_update(path.into_inner(), body.into())
        .await?
        .ok_or(IsocertError::CompanyNotFound)?;

    Ok(HttpResponse::Ok().json(company))
}

#[delete("/{id}")]
async fn delete_company(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let id = path.into_inner();
    let company = data
        .persistence
        .company_get_by_id(id)
        .await?
        .ok_or(IsocertError::CompanyNotFound)?;

    if !data.persistence.company_delete(id).await? {
        return Err(IsocertError::CompanyNotFound.into());
    }

    if let Some(logo) = company.logo {
        data.storage.remove_file(COMPANY_LOGOS_DIR, logo);
    }

    Ok(MessageResult::http_ok(COMPANY_DELETED))
}

#[post("/{id}/logo")]
async fn upload_logo(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    Secured::builder(&req).build().authorize()?;

    let id = path.into_inner();
    let company = data
        .persistence
        .company_get_by_id(id)
        .await?
        .ok_or(IsocertError::CompanyNotFound)?;

    let file = upload::read_file_field(payload).await?;
    let logo_path = data.storage.logo_path(id, &file.filename);
    upload::write_file(logo_path.clone(), file.data).await?;

    let file_path = logo_path.display().to_string();
    data.persistence
        .company_update(id, CompanyPatch::logo(file_path.clone()))
        .await?
        .ok_or(IsocertError::CompanyNotFound)?;

    if let Some(previous) = company.logo
        && previous != file_path
    {
        data.storage.remove_file(COMPANY_LOGOS_DIR, previous);
    }

    tracing::info!(company_id = %id, path = %file_path, "Company logo uploaded");

    Ok(HttpResponse::Ok().json(LogoUploadResult {
        message: LOGO_UPLOADED.to_string(),
        file_path,
    }))
}

pub fn routes() -> Scope {
    web::scope("/companies")
        .service(create_company)
        .service(list_companies)
        .service(get_company)
        .service(update_company)
        .service(delete_company)
        .service(upload_logo)
}
