// Route table of the REST API

use actix_web::web;

use super::{application, company, document, health, qms_type};

/// Register every API scope on `cfg`
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::routes())
        .service(company::routes())
        .service(qms_type::routes())
        .service(document::routes())
        .service(application::routes());
}
