//! QMS type and document template endpoints

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use common::{TestContext, docx, multipart_file, url};

#[actix_web::test]
async fn test_qms_type_crud() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&url("/qms-types"))
        .set_json(json!({"name": "ISO 9001"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], "ISO 9001");
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&url(&format!("/qms-types/{id}")))
        .set_json(json!({"name": "ISO 9001:2015"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "ISO 9001:2015");

    let req = test::TestRequest::get().uri(&url("/qms-types")).to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], id.as_str());

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/qms-types/{id}")))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!({"message": "QMS type deleted successfully"}));

    let req = test::TestRequest::get()
        .uri(&url(&format!("/qms-types/{id}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "QMS type not found");
}

#[actix_web::test]
async fn test_duplicate_qms_type_name_conflicts() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri(&url("/qms-types"))
            .set_json(json!({"name": "ISO 14001"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(
                body,
                json!({"code": 20005, "detail": "QMS type 'ISO 14001' already exists"})
            );
        }
    }
}

macro_rules! create_qms_type {
    ($app:expr, $name:expr) => {{
        let req = test::TestRequest::post()
            .uri(&url("/qms-types"))
            .set_json(json!({ "name": $name }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&$app, req).await;
        created["id"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_document_upload_list_and_delete() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);
    let qms_type_id = create_qms_type!(app, "ISO 9001");

    let (content_type, body) = multipart_file("manual.docx", &docx("<w:document/>"));
    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/documents/upload?qms_type_id={qms_type_id}&title=Quality%20Manual"
        )))
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let document: Value = test::read_body_json(resp).await;
    assert_eq!(document["title"], "Quality Manual");
    assert_eq!(document["qms_type_id"], qms_type_id.as_str());

    let file_path = document["file_path"].as_str().unwrap().to_string();
    let expected = ctx
        .state
        .storage
        .template_path(qms_type_id.parse().unwrap(), "manual.docx");
    assert_eq!(file_path, expected.display().to_string());
    assert!(expected.exists());

    let req = test::TestRequest::get()
        .uri(&url(&format!("/documents?qms_type_id={qms_type_id}")))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);

    let req = test::TestRequest::get()
        .uri(&url(&format!("/qms-types/{qms_type_id}/documents")))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["items"][0]["title"], "Quality Manual");

    let id = document["id"].as_str().unwrap();
    let req = test::TestRequest::put()
        .uri(&url(&format!("/documents/{id}")))
        .set_json(json!({"title": "Quality Manual v2"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["title"], "Quality Manual v2");
    assert_eq!(updated["file_path"], file_path.as_str());

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/documents/{id}")))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!({"message": "Document deleted successfully"}));
    assert!(!expected.exists());

    let req = test::TestRequest::get()
        .uri(&url(&format!("/documents/{id}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_document_upload_for_missing_qms_type() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let missing = uuid::Uuid::new_v4();
    let (content_type, body) = multipart_file("manual.docx", b"docx");
    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/documents/upload?qms_type_id={missing}&title=Manual"
        )))
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!ctx.state.storage.template_path(missing, "manual.docx").exists());

    let req = test::TestRequest::post()
        .uri(&url("/documents/upload?title=Manual"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_qms_type_delete_removes_template_files() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);
    let qms_type_id = create_qms_type!(app, "ISO 27001");

    let (content_type, body) = multipart_file("policy.docx", &docx("<w:document/>"));
    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/documents/upload?qms_type_id={qms_type_id}&title=Policy"
        )))
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let document: Value = test::call_and_read_body_json(&app, req).await;
    let template = std::path::PathBuf::from(document["file_path"].as_str().unwrap());
    assert!(template.exists());

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/qms-types/{qms_type_id}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!template.exists());

    let req = test::TestRequest::get()
        .uri(&url(&format!("/documents/{}", document["id"].as_str().unwrap())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
