//! Application endpoints, document generation and download

#[macro_use]
mod common;

use std::io::{Cursor, Read};

use actix_web::{http::StatusCode, test};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use zip::ZipArchive;

use common::{TestContext, company_body, docx, multipart_file, url};

macro_rules! post_json {
    ($app:expr, $path:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri(&url($path))
            .set_json($body)
            .to_request();
        let value: Value = test::call_and_read_body_json(&$app, req).await;
        value
    }};
}

macro_rules! upload_template {
    ($app:expr, $qms_type_id:expr, $title:expr, $filename:expr, $xml:expr) => {{
        let (content_type, body) = multipart_file($filename, &docx($xml));
        let req = test::TestRequest::post()
            .uri(&url(&format!(
                "/documents/upload?qms_type_id={}&title={}",
                $qms_type_id, $title
            )))
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request();
        let value: Value = test::call_and_read_body_json(&$app, req).await;
        value
    }};
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

fn document_xml(data: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut part = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[actix_web::test]
async fn test_application_lifecycle_advances_updated_at() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let company = post_json!(app, "/companies", company_body("Acme Corp", "REG1"));
    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));

    let created = post_json!(
        app,
        "/applications",
        json!({
            "company_id": company["id"],
            "qms_type_id": qms_type["id"],
            "form_data": {"field1": "value1"}
        })
    );
    assert!(created["id"].is_string());
    assert_eq!(created["form_data"], json!({"field1": "value1"}));
    assert_eq!(created["created_at"], created["updated_at"]);

    let id = created["id"].as_str().unwrap();
    let req = test::TestRequest::put()
        .uri(&url(&format!("/applications/{id}")))
        .set_json(json!({"form_data": {"field1": "value2"}}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["form_data"]["field1"], "value2");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(timestamp(&updated["updated_at"]) > timestamp(&updated["created_at"]));

    let req = test::TestRequest::put()
        .uri(&url(&format!("/applications/{id}")))
        .set_json(json!({}))
        .to_request();
    let touched: Value = test::call_and_read_body_json(&app, req).await;
    assert!(timestamp(&touched["updated_at"]) > timestamp(&updated["updated_at"]));
    assert_eq!(touched["form_data"]["field1"], "value2");

    let req = test::TestRequest::get().uri(&url("/applications")).to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/applications/{id}")))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!({"message": "Application deleted successfully"}));

    let req = test::TestRequest::get()
        .uri(&url(&format!("/applications/{id}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_application_with_missing_references() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));

    let req = test::TestRequest::post()
        .uri(&url("/applications"))
        .set_json(json!({
            "company_id": uuid::Uuid::new_v4(),
            "qms_type_id": qms_type["id"],
            "form_data": {}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Company not found");

    let company = post_json!(app, "/companies", company_body("Acme Corp", "REG1"));
    let req = test::TestRequest::post()
        .uri(&url("/applications"))
        .set_json(json!({
            "company_id": company["id"],
            "qms_type_id": uuid::Uuid::new_v4(),
            "form_data": {}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "QMS type not found");

    let req = test::TestRequest::get().uri(&url("/applications")).to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 0);
}

#[actix_web::test]
async fn test_company_delete_cascades_to_applications() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let company = post_json!(app, "/companies", company_body("Acme Corp", "REG1"));
    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));
    let application = post_json!(
        app,
        "/applications",
        json!({
            "company_id": company["id"],
            "qms_type_id": qms_type["id"],
            "form_data": {}
        })
    );

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/companies/{}", company["id"].as_str().unwrap())))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&url(&format!(
            "/applications/{}",
            application["id"].as_str().unwrap()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_generate_and_download_documents() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let company = post_json!(app, "/companies", company_body("Acme & Sons", "REG1"));
    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));
    let qms_type_id = qms_type["id"].as_str().unwrap();

    let manual = upload_template!(
        app,
        qms_type_id,
        "Manual",
        "manual.docx",
        "<w:document><w:t>{{ company_name }} / {{ scope }} / {{ missing }}</w:t></w:document>"
    );
    upload_template!(
        app,
        qms_type_id,
        "Policy",
        "policy.docx",
        "<w:document><w:t>{{ registration_number }}</w:t></w:document>"
    );

    let application = post_json!(
        app,
        "/applications",
        json!({
            "company_id": company["id"],
            "qms_type_id": qms_type_id,
            "form_data": {"scope": "Design <and> manufacture"}
        })
    );
    let application_id = application["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/applications/{application_id}/generate-documents"
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let result: Value = test::read_body_json(resp).await;
    assert_eq!(result["message"], "Documents generated successfully");

    let files = result["files"].as_array().unwrap();
    let titles: Vec<&str> = files
        .iter()
        .map(|f| f["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Manual", "Policy"]);
    for file in files {
        assert!(std::path::Path::new(file["path"].as_str().unwrap()).exists());
    }

    let req = test::TestRequest::get()
        .uri(&url(&format!(
            "/applications/{application_id}/download/{}",
            manual["id"].as_str().unwrap()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"Manual.docx\""
    );
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(
        document_xml(&bytes),
        "<w:document><w:t>Acme &amp; Sons / Design &lt;and&gt; manufacture / </w:t></w:document>"
    );
}

#[actix_web::test]
async fn test_download_quotes_title_in_disposition() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let company = post_json!(app, "/companies", company_body("Acme Corp", "REG1"));
    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));
    let qms_type_id = qms_type["id"].as_str().unwrap();

    let (content_type, body) = multipart_file("manual.docx", &docx("<w:document/>"));
    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/documents/upload?qms_type_id={qms_type_id}&title=Quality%0AManual"
        )))
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let manual = upload_template!(
        app,
        qms_type_id,
        "Quality%20%22Manual%22",
        "manual.docx",
        "<w:document><w:t>{{ company_name }}</w:t></w:document>"
    );
    assert_eq!(manual["title"], "Quality \"Manual\"");

    let application = post_json!(
        app,
        "/applications",
        json!({
            "company_id": company["id"],
            "qms_type_id": qms_type_id,
            "form_data": {}
        })
    );
    let application_id = application["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/applications/{application_id}/generate-documents"
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&url(&format!(
            "/applications/{application_id}/download/{}",
            manual["id"].as_str().unwrap()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"Quality \\\"Manual\\\".docx\""
    );
}

#[actix_web::test]
async fn test_download_before_generation_is_not_found() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let company = post_json!(app, "/companies", company_body("Acme Corp", "REG1"));
    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));
    let qms_type_id = qms_type["id"].as_str().unwrap();
    let manual = upload_template!(app, qms_type_id, "Manual", "manual.docx", "<w:document/>");
    let application = post_json!(
        app,
        "/applications",
        json!({
            "company_id": company["id"],
            "qms_type_id": qms_type_id,
            "form_data": {}
        })
    );
    let application_id = application["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&url(&format!(
            "/applications/{application_id}/download/{}",
            manual["id"].as_str().unwrap()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Generated document not found");

    let req = test::TestRequest::get()
        .uri(&url(&format!(
            "/applications/{application_id}/download/{}",
            uuid::Uuid::new_v4()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Document not found");

    let req = test::TestRequest::get()
        .uri(&url(&format!(
            "/applications/{}/download/{}",
            uuid::Uuid::new_v4(),
            manual["id"].as_str().unwrap()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Application not found");
}

#[actix_web::test]
async fn test_generation_fails_fast_on_missing_template() {
    let ctx = TestContext::open().await;
    let app = test_app!(ctx);

    let company = post_json!(app, "/companies", company_body("Acme Corp", "REG1"));
    let qms_type = post_json!(app, "/qms-types", json!({"name": "ISO 9001"}));
    let qms_type_id = qms_type["id"].as_str().unwrap();

    let first = upload_template!(app, qms_type_id, "A-Manual", "a.docx", "<w:document/>");
    upload_template!(app, qms_type_id, "B-Policy", "b.docx", "<w:document/>");
    std::fs::remove_file(first["file_path"].as_str().unwrap()).unwrap();

    let application = post_json!(
        app,
        "/applications",
        json!({
            "company_id": company["id"],
            "qms_type_id": qms_type_id,
            "form_data": {}
        })
    );
    let application_id: uuid::Uuid = application["id"].as_str().unwrap().parse().unwrap();

    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/applications/{application_id}/generate-documents"
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"code": 30000, "detail": "Internal Server Error"}));

    assert!(
        !ctx.state
            .storage
            .generated_path(application_id, "B-Policy")
            .exists()
    );

    let req = test::TestRequest::post()
        .uri(&url(&format!(
            "/applications/{}/generate-documents",
            uuid::Uuid::new_v4()
        )))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
