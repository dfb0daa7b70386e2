//! Shared test infrastructure for the HTTP API tests
//!
//! - `TestContext`: app state over an in-memory SQLite database and a
//!   temporary uploads root
//! - `test_app!`: the actix test service with the production middleware
//! - request body helpers for multipart uploads and `.docx` templates

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Arc;

use base64::Engine;
use config::Config;
use isocert_migration::{Migrator, MigratorTrait};
use isocert_persistence::{PersistenceService, SqlPersistService};
use isocert_server::model::{
    app_state::AppState,
    config::Configuration,
    constants::{
        AUTH_ENABLED, DB_POOL_MAX_CONNECTIONS, DB_POOL_MIN_CONNECTIONS, DB_URL, TOKEN_SECRET_KEY,
        UPLOADS_DIR,
    },
};
use isocert_server::service::storage::UploadStorage;
use serde_json::{Value, json};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

pub const CONTEXT_PATH: &str = "/api/v1";
pub const BOUNDARY: &str = "isocert-test-boundary";

pub struct TestContext {
    pub state: Arc<AppState>,
    pub dir: TempDir,
}

impl TestContext {
    /// Context with authentication switched off
    pub async fn open() -> Self {
        Self::build(false).await
    }

    /// Context that requires bearer tokens
    pub async fn secured() -> Self {
        Self::build(true).await
    }

    async fn build(auth_enabled: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let secret = base64::engine::general_purpose::STANDARD
            .encode("isocert integration test secret key material");

        let config = Config::builder()
            .set_override(DB_URL, "sqlite::memory:")
            .unwrap()
            .set_override(DB_POOL_MAX_CONNECTIONS, "1")
            .unwrap()
            .set_override(DB_POOL_MIN_CONNECTIONS, "1")
            .unwrap()
            .set_override(AUTH_ENABLED, if auth_enabled { "true" } else { "false" })
            .unwrap()
            .set_override(TOKEN_SECRET_KEY, secret)
            .unwrap()
            .set_override(
                UPLOADS_DIR,
                dir.path().join("uploads").display().to_string(),
            )
            .unwrap()
            .build()
            .unwrap();
        let configuration = Configuration::from_config(config);

        let db = configuration.database_connection().await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let storage = UploadStorage::init(configuration.uploads_dir()).unwrap();
        let persistence: Arc<dyn PersistenceService> = Arc::new(SqlPersistService::new(db));

        Self {
            state: Arc::new(AppState::new(configuration, persistence, storage)),
            dir,
        }
    }

    pub fn token(&self, subject: &str, is_active: bool, is_superuser: bool) -> String {
        self.state
            .configuration
            .issue_token(subject, is_active, is_superuser)
            .unwrap()
    }

    pub fn bearer(&self, subject: &str, is_active: bool, is_superuser: bool) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.token(subject, is_active, is_superuser)),
        )
    }
}

macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(isocert_server::middleware::auth::Authentication)
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::from($ctx.state.clone()))
                .configure(|cfg| isocert_server::startup::configure(cfg, common::CONTEXT_PATH)),
        )
        .await
    };
}

pub fn url(path: &str) -> String {
    format!("{CONTEXT_PATH}{path}")
}

pub fn company_body(name: &str, registration_number: &str) -> Value {
    json!({
        "name": name,
        "address": "1 Main St",
        "contact_person": "Jane Doe",
        "email": "jane@acme.example",
        "phone": "+1-555-0100",
        "industry": "Manufacturing",
        "registration_number": registration_number,
        "employees": 120,
        "website": "https://acme.example"
    })
}

/// A `multipart/form-data` body with a single `file` field
pub fn multipart_file(filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// A minimal `.docx` archive whose main part is `document_xml`
pub fn docx(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"></Types>"#)
        .unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}
