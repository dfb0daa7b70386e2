// Configuration keys, defaults and response messages

// Server
pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_PORT: &str = "server.port";
pub const SERVER_CONTEXT_PATH: &str = "server.contextPath";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_CONTEXT_PATH: &str = "/api/v1";

// Database
pub const DB_URL: &str = "db.url";
pub const DB_POOL_MAX_CONNECTIONS: &str = "db.pool.maxConnections";
pub const DB_POOL_MIN_CONNECTIONS: &str = "db.pool.minConnections";
pub const DB_POOL_CONNECT_TIMEOUT: &str = "db.pool.connectTimeout";
pub const DB_POOL_IDLE_TIMEOUT: &str = "db.pool.idleTimeout";
pub const DB_SQLX_LOGGING: &str = "db.sqlxLogging";
pub const DB_MIGRATE: &str = "db.migrate";

// Uploads
pub const UPLOADS_DIR: &str = "uploads.dir";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const COMPANY_LOGOS_DIR: &str = "company_logos";
pub const QMS_DOCUMENTS_DIR: &str = "qms_documents";
pub const GENERATED_DIR: &str = "generated";

// Auth
pub const AUTH_ENABLED: &str = "auth.enabled";
pub const TOKEN_SECRET_KEY: &str = "auth.token.secretKey";
pub const TOKEN_EXPIRE_SECONDS: &str = "auth.token.expireSeconds";

// Logging
pub const LOGS_PATH: &str = "logs.path";
pub const LOGS_CONSOLE: &str = "logs.console";
pub const LOGS_FILE: &str = "logs.file";
pub const LOGS_LEVEL: &str = "logs.level";
pub const LOGS_ROTATION: &str = "logs.rotation";
pub const DEFAULT_LOGS_PATH: &str = "logs";

pub const ENV_PREFIX: &str = "ISOCERT";
pub const ENV_SEPARATOR: &str = "__";
pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// Response messages
pub const COMPANY_DELETED: &str = "Company deleted successfully";
pub const LOGO_UPLOADED: &str = "Logo uploaded successfully";
pub const QMS_TYPE_DELETED: &str = "QMS type deleted successfully";
pub const DOCUMENT_DELETED: &str = "Document deleted successfully";
pub const APPLICATION_DELETED: &str = "Application deleted successfully";
pub const DOCUMENTS_GENERATED: &str = "Documents generated successfully";
pub const COULD_NOT_VALIDATE_CREDENTIALS: &str = "Could not validate credentials";
