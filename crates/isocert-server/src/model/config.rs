//! Configuration management for the isocert server
//!
//! Sources, lowest precedence first: the YAML file, `ISOCERT__*` environment
//! variables, command line flags.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use config::{Config, ConfigError, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use isocert_auth::DEFAULT_TOKEN_EXPIRE_SECONDS;

use crate::startup::{LogRotation, LoggingConfig};

use super::constants::{
    AUTH_ENABLED, DB_MIGRATE, DB_POOL_CONNECT_TIMEOUT, DB_POOL_IDLE_TIMEOUT,
    DB_POOL_MAX_CONNECTIONS, DB_POOL_MIN_CONNECTIONS, DB_SQLX_LOGGING, DB_URL,
    DEFAULT_CONFIG_FILE, DEFAULT_CONTEXT_PATH, DEFAULT_LOGS_PATH, DEFAULT_SERVER_ADDRESS,
    DEFAULT_SERVER_PORT, DEFAULT_UPLOADS_DIR, ENV_PREFIX, ENV_SEPARATOR, LOGS_CONSOLE, LOGS_FILE,
    LOGS_LEVEL, LOGS_PATH, LOGS_ROTATION, SERVER_ADDRESS, SERVER_CONTEXT_PATH, SERVER_PORT,
    TOKEN_EXPIRE_SECONDS, TOKEN_SECRET_KEY, UPLOADS_DIR,
};

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command(name = "isocert-server", version, about)]
pub struct Cli {
    /// Configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    #[arg(long = "uploads-dir")]
    pub uploads_dir: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a signed access token
    Token {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        superuser: bool,
        #[arg(long)]
        inactive: bool,
    },
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config_builder = Config::builder()
            .add_source(config::File::with_name(&cli.config).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        if let Some(v) = &cli.database_url {
            config_builder = config_builder.set_override(DB_URL, v.as_str())?;
        }
        if let Some(v) = cli.port {
            config_builder = config_builder.set_override(SERVER_PORT, i64::from(v))?;
        }
        if let Some(v) = &cli.uploads_dir {
            config_builder = config_builder.set_override(UPLOADS_DIR, v.as_str())?;
        }

        Ok(Self::from_config(config_builder.build()?))
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    /// Reject combinations the server cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.config.get_string(DB_URL).is_err() {
            anyhow::bail!("{DB_URL} is required (set it in the config file, ISOCERT__DB__URL or --db-url)");
        }
        if self.auth_enabled() && self.token_secret_key().is_empty() {
            anyhow::bail!("{TOKEN_SECRET_KEY} is required when {AUTH_ENABLED} is true");
        }
        Ok(())
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn server_context_path(&self) -> String {
        self.config
            .get_string(SERVER_CONTEXT_PATH)
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string())
    }

    // ========================================================================
    // Upload Configuration
    // ========================================================================

    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(
            self.config
                .get_string(UPLOADS_DIR)
                .unwrap_or(DEFAULT_UPLOADS_DIR.to_string()),
        )
    }

    // ========================================================================
    // Auth Configuration
    // ========================================================================

    pub fn auth_enabled(&self) -> bool {
        self.config.get_bool(AUTH_ENABLED).unwrap_or(true)
    }

    pub fn token_secret_key(&self) -> String {
        self.config
            .get_string(TOKEN_SECRET_KEY)
            .unwrap_or_default()
    }

    pub fn auth_token_expire_seconds(&self) -> i64 {
        self.config
            .get_int(TOKEN_EXPIRE_SECONDS)
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_SECONDS)
    }

    /// Sign a token for `subject` with the configured secret
    pub fn issue_token(
        &self,
        subject: &str,
        is_active: bool,
        is_superuser: bool,
    ) -> anyhow::Result<String> {
        let secret_key = self.token_secret_key();
        if secret_key.is_empty() {
            anyhow::bail!("{TOKEN_SECRET_KEY} is not configured");
        }

        Ok(isocert_auth::service::auth::encode_jwt_token(
            subject,
            &secret_key,
            self.auth_token_expire_seconds(),
            is_active,
            is_superuser,
        )?)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        let rotation = match self
            .config
            .get_string(LOGS_ROTATION)
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        };

        let mut logging = LoggingConfig::from_config(
            self.config
                .get_string(LOGS_PATH)
                .unwrap_or(DEFAULT_LOGS_PATH.to_string()),
            self.config.get_bool(LOGS_CONSOLE).unwrap_or(true),
            self.config.get_bool(LOGS_FILE).unwrap_or(true),
            self.config
                .get_string(LOGS_LEVEL)
                .unwrap_or("info".to_string()),
        );
        logging.rotation = rotation;
        logging
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub fn db_migrate(&self) -> bool {
        self.config.get_bool(DB_MIGRATE).unwrap_or(true)
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let max_connections = self.config.get_int(DB_POOL_MAX_CONNECTIONS).unwrap_or(10) as u32;
        let min_connections = self.config.get_int(DB_POOL_MIN_CONNECTIONS).unwrap_or(1) as u32;
        let connect_timeout = self.config.get_int(DB_POOL_CONNECT_TIMEOUT).unwrap_or(30) as u64;
        let idle_timeout = self.config.get_int(DB_POOL_IDLE_TIMEOUT).unwrap_or(600) as u64;
        let sqlx_logging = self.config.get_bool(DB_SQLX_LOGGING).unwrap_or(false);

        let url = self.config.get_string(DB_URL)?;

        let mut opt = ConnectOptions::new(url);

        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .sqlx_logging(sqlx_logging)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        let database_connection: DatabaseConnection = Database::connect(opt).await?;

        Ok(database_connection)
    }
}
