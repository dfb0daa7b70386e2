//! Main entry point for the isocert server.

use std::sync::Arc;

use clap::Parser;
use isocert_migration::{Migrator, MigratorTrait};
use isocert_persistence::{PersistenceService, SqlPersistService};
use isocert_server::{
    model::{
        app_state::AppState,
        config::{Cli, Command, Configuration},
    },
    service::storage::UploadStorage,
    startup,
};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let configuration = Configuration::new(&cli)?;

    if let Some(Command::Token {
        subject,
        superuser,
        inactive,
    }) = &cli.command
    {
        println!("{}", configuration.issue_token(subject, !inactive, *superuser)?);
        return Ok(());
    }

    configuration.validate()?;

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    if !configuration.auth_enabled() {
        tracing::warn!("Authentication is disabled, every request acts as a superuser");
    }

    let db = configuration.database_connection().await?;
    if configuration.db_migrate() {
        Migrator::up(&db, None).await?;
        info!("Database migrations applied");
    }

    let storage = UploadStorage::init(configuration.uploads_dir())?;
    let persistence: Arc<dyn PersistenceService> = Arc::new(SqlPersistService::new(db));

    let context_path = configuration.server_context_path();
    let address = configuration.server_address();
    let port = configuration.server_port();

    let app_state = Arc::new(AppState::new(configuration, persistence, storage));

    startup::main_server(app_state, context_path, address, port)?.await?;

    info!("Server stopped");

    Ok(())
}
