use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use settings::{Database, Server, Settings};

mod settings;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "mybudget={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    match settings.server {
        Some(server) => serve(server).await,
        None => {
            tracing::warn!("no [server] section configured, nothing to run");
            Ok(())
        }
    }
}

/// Open the ledger database and answer HTTP requests until the listener fails.
async fn serve(server: Server) -> Result<(), BoxError> {
    let db = open_database(&server.database).await.inspect_err(|err| {
        tracing::error!("failed to initialize database: {err}");
    })?;
    let engine = engine::Engine::builder().database(db.clone()).build().await?;

    let bind = server.bind.as_deref().unwrap_or("127.0.0.1");
    let addr = format!("{bind}:{}", server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .inspect_err(|err| tracing::error!("failed to bind server listener on {addr}: {err}"))?;

    server::run_with_listener(engine, db, listener).await?;
    Ok(())
}

async fn open_database(config: &Database) -> Result<DatabaseConnection, BoxError> {
    let Database::Sqlite(path) = config;

    let database = sea_orm::Database::connect(format!("sqlite:{path}?mode=rwc")).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
