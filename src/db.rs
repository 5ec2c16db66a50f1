use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, warn};

use crate::{config::DbSettings, entities::movie, error::AppResult};

/// Hands out database connections to the store.
///
/// In per-request mode every `open` dials a fresh single-connection handle and
/// `release` closes it. Shared mode wraps a connection owned elsewhere.
#[derive(Clone)]
pub struct ConnectionFactory {
    mode: Mode,
}

#[derive(Clone)]
enum Mode {
    PerRequest(DbSettings),
    Shared(DatabaseConnection),
}

impl ConnectionFactory {
    pub fn per_request(settings: DbSettings) -> Self {
        Self { mode: Mode::PerRequest(settings) }
    }

    pub fn shared(db: DatabaseConnection) -> Self {
        Self { mode: Mode::Shared(db) }
    }

    pub async fn open(&self) -> AppResult<DatabaseConnection> {
        match &self.mode {
            Mode::PerRequest(settings) => {
                let url = settings.connection_url()?;
                let mut opts = ConnectOptions::new(url);
                opts.max_connections(1).min_connections(0).sqlx_logging(false);

                let db = Database::connect(opts).await?;
                debug!(backend = ?db.get_database_backend(), "opened connection");
                Ok(db)
            },
            Mode::Shared(db) => Ok(db.clone()),
        }
    }

    pub async fn release(&self, db: DatabaseConnection) {
        if let Mode::PerRequest(_) = self.mode {
            match db.close().await {
                Ok(()) => debug!("closed connection"),
                Err(err) => warn!(error = %err, "failed to close connection"),
            }
        }
    }
}

/// Creates the `movies` table from the entity definition if it is missing.
pub async fn create_schema(db: &DatabaseConnection) -> AppResult<()> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(movie::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}
