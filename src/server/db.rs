
//! The single SQLite connection shared by every request handler.

use crate::setup::bootstrap_schema;
use super::config::AppConfig;

use diesel::sqlite::SqliteConnection;
use diesel::{ConnectionError, ConnectionResult};
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use rocket::{Rocket, Build};
use rocket::fairing::{self, AdHoc};
use rocket::tokio::sync::{Mutex, MutexGuard};

pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

/// Managed state wrapping the database connection. Handlers take
/// `&State<Db>` and hold the lock for one statement at a time.
pub struct Db {
  connection: Mutex<DbConnection>,
}

impl Db {
  pub fn new(connection: DbConnection) -> Db {
    Db {
      connection: Mutex::new(connection),
    }
  }

  /// Opens `database_path` with foreign key enforcement switched off,
  /// whatever the SQLite build defaults to. History rows may name a
  /// user id that has no account.
  pub async fn connect(database_path: &str) -> ConnectionResult<Db> {
    let mut connection = DbConnection::establish(database_path).await?;
    connection
      .batch_execute("PRAGMA foreign_keys = OFF")
      .await
      .map_err(ConnectionError::CouldntSetupConfiguration)?;
    Ok(Db::new(connection))
  }

  pub async fn connection(&self) -> MutexGuard<'_, DbConnection> {
    self.connection.lock().await
  }

  /// Opens the configured database, creates any missing tables, and
  /// places the [`Db`] into managed state. Requires [`AppConfig`] to
  /// be managed already.
  pub fn fairing() -> AdHoc {
    AdHoc::try_on_ignite("SQLite Database", init_db)
  }
}

async fn init_db(rocket: Rocket<Build>) -> fairing::Result {
  let Some(database_path) = rocket.state::<AppConfig>().map(|config| config.database_path.clone()) else {
    log::error!("Database fairing requires AppConfig in managed state");
    return Err(rocket);
  };
  let db = match Db::connect(&database_path).await {
    Ok(db) => db,
    Err(err) => {
      log::error!("Error opening database {database_path}: {err}");
      return Err(rocket);
    }
  };
  log::info!("Connected to the SQLite database at {database_path}.");

  // A missing table only breaks the endpoints that use it.
  if bootstrap_schema(&mut *db.connection().await).await.is_err() {
    log::warn!("Continuing with an incomplete schema");
  }
  Ok(rocket.manage(db))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::{models, schema};

  use diesel_async::RunQueryDsl;

  #[rocket::async_test]
  async fn history_may_reference_missing_user() {
    let db = Db::connect(":memory:").await.unwrap();
    let mut connection = db.connection().await;
    bootstrap_schema(&mut connection).await.unwrap();

    let entry = models::NewPlayingHistoryEntry {
      user_id: 77,
      game_type: String::from("snake"),
      score: Some(1),
    };
    let inserted = diesel::insert_into(schema::playing_history::table)
      .values(&entry)
      .execute(&mut *connection)
      .await
      .unwrap();
    assert_eq!(inserted, 1);
  }
}
