
use crate::server::db::{Db, DbConnection};

use diesel::QueryResult;
use diesel_async::SimpleAsyncConnection;

pub const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT UNIQUE NOT NULL,
  password_hash TEXT NOT NULL,
  profile_pic_url TEXT DEFAULT '/images/default-profile.png'
)";

pub const CREATE_PLAYING_HISTORY_TABLE: &str = "CREATE TABLE IF NOT EXISTS playing_history (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER NOT NULL,
  game_type TEXT NOT NULL,
  score INTEGER,
  timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
  FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
)";

const TABLES: [(&str, &str); 2] = [
  ("Users", CREATE_USERS_TABLE),
  ("Playing history", CREATE_PLAYING_HISTORY_TABLE),
];

/// Creates every table that does not exist yet. Each table is
/// attempted even if an earlier one failed; the first failure is
/// returned.
pub async fn bootstrap_schema(connection: &mut DbConnection) -> QueryResult<()> {
  let mut result = Ok(());
  for (name, sql) in TABLES {
    match connection.batch_execute(sql).await {
      Ok(()) => log::info!("{name} table ready."),
      Err(err) => {
        log::error!("Error creating {} table: {err}", name.to_lowercase());
        result = result.and(Err(err));
      }
    }
  }
  result
}

/// Creates the tables in `database_path` without starting the server.
pub async fn run_bootstrap(database_path: &str) -> anyhow::Result<()> {
  log::info!("Running schema bootstrap on {database_path} ...");
  let db = Db::connect(database_path).await?;
  bootstrap_schema(&mut *db.connection().await).await?;
  log::info!("Schema bootstrap complete.");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::schema;

  use diesel::prelude::*;
  use diesel_async::RunQueryDsl;

  #[rocket::async_test]
  async fn bootstrap_is_idempotent() {
    let db = Db::connect(":memory:").await.unwrap();
    let mut connection = db.connection().await;
    bootstrap_schema(&mut connection).await.unwrap();
    bootstrap_schema(&mut connection).await.unwrap();

    let users = schema::users::table
      .count()
      .get_result::<i64>(&mut *connection)
      .await
      .unwrap();
    assert_eq!(users, 0);
  }

  #[rocket::async_test]
  async fn profile_picture_defaults_in_storage() {
    let db = Db::connect(":memory:").await.unwrap();
    let mut connection = db.connection().await;
    bootstrap_schema(&mut connection).await.unwrap();
    connection
      .batch_execute("INSERT INTO users (username, password_hash) VALUES ('bob', 'x')")
      .await
      .unwrap();

    let profile_pic = schema::users::table
      .select(schema::users::profile_pic_url)
      .first::<Option<String>>(&mut *connection)
      .await
      .unwrap();
    assert_eq!(profile_pic.as_deref(), Some(crate::db::models::DEFAULT_PROFILE_PIC));
  }

  #[rocket::async_test]
  async fn one_broken_table_does_not_stop_the_other() {
    let db = Db::connect(":memory:").await.unwrap();
    let mut connection = db.connection().await;
    // An index already named `users` makes CREATE TABLE IF NOT EXISTS fail.
    connection
      .batch_execute("CREATE TABLE scratch (x INTEGER); CREATE INDEX users ON scratch (x);")
      .await
      .unwrap();
    assert!(bootstrap_schema(&mut connection).await.is_err());

    let entries = schema::playing_history::table
      .count()
      .get_result::<i64>(&mut *connection)
      .await
      .unwrap();
    assert_eq!(entries, 0);
  }
}
