
use diesel::prelude::*;

/// Profile picture assigned to every new account.
pub const DEFAULT_PROFILE_PIC: &str = "/images/default-profile.png";

#[derive(Queryable, Selectable, Clone)]
#[diesel(table_name = super::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
  pub id: i64,
  pub username: String,
  pub password_hash: String,
  pub profile_pic_url: Option<String>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = super::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewUser {
  pub username: String,
  pub password_hash: String,
  pub profile_pic_url: Option<String>,
}

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = super::schema::playing_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayingHistoryEntry {
  pub id: i64,
  pub user_id: i64,
  pub game_type: String,
  pub score: Option<i64>,
  pub timestamp: chrono::NaiveDateTime,
}

/// The `timestamp` column is left to its `CURRENT_TIMESTAMP` default.
#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = super::schema::playing_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewPlayingHistoryEntry {
  pub user_id: i64,
  pub game_type: String,
  pub score: Option<i64>,
}

impl User {
  /// The stored profile picture, falling back to the column default
  /// for rows written without one.
  pub fn profile_pic(&self) -> &str {
    self.profile_pic_url.as_deref().unwrap_or(DEFAULT_PROFILE_PIC)
  }
}
