
//! Playing history endpoints.

use crate::db::{schema, models};
use super::db::Db;
use super::error::{messages, ApiError, ApiErrorExt, ApiSuccessResponse};
use super::requests::{parse_body, required_str, JsonBody};

use rocket::{Route, State, get, post, routes};
use serde::{Deserialize, Serialize};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use utoipa::ToSchema;

pub fn history_routes() -> Vec<Route> {
  routes![
    save_history,
    list_history,
  ]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveHistoryParams {
  /// Required and non-zero. Not checked against existing users.
  pub user_id: Option<i64>,
  /// Required and non-empty.
  #[schema(examples("snake"))]
  pub game_type: Option<String>,
  /// Required, but zero is a valid score.
  pub score: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveHistoryResponse {
  #[schema(value_type = String)]
  pub message: &'static str,
  pub history_id: i64,
}

/// One stored history row, in the same shape as the table.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryEntryResponse {
  pub id: i64,
  pub user_id: i64,
  pub game_type: String,
  pub score: Option<i64>,
  /// When the entry was saved, in UTC.
  #[schema(value_type = String, example = "2025-02-01 05:33:10")]
  #[serde(serialize_with = "serialize_datetime")]
  pub timestamp: chrono::NaiveDateTime,
}

impl SaveHistoryParams {
  fn require(self) -> Result<models::NewPlayingHistoryEntry, ApiError> {
    let user_id = self.user_id.filter(|id| *id != 0);
    match (user_id, required_str(self.game_type), self.score) {
      (Some(user_id), Some(game_type), Some(score)) =>
        Ok(models::NewPlayingHistoryEntry { user_id, game_type, score: Some(score) }),
      _ => Err(ApiError::validation(messages::MISSING_HISTORY_DATA)),
    }
  }
}

impl From<models::PlayingHistoryEntry> for HistoryEntryResponse {
  fn from(entry: models::PlayingHistoryEntry) -> Self {
    Self {
      id: entry.id,
      user_id: entry.user_id,
      game_type: entry.game_type,
      score: entry.score,
      timestamp: entry.timestamp,
    }
  }
}

fn serialize_datetime<S>(datetime: &chrono::NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where S: serde::Serializer {
  let formatted = datetime.format("%Y-%m-%d %H:%M:%S").to_string();
  serializer.serialize_str(&formatted)
}

/// Records one finished game for a user.
#[utoipa::path(
  post,
  path="/api/history/save",
  tag="history",
  request_body = SaveHistoryParams,
  responses(
    (status = 201, description = "Entry saved", body = SaveHistoryResponse),
    (status = 400, description = "userId, gameType or score missing"),
    (status = 500, description = "Storage failure"),
  ),
)]
#[post("/history/save", data = "<params>")]
pub async fn save_history(
  params: JsonBody<'_, SaveHistoryParams>,
  db: &State<Db>,
) -> Result<ApiSuccessResponse<SaveHistoryResponse>, ApiError> {
  let new_entry = parse_body(params, messages::MISSING_HISTORY_DATA)?.require()?;
  let history_id = diesel::insert_into(schema::playing_history::table)
    .values(&new_entry)
    .returning(schema::playing_history::id)
    .get_result::<i64>(&mut *db.connection().await)
    .await
    .or_internal(messages::HISTORY_NOT_SAVED)?;

  let resp = SaveHistoryResponse {
    message: "Playing history saved successfully!",
    history_id,
  };
  Ok(ApiSuccessResponse::created(resp))
}

/// Returns every history entry for a user, most recent first.
///
/// A user with no entries, an unknown user, and a non-numeric id all
/// produce an empty list.
#[utoipa::path(
  get,
  path="/api/history/{user_id}",
  tag="history",
  params(
    ("user_id" = String, Path, description = "User id returned by signup or login"),
  ),
  responses(
    (status = 200, description = "History entries, newest first", body = Vec<HistoryEntryResponse>),
    (status = 500, description = "Storage failure"),
  ),
)]
#[get("/history/<user_id>")]
pub async fn list_history(
  user_id: &str,
  db: &State<Db>,
) -> Result<ApiSuccessResponse<Vec<HistoryEntryResponse>>, ApiError> {
  let Ok(owner_id) = user_id.parse::<i64>() else {
    return Ok(ApiSuccessResponse::new(Vec::new()));
  };
  let entries = load_history(owner_id, db).await.or_internal(messages::HISTORY_NOT_LOADED)?;
  let entries = entries.into_iter().map(HistoryEntryResponse::from).collect();
  Ok(ApiSuccessResponse::new(entries))
}

/// Rows saved within the same second share a timestamp, so the id
/// breaks ties.
pub async fn load_history(owner_id: i64, db: &Db) -> diesel::QueryResult<Vec<models::PlayingHistoryEntry>> {
  use schema::playing_history::dsl::*;

  playing_history
    .filter(user_id.eq(owner_id))
    .order((timestamp.desc(), id.desc()))
    .select(models::PlayingHistoryEntry::as_select())
    .load::<models::PlayingHistoryEntry>(&mut *db.connection().await)
    .await
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(json: &str) -> Result<models::NewPlayingHistoryEntry, ApiError> {
    serde_json::from_str::<SaveHistoryParams>(json).unwrap().require()
  }

  #[test]
  fn zero_score_is_present() {
    let entry = parse(r#"{"userId": 3, "gameType": "snake", "score": 0}"#).unwrap();
    assert_eq!(entry.user_id, 3);
    assert_eq!(entry.game_type, "snake");
    assert_eq!(entry.score, Some(0));
  }

  #[test]
  fn score_may_exceed_32_bits() {
    let entry = parse(r#"{"userId": 3, "gameType": "snake", "score": 3000000000}"#).unwrap();
    assert_eq!(entry.score, Some(3_000_000_000));
  }

  #[test]
  fn each_field_is_required() {
    let missing = ApiError::validation(messages::MISSING_HISTORY_DATA);
    assert_eq!(parse(r#"{"gameType": "snake", "score": 1}"#).unwrap_err(), missing);
    assert_eq!(parse(r#"{"userId": 3, "score": 1}"#).unwrap_err(), missing);
    assert_eq!(parse(r#"{"userId": 3, "gameType": "snake"}"#).unwrap_err(), missing);
    assert_eq!(parse(r#"{"userId": 3, "gameType": "snake", "score": null}"#).unwrap_err(), missing);
  }

  #[test]
  fn zero_user_id_and_empty_game_type_are_missing() {
    let missing = ApiError::validation(messages::MISSING_HISTORY_DATA);
    assert_eq!(parse(r#"{"userId": 0, "gameType": "snake", "score": 1}"#).unwrap_err(), missing);
    assert_eq!(parse(r#"{"userId": 3, "gameType": "", "score": 1}"#).unwrap_err(), missing);
  }

  #[test]
  fn entry_serializes_in_row_shape() {
    let timestamp = chrono::NaiveDate::from_ymd_opt(2025, 2, 1)
      .unwrap()
      .and_hms_opt(5, 33, 10)
      .unwrap();
    let entry = HistoryEntryResponse {
      id: 9,
      user_id: 3,
      game_type: String::from("snake"),
      score: Some(0),
      timestamp,
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["user_id"], 3);
    assert_eq!(json["game_type"], "snake");
    assert_eq!(json["score"], 0);
    assert_eq!(json["timestamp"], "2025-02-01 05:33:10");
  }
}
