
//! Helpers for turning raw JSON request bodies into validated input.

use super::error::ApiError;

use rocket::serde::json::{self, Json};

/// A JSON data guard that never fails the request on its own, so the
/// endpoint can report a malformed body with its own message.
pub type JsonBody<'r, T> = Result<Json<T>, json::Error<'r>>;

/// Unwraps a [`JsonBody`], reporting a body that could not be parsed
/// as a validation error with `message`.
pub fn parse_body<T>(body: JsonBody<'_, T>, message: &str) -> Result<T, ApiError> {
  match body {
    Ok(Json(body)) => Ok(body),
    Err(err) => {
      log::debug!("Rejecting request body: {err:?}");
      Err(ApiError::validation(message))
    }
  }
}

/// An empty string counts as a missing field.
pub fn required_str(field: Option<String>) -> Option<String> {
  field.filter(|value| !value.is_empty())
}
