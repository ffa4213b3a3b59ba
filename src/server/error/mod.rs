
pub mod messages;

use rocket::{Request, Catcher, catch, catchers};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::Serialize;
use thiserror::Error;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use std::fmt::Display;

/// Rocket responder for a successful request. The body is serialized
/// as-is, so endpoints control the exact JSON shape.
#[derive(Debug, Clone)]
pub struct ApiSuccessResponse<T> {
  status: Status,
  body: T,
}

/// Everything that can go wrong while serving an API request.
///
/// The HTTP status for each kind is decided in exactly one place,
/// [`ApiError::status`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
  /// A required field was absent or empty, or the body was not JSON.
  #[error("{0}")]
  Validation(String),
  /// The row would violate a uniqueness constraint.
  #[error("{0}")]
  Conflict(String),
  /// Unknown user or wrong password. Deliberately carries no detail.
  #[error("{}", messages::INVALID_CREDENTIALS)]
  Auth,
  #[error("{}", messages::NOT_FOUND)]
  NotFound,
  /// Storage or hashing failure. The message is safe to show to the
  /// caller; the cause is only logged.
  #[error("{0}")]
  Internal(String),
}

#[derive(Debug, Clone, Serialize)]
struct ErrorPayload {
  message: String,
}

impl<T: Serialize> ApiSuccessResponse<T> {
  /// A 200 OK.
  pub fn new(body: T) -> ApiSuccessResponse<T> {
    ApiSuccessResponse {
      status: Status::Ok,
      body,
    }
  }

  /// A 201 Created.
  pub fn created(body: T) -> ApiSuccessResponse<T> {
    ApiSuccessResponse {
      status: Status::Created,
      body,
    }
  }
}

impl<'r, T: Serialize> Responder<'r, 'static> for ApiSuccessResponse<T> {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    (self.status, Json(self.body)).respond_to(req)
  }
}

impl ApiError {
  pub fn validation(message: impl Into<String>) -> ApiError {
    ApiError::Validation(message.into())
  }

  pub fn conflict(message: impl Into<String>) -> ApiError {
    ApiError::Conflict(message.into())
  }

  pub fn internal(message: impl Into<String>) -> ApiError {
    ApiError::Internal(message.into())
  }

  pub fn status(&self) -> Status {
    match self {
      ApiError::Validation(_) => Status::BadRequest,
      ApiError::Conflict(_) => Status::Conflict,
      ApiError::Auth => Status::Unauthorized,
      ApiError::NotFound => Status::NotFound,
      ApiError::Internal(_) => Status::InternalServerError,
    }
  }

  /// Converts the error from a failed `INSERT`. A uniqueness
  /// violation becomes a 409 with `conflict_message`; anything else is
  /// logged and reported as a 500 with `internal_message`.
  pub fn from_on_create(err: DieselError, conflict_message: &str, internal_message: &str) -> ApiError {
    match err {
      DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
        ApiError::conflict(conflict_message),
      err => {
        log::error!("{internal_message} ({err})");
        ApiError::internal(internal_message)
      }
    }
  }
}

impl<'r> Responder<'r, 'static> for ApiError {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    let status = self.status();
    let payload = ErrorPayload { message: self.to_string() };
    (status, Json(payload)).respond_to(req)
  }
}

/// Extension trait adding [`ApiError`] converters to `Result<T, E>`.
pub trait ApiErrorExt {
  type Output;

  /// Logs the error and replaces it with a 500 carrying `message`.
  fn or_internal(self, message: &str) -> Result<Self::Output, ApiError>;
}

impl<T, E: Display> ApiErrorExt for Result<T, E> {
  type Output = T;

  fn or_internal(self, message: &str) -> Result<Self::Output, ApiError> {
    self.map_err(|err| {
      log::error!("{message} ({err})");
      ApiError::internal(message)
    })
  }
}

pub fn catchers() -> Vec<Catcher> {
  catchers![
    bad_request_catcher,
    not_found_catcher,
    unprocessable_entity_catcher,
    internal_server_error_catcher,
  ]
}

#[catch(400)]
pub fn bad_request_catcher(_: &Request) -> ApiError {
  ApiError::validation(messages::BAD_REQUEST)
}

#[catch(404)]
pub fn not_found_catcher(_: &Request) -> ApiError {
  ApiError::NotFound
}

#[catch(422)]
pub fn unprocessable_entity_catcher(_: &Request) -> ApiError {
  ApiError::validation(messages::BAD_REQUEST)
}

#[catch(500)]
pub fn internal_server_error_catcher(_: &Request) -> ApiError {
  ApiError::internal(messages::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
    DieselError::DatabaseError(kind, Box::new(message.to_owned()))
  }

  #[test]
  fn each_kind_maps_to_one_status() {
    assert_eq!(ApiError::validation("x").status(), Status::BadRequest);
    assert_eq!(ApiError::conflict("x").status(), Status::Conflict);
    assert_eq!(ApiError::Auth.status(), Status::Unauthorized);
    assert_eq!(ApiError::NotFound.status(), Status::NotFound);
    assert_eq!(ApiError::internal("x").status(), Status::InternalServerError);
  }

  #[test]
  fn auth_error_has_generic_message() {
    assert_eq!(ApiError::Auth.to_string(), messages::INVALID_CREDENTIALS);
  }

  #[test]
  fn unique_violation_on_create_is_conflict() {
    let err = database_error(DatabaseErrorKind::UniqueViolation, "UNIQUE constraint failed: users.username");
    let api_error = ApiError::from_on_create(err, messages::USERNAME_TAKEN, messages::USER_NOT_CREATED);
    assert_eq!(api_error, ApiError::conflict(messages::USERNAME_TAKEN));
  }

  #[test]
  fn other_failures_on_create_hide_the_cause() {
    let err = database_error(DatabaseErrorKind::ForeignKeyViolation, "FOREIGN KEY constraint failed");
    let api_error = ApiError::from_on_create(err, messages::USERNAME_TAKEN, messages::USER_NOT_CREATED);
    assert_eq!(api_error, ApiError::internal(messages::USER_NOT_CREATED));

    let api_error = ApiError::from_on_create(DieselError::NotFound, messages::USERNAME_TAKEN, messages::HISTORY_NOT_SAVED);
    assert_eq!(api_error.to_string(), messages::HISTORY_NOT_SAVED);
  }

  #[test]
  fn or_internal_replaces_message() {
    let result: Result<(), String> = Err(String::from("disk I/O error"));
    let api_error = result.or_internal(messages::HISTORY_NOT_LOADED).unwrap_err();
    assert_eq!(api_error, ApiError::internal(messages::HISTORY_NOT_LOADED));
  }

  #[test]
  fn success_response_statuses() {
    assert_eq!(ApiSuccessResponse::new(1).status, Status::Ok);
    assert_eq!(ApiSuccessResponse::created(1).status, Status::Created);
    assert_eq!(ApiSuccessResponse::created(7).body, 7);
  }
}
