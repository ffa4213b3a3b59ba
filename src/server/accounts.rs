
//! Account endpoints: signup and login.
//!
//! No session or token is issued. Clients keep the returned `userId`
//! and pass it to the history endpoints.

use crate::db::{schema, models};
use super::db::Db;
use super::error::{messages, ApiError, ApiErrorExt, ApiSuccessResponse};
use super::password::PasswordHasher;
use super::requests::{parse_body, required_str, JsonBody};

use rocket::{Route, State, post, routes};
use serde::{Deserialize, Serialize};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use utoipa::ToSchema;

pub fn account_routes() -> Vec<Route> {
  routes![
    signup,
    login,
  ]
}

/// Request body shared by signup and login. Both fields are required
/// and must be non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CredentialsParams {
  #[schema(examples("alice"))]
  pub username: Option<String>,
  pub password: Option<String>,
}

#[derive(Debug, Clone)]
struct Credentials {
  username: String,
  password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
  #[schema(value_type = String)]
  pub message: &'static str,
  pub user_id: i64,
  pub username: String,
  /// Path of the user's profile picture, relative to the site root.
  #[schema(examples("/images/default-profile.png"))]
  pub profile_pic: String,
}

impl CredentialsParams {
  fn require(self) -> Result<Credentials, ApiError> {
    match (required_str(self.username), required_str(self.password)) {
      (Some(username), Some(password)) => Ok(Credentials { username, password }),
      _ => Err(ApiError::validation(messages::MISSING_CREDENTIALS)),
    }
  }
}

/// Registers a new user.
///
/// Usernames are unique. A taken username is detected by the
/// database's uniqueness constraint, so concurrent signups for the
/// same name cannot both succeed.
#[utoipa::path(
  post,
  path="/api/signup",
  tag="account",
  request_body = CredentialsParams,
  responses(
    (status = 201, description = "User registered", body = AccountResponse),
    (status = 400, description = "Username or password missing"),
    (status = 409, description = "Username already exists"),
    (status = 500, description = "Storage or hashing failure"),
  ),
)]
#[post("/signup", data = "<params>")]
pub async fn signup(
  params: JsonBody<'_, CredentialsParams>,
  hasher: &State<PasswordHasher>,
  db: &State<Db>,
) -> Result<ApiSuccessResponse<AccountResponse>, ApiError> {
  let credentials = parse_body(params, messages::MISSING_CREDENTIALS)?.require()?;
  let password_hash = hasher.hash(credentials.password).await.or_internal(messages::SIGNUP_FAILED)?;

  let new_user = models::NewUser {
    username: credentials.username,
    password_hash,
    profile_pic_url: Some(models::DEFAULT_PROFILE_PIC.to_owned()),
  };
  let user_id = diesel::insert_into(schema::users::table)
    .values(&new_user)
    .returning(schema::users::id)
    .get_result::<i64>(&mut *db.connection().await)
    .await
    .map_err(|err| ApiError::from_on_create(err, messages::USERNAME_TAKEN, messages::USER_NOT_CREATED))?;
  log::info!("Registered user {} with id {user_id}", new_user.username);

  let resp = AccountResponse {
    message: "User registered successfully!",
    user_id,
    username: new_user.username,
    profile_pic: models::DEFAULT_PROFILE_PIC.to_owned(),
  };
  Ok(ApiSuccessResponse::created(resp))
}

/// Checks a username and password.
///
/// An unknown username and a wrong password produce the same 401
/// response.
#[utoipa::path(
  post,
  path="/api/login",
  tag="account",
  request_body = CredentialsParams,
  responses(
    (status = 200, description = "Credentials accepted", body = AccountResponse),
    (status = 400, description = "Username or password missing"),
    (status = 401, description = "Invalid username or password"),
    (status = 500, description = "Storage failure"),
  ),
)]
#[post("/login", data = "<params>")]
pub async fn login(
  params: JsonBody<'_, CredentialsParams>,
  hasher: &State<PasswordHasher>,
  db: &State<Db>,
) -> Result<ApiSuccessResponse<AccountResponse>, ApiError> {
  let credentials = parse_body(params, messages::MISSING_CREDENTIALS)?.require()?;

  let user = schema::users::table
    .filter(schema::users::username.eq(&credentials.username))
    .select(models::User::as_select())
    .first::<models::User>(&mut *db.connection().await)
    .await
    .optional()
    .or_internal(messages::LOGIN_FAILED)?;
  let Some(user) = user else {
    return Err(ApiError::Auth);
  };

  let matches = hasher
    .verify(credentials.password, user.password_hash.clone())
    .await
    .or_internal(messages::LOGIN_FAILED)?;
  if !matches {
    return Err(ApiError::Auth);
  }

  let resp = AccountResponse {
    message: "Login successful!",
    user_id: user.id,
    profile_pic: user.profile_pic().to_owned(),
    username: user.username,
  };
  Ok(ApiSuccessResponse::new(resp))
}
