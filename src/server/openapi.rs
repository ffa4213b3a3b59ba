
use super::{accounts, history};

use rocket::get;
use rocket::serde::json::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
  paths(
    accounts::signup, accounts::login,
    history::save_history, history::list_history,
  ),
  tags(
    (name = "account", description = "User registration and login"),
    (name = "history", description = "Per-user playing history"),
  ),
  components(),
)]
pub struct ApiDoc;

/// Serves the OpenAPI description of this API.
#[get("/openapi.json")]
pub fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}
