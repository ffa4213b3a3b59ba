
pub mod accounts;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod openapi;
pub mod password;
pub mod requests;

use config::AppConfig;
use db::Db;
use password::PasswordHasher;

use rocket::{Route, Rocket, Build, routes};
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::fs::{FileServer, Options};

pub async fn run_server(figment: Figment) -> anyhow::Result<()> {
  build_rocket(figment)?
    .launch()
    .await
    .map_err(|err| anyhow::anyhow!("{err}"))?;
  Ok(())
}

/// Assembles the server from `figment`, which should usually be
/// [`config::figment`].
pub fn build_rocket(figment: Figment) -> Result<Rocket<Build>, rocket::figment::Error> {
  let app_config: AppConfig = figment.extract()?;
  let static_files = FileServer::new(&app_config.static_dir, Options::Index | Options::Missing);

  Ok(rocket::custom(figment)
    .mount("/api", api_routes())
    .mount("/", static_files)
    .register("/api", error::catchers())
    .manage(PasswordHasher::new(app_config.bcrypt_cost))
    .manage(app_config)
    .attach(Db::fairing())
    .attach(AdHoc::on_liftoff("Startup Banner", |rocket| Box::pin(async move {
      let config = rocket.config();
      log::info!("Server running at http://{}:{}", config.address, config.port);
    }))))
}

pub fn api_routes() -> Vec<Route> {
  let mut routes = Vec::new();
  routes.extend(accounts::account_routes());
  routes.extend(history::history_routes());
  routes.extend(routes![openapi::openapi_json]);
  routes
}
