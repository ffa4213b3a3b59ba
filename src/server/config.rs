
//! Server configuration, layered the same way Rocket layers its own.

use super::password;

use rocket::figment::{Figment, Profile};
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_PATH: &str = "database.db";
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Application settings read from the same figment as Rocket's
/// [`Config`](rocket::Config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// SQLite database file. `:memory:` gives a throwaway database.
  pub database_path: String,
  /// Directory served for every path outside `/api`.
  pub static_dir: PathBuf,
  /// bcrypt work factor for newly created accounts.
  pub bcrypt_cost: u32,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_path: String::from(DEFAULT_DATABASE_PATH),
      static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
      bcrypt_cost: password::DEFAULT_COST,
    }
  }
}

/// Rocket's default figment, with our own defaults underneath it.
///
/// Precedence, lowest first: built-in defaults, `Rocket.toml` (or the
/// file named by `ROCKET_CONFIG`), then `ROCKET_*` environment
/// variables.
pub fn figment() -> Figment {
  Figment::from(rocket::Config::default())
    .merge(Serialized::defaults(AppConfig::default()))
    .merge(("port", DEFAULT_PORT))
    .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
    .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
    .select(Profile::from_env_or("ROCKET_PROFILE", rocket::Config::DEFAULT_PROFILE))
}
