
//! Command line argument parser.

use clap::Parser;
use log::LevelFilter;
use rocket::figment::Figment;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
  /// If supplied, create the database tables and exit instead of
  /// running the Rocket server.
  #[arg(long)]
  pub bootstrap_only: bool,
  /// SQLite database file. Overrides `database_path` from
  /// Rocket.toml and the environment.
  #[arg(long)]
  pub database: Option<String>,
  /// Most verbose log level to print.
  #[arg(long, default_value_t = LevelFilter::Info)]
  pub log_level: LevelFilter,
}

impl CliArgs {
  /// Layers command line overrides on top of `figment`.
  pub fn apply(&self, figment: Figment) -> Figment {
    match &self.database {
      Some(database) => figment.merge(("database_path", database)),
      None => figment,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::server::config::AppConfig;

  use rocket::figment::providers::Serialized;

  #[test]
  fn defaults() {
    let args = CliArgs::try_parse_from(["playhistory"]).unwrap();
    assert!(!args.bootstrap_only);
    assert_eq!(args.database, None);
    assert_eq!(args.log_level, LevelFilter::Info);
  }

  #[test]
  fn database_flag_overrides_config() {
    let args = CliArgs::try_parse_from(["playhistory", "--bootstrap-only", "--database", "scores.db", "--log-level", "debug"]).unwrap();
    assert!(args.bootstrap_only);
    assert_eq!(args.log_level, LevelFilter::Debug);

    let figment = args.apply(Figment::from(Serialized::defaults(AppConfig::default())));
    let config: AppConfig = figment.extract().unwrap();
    assert_eq!(config.database_path, "scores.db");
  }
}
