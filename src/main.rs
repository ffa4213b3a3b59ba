
use playhistory::args::CliArgs;
use playhistory::logging::init_logging;
use playhistory::server::config::{self, AppConfig};
use playhistory::server::run_server;
use playhistory::setup::run_bootstrap;

use clap::Parser;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
  let args = CliArgs::parse();
  init_logging(args.log_level)?;

  let figment = args.apply(config::figment());
  if args.bootstrap_only {
    let app_config: AppConfig = figment.extract()?;
    return run_bootstrap(&app_config.database_path).await;
  }
  run_server(figment).await
}
