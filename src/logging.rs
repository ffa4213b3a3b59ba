
//! Log output for the server binary. Rocket finds this logger already
//! installed and routes its own messages through it.

use log::LevelFilter;

use std::time::SystemTime;

pub fn init_logging(level: LevelFilter) -> Result<(), fern::InitError> {
  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "[{} {} {}] {}",
        humantime::format_rfc3339_seconds(SystemTime::now()),
        record.level(),
        record.target(),
        message,
      ))
    })
    .level(level)
    .level_for("hyper", LevelFilter::Warn)
    .chain(std::io::stdout())
    .apply()?;
  Ok(())
}
