
//! Account and playing-history backend for browser games.
//!
//! Four JSON endpoints under `/api` (signup, login, save history,
//! list history) on top of a single SQLite database, plus static
//! frontend assets for everything else.

pub mod args;
pub mod db;
pub mod logging;
pub mod server;
pub mod setup;
