
//! Salted password hashing.

use rocket::tokio::task::{self, JoinError};
use thiserror::Error;

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// Smallest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Hashes and verifies passwords with bcrypt.
///
/// Both operations are deliberately slow, so they run on Rocket's
/// blocking thread pool rather than on the async workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
  cost: u32,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PasswordError {
  #[error("{0}")]
  BcryptError(#[from] bcrypt::BcryptError),
  #[error("{0}")]
  JoinError(#[from] JoinError),
}

impl PasswordHasher {
  pub fn new(cost: u32) -> Self {
    Self { cost }
  }

  pub fn cost(&self) -> u32 {
    self.cost
  }

  /// Produces a salted hash of `password`.
  pub async fn hash(&self, password: String) -> Result<String, PasswordError> {
    let cost = self.cost;
    let hash = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
  }

  /// Checks `password` against a stored hash using bcrypt's own
  /// comparison. Fails only if `hash` is not a bcrypt hash at all.
  pub async fn verify(&self, password: String, hash: String) -> Result<bool, PasswordError> {
    let matches = task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
  }
}

impl Default for PasswordHasher {
  fn default() -> Self {
    Self::new(DEFAULT_COST)
  }
}
