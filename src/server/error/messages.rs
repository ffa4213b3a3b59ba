
//! Common error messages, as constants to be reused by endpoints.

pub const NOT_FOUND: &str = "Not Found";
pub const BAD_REQUEST: &str = "Bad Request";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

pub const MISSING_CREDENTIALS: &str = "Username and password are required.";
pub const MISSING_HISTORY_DATA: &str = "Missing playing history data (userId, gameType, score).";

/// Returned for both an unknown username and a wrong password, so
/// that callers cannot tell which check failed.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const USERNAME_TAKEN: &str = "Username already exists.";

pub const SIGNUP_FAILED: &str = "Internal server error during signup.";
pub const USER_NOT_CREATED: &str = "Error creating user.";
pub const LOGIN_FAILED: &str = "Internal server error.";
pub const HISTORY_NOT_SAVED: &str = "Error saving playing history.";
pub const HISTORY_NOT_LOADED: &str = "Error retrieving playing history.";
