//! Admin authentication: password hashing and cookie sessions.

pub mod password;
pub mod session;

pub use session::{CookiePolicy, SESSION_COOKIE};
