pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod templates;
pub mod types;

pub use error::RosterError;
pub use router::{RosterState, roster_router};
