pub mod api;
pub mod cli;
pub mod config;
pub mod guard;
pub mod session;
pub mod workflow;

pub use api::{ApiClient, ApiError, Gateway};
pub use session::{Role, SessionStore};
