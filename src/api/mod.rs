//! Client side of the storefront REST API.
//!
//! [`ApiClient`] is the concrete reqwest-backed implementation. The parts of
//! the contract the session store and the approval workflow depend on are
//! split out into the [`Gateway`] trait so those layers can be exercised
//! against a scripted gateway in tests.

pub mod client;
pub mod error;
pub mod token;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use error::ApiError;
pub use token::TokenStore;

use async_trait::async_trait;
use types::{ApprovalStatus, AuthResponse, LoginRequest, RegisterRequest, RequestOrder, User};

/// The slice of the API consumed by the session store and the request-order
/// workflow. `set_token`/`clear_token` also persist/remove the token from
/// durable storage as a side effect.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Token left behind by a previous session, if any.
    fn stored_token(&self) -> Option<String>;

    /// Attach a bearer token to all subsequent requests and persist it.
    fn set_token(&self, token: &str);

    /// Drop the active token and remove it from durable storage.
    fn clear_token(&self);

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// Fetch the profile of the currently authenticated user.
    async fn get_user(&self) -> Result<User, ApiError>;

    async fn request_orders(&self) -> Result<Vec<RequestOrder>, ApiError>;

    /// Record the admin decision on a request order.
    async fn admin_approval(
        &self,
        id: u64,
        approval: ApprovalStatus,
    ) -> Result<RequestOrder, ApiError>;

    /// Record the warehouse decision on a request order.
    async fn warehouse_approval(
        &self,
        id: u64,
        approval: ApprovalStatus,
    ) -> Result<RequestOrder, ApiError>;
}
