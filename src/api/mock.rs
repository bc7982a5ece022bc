//! Scripted [`Gateway`] used by session, guard and workflow tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::error::ApiError;
use super::types::{
    ApprovalStatus, AuthResponse, LoginRequest, Product, RegisterRequest, RequestOrder, User,
};
use super::Gateway;

/// What `get_user` should do, attempt after attempt.
#[derive(Clone)]
pub(crate) enum ProfileScript {
    NetworkError,
    Rejected,
    User(User),
}

#[derive(Default)]
pub(crate) struct MockGateway {
    pub stored: Mutex<Option<String>>,
    pub active: Mutex<Option<String>>,
    pub profile: Mutex<Option<ProfileScript>>,
    pub get_user_calls: AtomicUsize,
    /// When set, `get_user` samples this flag on entry and records the value
    /// in [`Self::loading_seen`], one entry per attempt.
    pub loading_probe: Mutex<Option<Arc<AtomicBool>>>,
    pub loading_seen: Mutex<Vec<bool>>,
    pub login_response: Mutex<Option<Result<AuthResponse, ApiError>>>,
    pub register_response: Mutex<Option<Result<AuthResponse, ApiError>>>,
    pub logout_error: Mutex<Option<ApiError>>,
    pub logout_calls: AtomicUsize,
    pub orders: Mutex<Vec<RequestOrder>>,
    pub admin_error: Mutex<Option<ApiError>>,
    pub warehouse_error: Mutex<Option<ApiError>>,
    pub admin_calls: AtomicUsize,
    pub warehouse_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stored_token(self, token: &str) -> Self {
        *self.stored.lock() = Some(token.to_string());
        self
    }

    pub fn with_profile(self, script: ProfileScript) -> Self {
        *self.profile.lock() = Some(script);
        self
    }

    pub fn with_orders(self, orders: Vec<RequestOrder>) -> Self {
        *self.orders.lock() = orders;
        self
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn stored_token(&self) -> Option<String> {
        self.stored.lock().clone()
    }

    fn set_token(&self, token: &str) {
        *self.active.lock() = Some(token.to_string());
        *self.stored.lock() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.active.lock() = None;
        *self.stored.lock() = None;
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.login_response
            .lock()
            .take()
            .unwrap_or_else(|| Err(rejected(401, "Invalid credentials")))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.register_response
            .lock()
            .take()
            .unwrap_or_else(|| Err(rejected(422, "Registration failed")))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        match self.logout_error.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(flag) = self.loading_probe.lock().as_ref() {
            self.loading_seen.lock().push(flag.load(Ordering::SeqCst));
        }
        match self.profile.lock().clone() {
            Some(ProfileScript::User(user)) => Ok(user),
            Some(ProfileScript::Rejected) => Err(rejected(401, "Unauthenticated.")),
            Some(ProfileScript::NetworkError) | None => Err(network()),
        }
    }

    async fn request_orders(&self) -> Result<Vec<RequestOrder>, ApiError> {
        Ok(self.orders.lock().clone())
    }

    async fn admin_approval(
        &self,
        id: u64,
        approval: ApprovalStatus,
    ) -> Result<RequestOrder, ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.admin_error.lock().take() {
            return Err(e);
        }
        let mut orders = self.orders.lock();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| rejected(404, "Request order not found"))?;
        order.admin_approval = approval;
        Ok(order.clone())
    }

    async fn warehouse_approval(
        &self,
        id: u64,
        approval: ApprovalStatus,
    ) -> Result<RequestOrder, ApiError> {
        self.warehouse_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.warehouse_error.lock().take() {
            return Err(e);
        }
        let mut orders = self.orders.lock();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| rejected(404, "Request order not found"))?;
        order.warehouse_approval = approval;
        Ok(order.clone())
    }
}

pub(crate) fn network() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

pub(crate) fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

// Fixtures

pub(crate) fn test_user(role: Option<&str>, role_id: Option<i64>) -> User {
    User {
        id: 1,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role: role.map(str::to_string),
        role_id,
        email_verified_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn test_product(id: u64, stock: u32) -> Product {
    Product {
        id,
        name: format!("Product {}", id),
        description: String::new(),
        price: 9.99,
        quantity: stock,
        low_stock_threshold: Some(5),
        image: None,
        status: Some(true),
        categories: Vec::new(),
        is_low_stock: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn test_request_order(
    id: u64,
    admin: ApprovalStatus,
    warehouse: ApprovalStatus,
    quantity: u32,
    stock: u32,
) -> RequestOrder {
    RequestOrder {
        id,
        product_id: id * 10,
        quantity,
        admin_approval: admin,
        warehouse_approval: warehouse,
        product: Some(test_product(id * 10, stock)),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn test_auth_response(user: User) -> AuthResponse {
    AuthResponse {
        user,
        token: "tok-fresh".to_string(),
    }
}
