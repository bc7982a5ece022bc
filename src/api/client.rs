//! reqwest-backed client for the storefront API.
//!
//! Attaches the active bearer token to every request, translates non-2xx
//! responses into [`ApiError::Rejected`] with the server's message, and
//! keeps transport failures distinguishable as [`ApiError::Network`].

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{rejection_message, ApiError};
use super::token::TokenStore;
use super::types::{
    parse_product_list, ApprovalStatus, AuthResponse, CartResponse, DashboardStats, ListResponse,
    LoginRequest, MessageResponse, Notification, Order, OrderStatus, PaymentStatus, Product,
    ProductFilter, ProductPayload, RegisterRequest, RequestOrder, User,
};
use super::Gateway;

/// Timeout for any single request. A request that exceeds it surfaces as a
/// transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
    store: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            http,
            token: RwLock::new(None),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match &*self.token.read() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "API request rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status.as_u16(), &body),
            });
        }

        response.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path))).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path))).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.put(self.url(path))).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.delete(self.url(path))).await
    }

    // Products

    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = &filter.category {
            query.push(("category", category.clone()));
        }
        if let Some(min) = filter.min_price {
            query.push(("min_price", min.to_string()));
        }
        if let Some(max) = filter.max_price {
            query.push(("max_price", max.to_string()));
        }

        let request = self.http.get(self.url("/products")).query(&query);
        let value: serde_json::Value = self.execute(request).await?;
        parse_product_list(value)
    }

    pub async fn product(&self, id: u64) -> Result<Product, ApiError> {
        self.get(&format!("/products/{}", id)).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        self.post("/products", payload).await
    }

    pub async fn update_product(
        &self,
        id: u64,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/products/{}", id), payload).await
    }

    pub async fn delete_product(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/products/{}", id)).await
    }

    pub async fn low_stock_products(&self) -> Result<Vec<Product>, ApiError> {
        let response: ListResponse<Product> = self.get("/products/low-stock").await?;
        Ok(response.data)
    }

    // Cart

    pub async fn cart(&self) -> Result<CartResponse, ApiError> {
        self.get("/cart").await
    }

    pub async fn add_to_cart(
        &self,
        product_id: u64,
        quantity: u32,
    ) -> Result<MessageResponse, ApiError> {
        self.post(
            "/cart/add",
            &json!({ "product_id": product_id, "quantity": quantity }),
        )
        .await
    }

    pub async fn update_cart_item(
        &self,
        id: u64,
        quantity: u32,
    ) -> Result<MessageResponse, ApiError> {
        self.put(&format!("/cart/items/{}", id), &json!({ "quantity": quantity }))
            .await
    }

    pub async fn remove_cart_item(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/cart/items/{}", id)).await
    }

    pub async fn clear_cart(&self) -> Result<MessageResponse, ApiError> {
        self.delete("/cart/clear").await
    }

    // Orders

    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let response: ListResponse<Order> = self.get("/orders").await?;
        Ok(response.data)
    }

    /// Place an order for the current cart. The shipping address is checked
    /// locally so an empty one never reaches the network.
    pub async fn create_order(
        &self,
        payment_method: &str,
        shipping_address: &str,
    ) -> Result<Order, ApiError> {
        if shipping_address.trim().is_empty() {
            return Err(ApiError::Validation(
                "Shipping address is required".to_string(),
            ));
        }

        self.post(
            "/orders",
            &json!({
                "payment_method": payment_method,
                "shipping_address": shipping_address,
            }),
        )
        .await
    }

    pub async fn order(&self, id: u64) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{}", id)).await
    }

    pub async fn update_order_status(
        &self,
        id: u64,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.put(&format!("/orders/{}/status", id), &json!({ "status": status }))
            .await
    }

    pub async fn update_order_payment(
        &self,
        id: u64,
        payment_status: PaymentStatus,
    ) -> Result<Order, ApiError> {
        self.put(
            &format!("/orders/{}/payment", id),
            &json!({ "payment_status": payment_status }),
        )
        .await
    }

    pub async fn payment_methods(&self) -> Result<Vec<String>, ApiError> {
        let response: PaymentMethodsResponse = self.get("/payment-methods").await?;
        Ok(response.methods)
    }

    // Notifications

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let response: ListResponse<Notification> = self.get("/notifications").await?;
        Ok(response.data)
    }

    pub async fn unread_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let response: ListResponse<Notification> = self.get("/notifications/unread").await?;
        Ok(response.data)
    }

    pub async fn mark_notification_read(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.put_empty(&format!("/notifications/{}/read", id)).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<MessageResponse, ApiError> {
        self.put_empty("/notifications/read-all").await
    }

    pub async fn delete_notification(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/notifications/{}", id)).await
    }

    // Dashboards

    pub async fn dashboard(&self, role_segment: &str) -> Result<DashboardStats, ApiError> {
        self.get(&format!("/dashboard/{}", role_segment)).await
    }

    // Request orders (the operations beyond the Gateway trait)

    pub async fn create_request_order(
        &self,
        product_id: u64,
        quantity: u32,
    ) -> Result<RequestOrder, ApiError> {
        self.post(
            "/request-orders",
            &json!({ "product_id": product_id, "quantity": quantity }),
        )
        .await
    }

    pub async fn request_order(&self, id: u64) -> Result<RequestOrder, ApiError> {
        self.get(&format!("/request-orders/{}", id)).await
    }
}

#[derive(Debug, Deserialize)]
struct PaymentMethodsResponse {
    #[serde(default)]
    methods: Vec<String>,
}

#[async_trait::async_trait]
impl Gateway for ApiClient {
    fn stored_token(&self) -> Option<String> {
        self.store.load()
    }

    fn set_token(&self, token: &str) {
        *self.token.write() = Some(token.to_string());
        if let Err(e) = self.store.save(token) {
            warn!(error = %e, "Failed to persist auth token");
        }
    }

    fn clear_token(&self) {
        *self.token.write() = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to remove persisted auth token");
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("/register", request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let _: MessageResponse = self.post_empty("/logout").await?;
        Ok(())
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        self.get("/user").await
    }

    async fn request_orders(&self) -> Result<Vec<RequestOrder>, ApiError> {
        let response: ListResponse<RequestOrder> = self.get("/request-orders").await?;
        Ok(response.data)
    }

    async fn admin_approval(
        &self,
        id: u64,
        approval: ApprovalStatus,
    ) -> Result<RequestOrder, ApiError> {
        self.put(
            &format!("/request-orders/{}/admin-approval", id),
            &json!({ "approval": approval }),
        )
        .await
    }

    async fn warehouse_approval(
        &self,
        id: u64,
        approval: ApprovalStatus,
    ) -> Result<RequestOrder, ApiError> {
        self.put(
            &format!("/request-orders/{}/warehouse-approval", id),
            &json!({ "approval": approval }),
        )
        .await
    }
}
