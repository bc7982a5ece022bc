//! Wire types for the storefront API.
//!
//! The API is lenient in a couple of places the types have to absorb:
//! product prices arrive as either a JSON number or a decimal string, and
//! the product list endpoint has shipped three different envelope shapes
//! over time (`{"products": [...]}`, `{"data": [...]}`, or a bare array).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ApiError;

/// One approval field of a request order. Both the admin and the warehouse
/// field start at `Pending` and are set at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account profile as returned by `/user`, `/login` and `/register`.
///
/// Older deployments omit the `role` string and only send the legacy
/// numeric `role_id`; role resolution lives in [`crate::session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub email_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    /// Units currently in stock.
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub is_low_stock: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Prices arrive as `12.5` or `"12.50"` depending on the backend version.
fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceRepr {
        Number(f64),
        Text(String),
    }

    match PriceRepr::deserialize(deserializer)? {
        PriceRepr::Number(n) => Ok(n),
        PriceRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid price: {:?}", s))),
    }
}

/// Body for creating or updating a product; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub product: Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    #[serde(deserialize_with = "de_price")]
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub shipping_address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    pub product: Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An internal stock-replenishment request. The two approval fields are
/// independent; a request is ready for warehouse processing only once the
/// admin field is `approved` while the warehouse field is still `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOrder {
    pub id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub admin_approval: ApprovalStatus,
    pub warehouse_approval: ApprovalStatus,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_income: Option<f64>,
    #[serde(default)]
    pub low_stock_count: Option<u64>,
    #[serde(default)]
    pub todays_orders: Option<u64>,
    #[serde(default)]
    pub total_orders: Option<u64>,
    #[serde(default)]
    pub pending_orders: Option<u64>,
    #[serde(default)]
    pub popular_products: Option<Vec<Product>>,
    #[serde(default)]
    pub sales_data: Option<Vec<SalesPoint>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPoint {
    pub date: String,
    pub amount: f64,
}

// Request/response envelopes

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Normalize the product list envelope into a plain vector.
pub(crate) fn parse_product_list(value: serde_json::Value) -> Result<Vec<Product>, ApiError> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => {
            match map.remove("products").or_else(|| map.remove("data")) {
                Some(serde_json::Value::Array(items)) => items,
                _ => {
                    return Err(ApiError::Decode(
                        "unrecognized product list shape".to_string(),
                    ))
                }
            }
        }
        _ => {
            return Err(ApiError::Decode(
                "unrecognized product list shape".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json(id: u64, price: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Widget",
            "description": "A widget",
            "price": price,
            "quantity": 7,
        })
    }

    #[test]
    fn test_price_accepts_string_and_number() {
        let from_string: Product =
            serde_json::from_value(product_json(1, json!("19.99"))).unwrap();
        assert_eq!(from_string.price, 19.99);

        let from_number: Product = serde_json::from_value(product_json(2, json!(5))).unwrap();
        assert_eq!(from_number.price, 5.0);

        let bad = serde_json::from_value::<Product>(product_json(3, json!("not-a-price")));
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_product_list_shapes() {
        let wrapped = json!({ "products": [product_json(1, json!("1.00"))] });
        assert_eq!(parse_product_list(wrapped).unwrap().len(), 1);

        let data = json!({ "data": [product_json(1, json!(1.0)), product_json(2, json!(2.0))] });
        assert_eq!(parse_product_list(data).unwrap().len(), 2);

        let bare = json!([product_json(9, json!(3.5))]);
        assert_eq!(parse_product_list(bare).unwrap()[0].id, 9);

        let unknown = json!({ "stuff": [] });
        assert!(matches!(
            parse_product_list(unknown),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_approval_status_serde() {
        let order: RequestOrder = serde_json::from_value(json!({
            "id": 42,
            "product_id": 7,
            "quantity": 5,
            "admin_approval": "approved",
            "warehouse_approval": "pending",
        }))
        .unwrap();

        assert_eq!(order.admin_approval, ApprovalStatus::Approved);
        assert!(order.warehouse_approval.is_pending());
        assert!(order.product.is_none());
    }

    #[test]
    fn test_register_request_omits_missing_role() {
        let body = serde_json::to_value(RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            password_confirmation: "secret".to_string(),
            role: None,
        })
        .unwrap();
        assert!(body.get("role").is_none());
    }
}
