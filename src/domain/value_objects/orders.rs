use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a transactional order write is refused inside the repository.
/// Carried through `anyhow::Error` and downcast by the usecases.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderWriteDenied {
    #[error("order not found")]
    OrderNotFound,
    #[error("product {0} not found")]
    ProductNotFound(i64),
    #[error("insufficient stock for product {0}")]
    InsufficientStock(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemModel {
    pub product_id: i64,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderModel {
    pub user_id: i64,
    pub shipping_address_id: i64,
    pub items: Vec<OrderItemModel>,
    pub total_amount: i64,
    pub payment_method: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: i64,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderModel {
    pub items: Vec<OrderItemModel>,
    pub total_amount: i64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<i64>,
    pub note: Option<String>,
    pub shipping_address_id: Option<i64>,
    pub user_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusModel {
    pub status: String,
}

/// Fully validated replacement payload handed to the repository; applied as
/// one transaction (scalars, address upsert, delete-then-reinsert items).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderOverwrite {
    pub total_amount: i64,
    pub discount_type: String,
    pub discount_value: i64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub note: Option<String>,
    pub shipping_address_id: Option<i64>,
    pub shipping: Option<ShippingContactUpdate>,
    pub items: Vec<OrderItemDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingContactUpdate {
    pub user_id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemDraft {
    pub product_id: i64,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLineDto {
    pub product_id: i64,
    pub quantity: i32,
    pub price: i64,
    pub title: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShippingContactDto {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailDto {
    pub id: i64,
    pub user_id: i64,
    pub shipping_address_id: Option<i64>,
    pub total_amount: i64,
    pub discount_type: String,
    pub discount_value: i64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub transaction_id: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub shipping: Option<ShippingContactDto>,
    pub items: Vec<OrderLineDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderStatsDto {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub total_customers: i64,
    pub completed_orders: i64,
}
