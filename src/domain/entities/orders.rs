use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::orders;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
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
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
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
}
