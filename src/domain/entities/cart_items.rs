use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::cart_items;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = cart_items)]
pub struct CartItemEntity {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cart_items)]
pub struct InsertCartItemEntity {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}
