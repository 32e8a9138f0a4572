use diesel::prelude::*;

use crate::domain::entities::orders::OrderEntity;
use crate::infrastructure::postgres::schema::order_items;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations)]
#[diesel(belongs_to(OrderEntity, foreign_key = order_id))]
#[diesel(table_name = order_items)]
pub struct OrderItemEntity {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_items)]
pub struct InsertOrderItemEntity {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price: i64,
}
