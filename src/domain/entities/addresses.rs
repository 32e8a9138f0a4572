use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::infrastructure::postgres::schema::addresses;

#[derive(Debug, Clone, Serialize, Identifiable, Selectable, Queryable)]
#[diesel(table_name = addresses)]
pub struct AddressEntity {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub struct InsertAddressEntity {
    pub user_id: i64,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub is_default: bool,
}
