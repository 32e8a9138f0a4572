use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::payment_records;

/// One row per order tracking whether the external payment has been
/// confirmed. Written in the same transaction as the order itself.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(order_id))]
#[diesel(table_name = payment_records)]
pub struct PaymentRecordEntity {
    pub order_id: i64,
    pub amount: i64,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_records)]
pub struct InsertPaymentRecordEntity {
    pub order_id: i64,
    pub amount: i64,
    pub status: String,
    pub transaction_id: String,
}
