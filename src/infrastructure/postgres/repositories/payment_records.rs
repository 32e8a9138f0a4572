use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::update;

use crate::domain::entities::payment_records::PaymentRecordEntity;
use crate::domain::repositories::payment_records::PaymentRecordRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_record_statuses::PaymentRecordStatus;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{orders, payment_records};

pub struct PaymentRecordPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentRecordPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRecordRepository for PaymentRecordPostgres {
    async fn find_by_order(&self, order_id: i64) -> Result<Option<PaymentRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = payment_records::table
            .find(order_id)
            .select(PaymentRecordEntity::as_select())
            .first::<PaymentRecordEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn confirm_paid(&self, order_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<(), anyhow::Error, _>(|conn| {
            update(payment_records::table.find(order_id))
                .set(payment_records::status.eq(PaymentRecordStatus::Verified.to_string()))
                .execute(conn)?;

            update(orders::table.find(order_id))
                .set((
                    orders::status.eq(OrderStatus::Paid.to_string()),
                    orders::payment_status.eq(PaymentStatus::Completed.to_string()),
                    orders::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            Ok(())
        })?;

        Ok(())
    }
}
