use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::{delete, insert_into, sql_query, update};

use crate::domain::entities::addresses::{AddressEntity, InsertAddressEntity};
use crate::domain::entities::order_items::{InsertOrderItemEntity, OrderItemEntity};
use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::entities::payment_records::InsertPaymentRecordEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_record_statuses::PaymentRecordStatus;
use crate::domain::value_objects::orders::{
    OrderDetailDto, OrderItemDraft, OrderLineDto, OrderOverwrite, OrderStatsDto, OrderWriteDenied,
    ShippingContactDto,
};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{
    addresses, cart_items, order_items, orders, payment_records, products,
};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[derive(QueryableByName)]
struct OrderStatsRow {
    #[diesel(sql_type = BigInt)]
    total_orders: i64,
    #[diesel(sql_type = BigInt)]
    total_revenue: i64,
    #[diesel(sql_type = BigInt)]
    total_customers: i64,
    #[diesel(sql_type = BigInt)]
    completed_orders: i64,
}

fn insert_items(
    conn: &mut PgConnection,
    order_id: i64,
    items: &[OrderItemDraft],
) -> QueryResult<usize> {
    let rows: Vec<InsertOrderItemEntity> = items
        .iter()
        .map(|item| InsertOrderItemEntity {
            order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        })
        .collect();

    insert_into(order_items::table).values(&rows).execute(conn)
}

fn into_detail(
    order: OrderEntity,
    shipping_address: Option<AddressEntity>,
    items: Vec<OrderLineDto>,
) -> OrderDetailDto {
    OrderDetailDto {
        id: order.id,
        user_id: order.user_id,
        shipping_address_id: order.shipping_address_id,
        total_amount: order.total_amount,
        discount_type: order.discount_type,
        discount_value: order.discount_value,
        status: order.status,
        payment_method: order.payment_method,
        payment_status: order.payment_status,
        transaction_id: order.transaction_id,
        note: order.note,
        created_at: order.created_at,
        updated_at: order.updated_at,
        shipping: shipping_address.map(|address| ShippingContactDto {
            full_name: address.full_name,
            phone: address.phone,
            address: address.address,
            city: address.city,
        }),
        items,
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create(
        &self,
        order: InsertOrderEntity,
        items: Vec<OrderItemDraft>,
        record_status: PaymentRecordStatus,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let buyer_id = order.user_id;

        let order_id = conn.transaction::<i64, anyhow::Error, _>(|conn| {
            let order_id = insert_into(orders::table)
                .values(&order)
                .returning(orders::id)
                .get_result::<i64>(conn)?;

            insert_items(conn, order_id, &items)?;

            for item in &items {
                // The stock floor is enforced by the filter: zero affected
                // rows means either a missing product or a shortfall.
                let affected = update(
                    products::table.filter(
                        products::id
                            .eq(item.product_id)
                            .and(products::stock.ge(item.quantity)),
                    ),
                )
                .set(products::stock.eq(products::stock - item.quantity))
                .execute(conn)?;

                if affected == 0 {
                    let product_exists = diesel::select(diesel::dsl::exists(
                        products::table.filter(products::id.eq(item.product_id)),
                    ))
                    .get_result::<bool>(conn)?;

                    let denied = if product_exists {
                        OrderWriteDenied::InsufficientStock(item.product_id)
                    } else {
                        OrderWriteDenied::ProductNotFound(item.product_id)
                    };
                    return Err(denied.into());
                }
            }

            delete(cart_items::table.filter(cart_items::user_id.eq(buyer_id))).execute(conn)?;

            insert_into(payment_records::table)
                .values(&InsertPaymentRecordEntity {
                    order_id,
                    amount: order.total_amount,
                    status: record_status.to_string(),
                    transaction_id: order.transaction_id.clone(),
                })
                .execute(conn)?;

            Ok(order_id)
        })?;

        Ok(order_id)
    }

    async fn find_by_id(&self, order_id: i64) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = orders::table
            .find(order_id)
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn detail(&self, order_id: i64) -> Result<Option<OrderDetailDto>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = orders::table
            .left_join(addresses::table)
            .filter(orders::id.eq(order_id))
            .select((OrderEntity::as_select(), Option::<AddressEntity>::as_select()))
            .first::<(OrderEntity, Option<AddressEntity>)>(&mut conn)
            .optional()?;

        let Some((order, shipping_address)) = row else {
            return Ok(None);
        };

        let items = order_items::table
            .inner_join(products::table)
            .filter(order_items::order_id.eq(order_id))
            .select((
                OrderItemEntity::as_select(),
                products::title,
                products::thumbnail,
            ))
            .load::<(OrderItemEntity, String, Option<String>)>(&mut conn)?
            .into_iter()
            .map(|(item, title, thumbnail)| OrderLineDto {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
                title,
                thumbnail,
            })
            .collect();

        Ok(Some(into_detail(order, shipping_address, items)))
    }

    async fn list_details(&self) -> Result<Vec<OrderDetailDto>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = orders::table
            .left_join(addresses::table)
            .order(orders::created_at.desc())
            .select((OrderEntity::as_select(), Option::<AddressEntity>::as_select()))
            .load::<(OrderEntity, Option<AddressEntity>)>(&mut conn)?;

        let order_ids: Vec<i64> = rows.iter().map(|(order, _)| order.id).collect();

        let mut lines_by_order: HashMap<i64, Vec<OrderLineDto>> = HashMap::new();
        let item_rows = order_items::table
            .inner_join(products::table)
            .filter(order_items::order_id.eq_any(&order_ids))
            .select((
                OrderItemEntity::as_select(),
                products::title,
                products::thumbnail,
            ))
            .load::<(OrderItemEntity, String, Option<String>)>(&mut conn)?;

        for (item, title, thumbnail) in item_rows {
            lines_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderLineDto {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                    title,
                    thumbnail,
                });
        }

        let details = rows
            .into_iter()
            .map(|(order, shipping_address)| {
                let items = lines_by_order.remove(&order.id).unwrap_or_default();
                into_detail(order, shipping_address, items)
            })
            .collect();

        Ok(details)
    }

    async fn overwrite(&self, order_id: i64, overwrite: OrderOverwrite) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<(), anyhow::Error, _>(|conn| {
            let affected = update(orders::table.find(order_id))
                .set((
                    orders::total_amount.eq(overwrite.total_amount),
                    orders::discount_type.eq(&overwrite.discount_type),
                    orders::discount_value.eq(overwrite.discount_value),
                    orders::status.eq(&overwrite.status),
                    orders::payment_method.eq(&overwrite.payment_method),
                    orders::payment_status.eq(&overwrite.payment_status),
                    orders::note.eq(overwrite.note.as_deref()),
                    orders::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            if affected == 0 {
                return Err(OrderWriteDenied::OrderNotFound.into());
            }

            match (overwrite.shipping_address_id, &overwrite.shipping) {
                (Some(address_id), Some(shipping)) => {
                    update(addresses::table.find(address_id))
                        .set((
                            addresses::full_name.eq(&shipping.full_name),
                            addresses::phone.eq(&shipping.phone),
                            addresses::address.eq(&shipping.address),
                            addresses::city.eq(&shipping.city),
                        ))
                        .execute(conn)?;

                    update(orders::table.find(order_id))
                        .set(orders::shipping_address_id.eq(Some(address_id)))
                        .execute(conn)?;
                }
                (None, Some(shipping)) => {
                    let new_address_id = insert_into(addresses::table)
                        .values(&InsertAddressEntity {
                            user_id: shipping.user_id.unwrap_or_default(),
                            full_name: shipping.full_name.clone(),
                            phone: shipping.phone.clone(),
                            address: shipping.address.clone(),
                            city: shipping.city.clone(),
                            is_default: false,
                        })
                        .returning(addresses::id)
                        .get_result::<i64>(conn)?;

                    update(orders::table.find(order_id))
                        .set(orders::shipping_address_id.eq(Some(new_address_id)))
                        .execute(conn)?;
                }
                (Some(address_id), None) => {
                    update(orders::table.find(order_id))
                        .set(orders::shipping_address_id.eq(Some(address_id)))
                        .execute(conn)?;
                }
                (None, None) => {}
            }

            // Items are replaced wholesale, no partial diffing.
            delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                .execute(conn)?;
            insert_items(conn, order_id, &overwrite.items)?;

            Ok(())
        })?;

        Ok(())
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(orders::table.find(order_id))
            .set((
                orders::status.eq(status.to_string()),
                orders::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn stats(&self) -> Result<OrderStatsDto> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = sql_query(
            "SELECT COUNT(*)::BIGINT AS total_orders, \
             COALESCE(SUM(total_amount) FILTER (WHERE status <> 'cancelled'), 0)::BIGINT AS total_revenue, \
             COUNT(DISTINCT user_id)::BIGINT AS total_customers, \
             (COUNT(*) FILTER (WHERE status = 'delivered'))::BIGINT AS completed_orders \
             FROM orders",
        )
        .get_result::<OrderStatsRow>(&mut conn)?;

        Ok(OrderStatsDto {
            total_orders: row.total_orders,
            total_revenue: row.total_revenue,
            total_customers: row.total_customers,
            completed_orders: row.completed_orders,
        })
    }
}
