use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::{delete, insert_into, update};

use crate::domain::entities::cart_items::{CartItemEntity, InsertCartItemEntity};
use crate::domain::repositories::carts::CartRepository;
use crate::domain::value_objects::carts::CartLineDto;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{cart_items, products};

pub struct CartPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CartPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CartRepository for CartPostgres {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<CartLineDto>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = cart_items::table
            .inner_join(products::table)
            .filter(cart_items::user_id.eq(user_id))
            .select((
                CartItemEntity::as_select(),
                products::title,
                products::price,
                products::thumbnail,
            ))
            .load::<(CartItemEntity, String, i64, Option<String>)>(&mut conn)?
            .into_iter()
            .map(|(cart_item, title, price, thumbnail)| CartLineDto {
                id: cart_item.id,
                product_id: cart_item.product_id,
                quantity: cart_item.quantity,
                title,
                price,
                thumbnail,
            })
            .collect();

        Ok(results)
    }

    async fn add(&self, cart_item: InsertCartItemEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(cart_items::table)
            .values(&cart_item)
            .on_conflict((cart_items::user_id, cart_items::product_id))
            .do_update()
            .set(cart_items::quantity.eq(cart_items::quantity + cart_item.quantity))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn set_quantity(&self, user_id: i64, product_id: i64, quantity: i32) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(
            cart_items::table.filter(
                cart_items::user_id
                    .eq(user_id)
                    .and(cart_items::product_id.eq(product_id)),
            ),
        )
        .set(cart_items::quantity.eq(quantity))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn remove(&self, user_id: i64, product_id: i64) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(
            cart_items::table.filter(
                cart_items::user_id
                    .eq(user_id)
                    .and(cart_items::product_id.eq(product_id)),
            ),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
