use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::{delete, insert_into, update};

use crate::domain::entities::addresses::{AddressEntity, InsertAddressEntity};
use crate::domain::repositories::addresses::AddressRepository;
use crate::domain::value_objects::addresses::AddressWriteDenied;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::addresses;

pub struct AddressPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AddressPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn clear_default_flag(conn: &mut PgConnection, user_id: i64) -> QueryResult<usize> {
    update(addresses::table.filter(addresses::user_id.eq(user_id)))
        .set(addresses::is_default.eq(false))
        .execute(conn)
}

/// A missing target row aborts the transaction (rolling back any flag
/// clearing) and is reported to the caller as `false` rather than an error.
fn absorb_not_found(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err)
            if err.downcast_ref::<AddressWriteDenied>()
                == Some(&AddressWriteDenied::AddressNotFound) =>
        {
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

#[async_trait]
impl AddressRepository for AddressPostgres {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<AddressEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = addresses::table
            .filter(addresses::user_id.eq(user_id))
            .order(addresses::is_default.desc())
            .select(AddressEntity::as_select())
            .load::<AddressEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert(&self, address: InsertAddressEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let address_id = conn.transaction::<i64, anyhow::Error, _>(|conn| {
            if address.is_default {
                clear_default_flag(conn, address.user_id)?;
            }

            let address_id = insert_into(addresses::table)
                .values(&address)
                .returning(addresses::id)
                .get_result::<i64>(conn)?;

            Ok(address_id)
        })?;

        Ok(address_id)
    }

    async fn update(&self, address_id: i64, address: InsertAddressEntity) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<(), anyhow::Error, _>(|conn| {
            if address.is_default {
                clear_default_flag(conn, address.user_id)?;
            }

            let affected = update(
                addresses::table.filter(
                    addresses::id
                        .eq(address_id)
                        .and(addresses::user_id.eq(address.user_id)),
                ),
            )
            .set((
                addresses::full_name.eq(&address.full_name),
                addresses::phone.eq(&address.phone),
                addresses::address.eq(&address.address),
                addresses::city.eq(&address.city),
                addresses::is_default.eq(address.is_default),
            ))
            .execute(conn)?;

            if affected == 0 {
                return Err(AddressWriteDenied::AddressNotFound.into());
            }

            Ok(())
        });

        absorb_not_found(result)
    }

    async fn delete(&self, address_id: i64, user_id: i64) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(
            addresses::table.filter(
                addresses::id
                    .eq(address_id)
                    .and(addresses::user_id.eq(user_id)),
            ),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    // The missing-row sentinel must travel out of the transaction closure (so
    // earlier writes like the default-flag clearing roll back) and only then
    // collapse to `false`.
    #[test]
    fn missing_row_aborts_the_transaction_then_reads_as_false() {
        let result = absorb_not_found(Err(AddressWriteDenied::AddressNotFound.into()));
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn successful_write_reads_as_true() {
        let result = absorb_not_found(Ok(()));
        assert!(matches!(result, Ok(true)));
    }

    #[test]
    fn other_errors_still_propagate() {
        let result = absorb_not_found(Err(anyhow!("connection reset")));
        assert!(result.is_err());
    }
}
