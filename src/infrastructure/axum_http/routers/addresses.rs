use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    application::usecases::addresses::AddressBookUseCase,
    domain::{
        repositories::addresses::AddressRepository,
        value_objects::addresses::{CreateAddressModel, UpdateAddressModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::addresses::AddressPostgres,
    },
};

#[derive(Debug, Deserialize)]
pub struct DeleteAddressQuery {
    user_id: i64,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let address_repository = AddressPostgres::new(Arc::clone(&db_pool));
    let usecase = AddressBookUseCase::new(Arc::new(address_repository));

    Router::new()
        .route("/", post(create_address))
        .route(
            "/:id",
            get(list_addresses).put(update_address).delete(delete_address),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list_addresses<T>(
    State(usecase): State<Arc<AddressBookUseCase<T>>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse
where
    T: AddressRepository + Send + Sync + 'static,
{
    match usecase.list(user_id).await {
        Ok(addresses) => Json(addresses).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_address<T>(
    State(usecase): State<Arc<AddressBookUseCase<T>>>,
    Json(model): Json<CreateAddressModel>,
) -> impl IntoResponse
where
    T: AddressRepository + Send + Sync + 'static,
{
    match usecase.create(model).await {
        Ok(address_id) => {
            (StatusCode::CREATED, Json(json!({ "id": address_id }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_address<T>(
    State(usecase): State<Arc<AddressBookUseCase<T>>>,
    Path(address_id): Path<i64>,
    Json(model): Json<UpdateAddressModel>,
) -> impl IntoResponse
where
    T: AddressRepository + Send + Sync + 'static,
{
    match usecase.update(address_id, model).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_address<T>(
    State(usecase): State<Arc<AddressBookUseCase<T>>>,
    Path(address_id): Path<i64>,
    Query(query): Query<DeleteAddressQuery>,
) -> impl IntoResponse
where
    T: AddressRepository + Send + Sync + 'static,
{
    match usecase.remove(address_id, query.user_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}
