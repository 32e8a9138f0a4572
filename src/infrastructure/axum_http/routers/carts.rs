use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::{
    application::usecases::carts::CartUseCase,
    domain::{
        repositories::carts::CartRepository,
        value_objects::carts::{AddCartItemModel, UpdateCartItemModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::carts::CartPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let cart_repository = CartPostgres::new(Arc::clone(&db_pool));
    let usecase = CartUseCase::new(Arc::new(cart_repository));

    Router::new()
        .route("/", post(add_cart_item))
        .route("/:user_id", get(list_cart))
        .route(
            "/:user_id/:product_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list_cart<T>(
    State(usecase): State<Arc<CartUseCase<T>>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse
where
    T: CartRepository + Send + Sync + 'static,
{
    match usecase.list(user_id).await {
        Ok(lines) => Json(lines).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn add_cart_item<T>(
    State(usecase): State<Arc<CartUseCase<T>>>,
    Json(model): Json<AddCartItemModel>,
) -> impl IntoResponse
where
    T: CartRepository + Send + Sync + 'static,
{
    match usecase.add(model).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_cart_item<T>(
    State(usecase): State<Arc<CartUseCase<T>>>,
    Path((user_id, product_id)): Path<(i64, i64)>,
    Json(model): Json<UpdateCartItemModel>,
) -> impl IntoResponse
where
    T: CartRepository + Send + Sync + 'static,
{
    match usecase.set_quantity(user_id, product_id, model.quantity).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn remove_cart_item<T>(
    State(usecase): State<Arc<CartUseCase<T>>>,
    Path((user_id, product_id)): Path<(i64, i64)>,
) -> impl IntoResponse
where
    T: CartRepository + Send + Sync + 'static,
{
    match usecase.remove(user_id, product_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}
