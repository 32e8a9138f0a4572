use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::{
    application::usecases::{checkout::CheckoutUseCase, order_admin::OrderAdminUseCase},
    domain::{
        repositories::orders::OrderRepository,
        value_objects::orders::{CreateOrderModel, UpdateOrderModel, UpdateOrderStatusModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::orders::OrderPostgres,
    },
};

pub struct OrdersRouterState<T>
where
    T: OrderRepository + Send + Sync,
{
    checkout: CheckoutUseCase<T>,
    admin: OrderAdminUseCase<T>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = Arc::new(OrderPostgres::new(Arc::clone(&db_pool)));
    let state = OrdersRouterState {
        checkout: CheckoutUseCase::new(Arc::clone(&order_repository)),
        admin: OrderAdminUseCase::new(order_repository),
    };

    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/stats", get(order_stats))
        .route("/:order_id", get(get_order).put(update_order))
        .route("/:order_id/status", put(update_order_status))
        .route("/:order_id/cancel", put(cancel_order))
        .with_state(Arc::new(state))
}

pub async fn create_order<T>(
    State(state): State<Arc<OrdersRouterState<T>>>,
    Json(model): Json<CreateOrderModel>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.checkout.create_order(model).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_orders<T>(State(state): State<Arc<OrdersRouterState<T>>>) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.admin.list_orders().await {
        Ok(orders) => Json(orders).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn order_stats<T>(State(state): State<Arc<OrdersRouterState<T>>>) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.admin.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_order<T>(
    State(state): State<Arc<OrdersRouterState<T>>>,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.admin.get_order(order_id).await {
        Ok(order) => Json(order).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_order<T>(
    State(state): State<Arc<OrdersRouterState<T>>>,
    Path(order_id): Path<i64>,
    Json(model): Json<UpdateOrderModel>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.admin.update_order(order_id, model).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_order_status<T>(
    State(state): State<Arc<OrdersRouterState<T>>>,
    Path(order_id): Path<i64>,
    Json(model): Json<UpdateOrderStatusModel>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.admin.update_status(order_id, &model.status).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn cancel_order<T>(
    State(state): State<Arc<OrdersRouterState<T>>>,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
{
    match state.admin.cancel(order_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => err.into_response(),
    }
}
