use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::{
        payment_info::PaymentInfoUseCase,
        payment_tracking::{PaymentTrackingUseCase, StatementGateway},
    },
    config::config_model::DotEnvyConfig,
    domain::repositories::{
        orders::OrderRepository, payment_records::PaymentRecordRepository,
    },
    infrastructure::{
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{orders::OrderPostgres, payment_records::PaymentRecordPostgres},
        },
        statement_api::client::StatementApiClient,
    },
};

pub struct PaymentsRouterState<T, R, G>
where
    T: OrderRepository + Send + Sync,
    R: PaymentRecordRepository + Send + Sync,
    G: StatementGateway + Send + Sync,
{
    info: PaymentInfoUseCase<T>,
    tracking: PaymentTrackingUseCase<R, G>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let order_repository = Arc::new(OrderPostgres::new(Arc::clone(&db_pool)));
    let record_repository = Arc::new(PaymentRecordPostgres::new(Arc::clone(&db_pool)));
    let statement_client = Arc::new(StatementApiClient::new(
        config.payment.statement.base_url.clone(),
        config.payment.statement.access_token.clone(),
    ));

    let state = PaymentsRouterState {
        info: PaymentInfoUseCase::new(order_repository, config.payment.clone()),
        tracking: PaymentTrackingUseCase::new(
            record_repository,
            statement_client,
            config.payment.order_timeout_secs,
        ),
    };

    Router::new()
        .route("/:order_id/payment-info", get(payment_info))
        .route("/:order_id/payment-status", get(payment_status))
        .with_state(Arc::new(state))
}

pub async fn payment_info<T, R, G>(
    State(state): State<Arc<PaymentsRouterState<T, R, G>>>,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
    R: PaymentRecordRepository + Send + Sync + 'static,
    G: StatementGateway + Send + Sync + 'static,
{
    match state.info.resolve(order_id).await {
        Ok(info) => Json(info).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn payment_status<T, R, G>(
    State(state): State<Arc<PaymentsRouterState<T, R, G>>>,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    T: OrderRepository + Send + Sync + 'static,
    R: PaymentRecordRepository + Send + Sync + 'static,
    G: StatementGateway + Send + Sync + 'static,
{
    match state.tracking.check(order_id).await {
        Ok(check) => Json(check).into_response(),
        Err(err) => err.into_response(),
    }
}
