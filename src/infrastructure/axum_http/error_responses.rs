use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::usecases::{
    addresses::AddressBookError, carts::CartError, checkout::CheckoutError,
    order_admin::OrderAdminError, payment_info::PaymentInfoError,
    payment_tracking::PaymentTrackingError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

fn render(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
    });
    (status, body).into_response()
}

// Internal variants never leak their error chain to the client; the detail is
// already logged where the error was mapped.

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let message = match &self {
            CheckoutError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        render(self.status_code(), message)
    }
}

impl IntoResponse for OrderAdminError {
    fn into_response(self) -> Response {
        let message = match &self {
            OrderAdminError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        render(self.status_code(), message)
    }
}

impl IntoResponse for PaymentInfoError {
    fn into_response(self) -> Response {
        let message = match &self {
            PaymentInfoError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        render(self.status_code(), message)
    }
}

impl IntoResponse for PaymentTrackingError {
    fn into_response(self) -> Response {
        let message = match &self {
            PaymentTrackingError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        render(self.status_code(), message)
    }
}

impl IntoResponse for AddressBookError {
    fn into_response(self) -> Response {
        let message = match &self {
            AddressBookError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        render(self.status_code(), message)
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let message = match &self {
            CartError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        render(self.status_code(), message)
    }
}
