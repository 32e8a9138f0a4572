use serde::{Deserialize, Serialize};

/// Externally facing payment instructions for one order. The QR/account
/// fields are only present for bank transfer and e-wallet orders.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInfoDto {
    pub amount: i64,
    pub order_id: i64,
    pub return_url: String,
    pub notify_url: String,
    pub payment_method: String,
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_qr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_timeout: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentCheckDto {
    pub is_paid: bool,
    pub transaction_id: String,
    pub remaining_secs: i64,
}

/// One row of the external bank/e-wallet statement.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StatementTransaction {
    pub amount: i64,
    pub remark: String,
    pub transaction_id: String,
}
