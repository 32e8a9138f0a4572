use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    BankTransfer,
    Momo,
    Cod,
}

impl PaymentMethod {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "momo" => Some(PaymentMethod::Momo),
            "cod" => Some(PaymentMethod::Cod),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let payment_method = match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Momo => "momo",
            PaymentMethod::Cod => "cod",
        };
        write!(f, "{}", payment_method)
    }
}
