use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Terminal once `Verified`; the tracker never re-queries the statement API
/// for a verified record.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentRecordStatus {
    #[default]
    Unverified,
    Verified,
}

impl PaymentRecordStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "unverified" => Some(PaymentRecordStatus::Unverified),
            "verified" => Some(PaymentRecordStatus::Verified),
            _ => None,
        }
    }
}

impl Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let record_status = match self {
            PaymentRecordStatus::Unverified => "unverified",
            PaymentRecordStatus::Verified => "verified",
        };
        write!(f, "{}", record_status)
    }
}
