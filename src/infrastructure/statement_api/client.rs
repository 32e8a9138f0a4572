use anyhow::Result;
use serde::Deserialize;
use tracing::error;

use crate::domain::value_objects::payments::StatementTransaction;

/// Minimal client for the bank/e-wallet statement API built on reqwest.
/// The API is consumed read-only: one GET returning recent transactions.
pub struct StatementApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct StatementEnvelope {
    #[serde(default)]
    transactions: Vec<StatementTransactionRaw>,
}

#[derive(Debug, Deserialize)]
struct StatementTransactionRaw {
    amount: i64,
    #[serde(alias = "description", alias = "note")]
    remark: String,
    #[serde(alias = "transactionId", alias = "tid")]
    transaction_id: String,
}

impl StatementApiClient {
    pub fn new(base_url: String, access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            access_token,
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        error!(
            status = %status,
            response_body = %body,
            context = %context,
            "statement api request failed"
        );

        anyhow::bail!(
            "Statement API request failed: {} (status {})",
            context,
            status
        );
    }

    pub async fn fetch_transactions(&self) -> Result<Vec<StatementTransaction>> {
        let url = format!(
            "{}/transactions?token={}",
            self.base_url.trim_end_matches('/'),
            self.access_token
        );

        let resp = self.http.get(url).send().await?;
        let resp = Self::ensure_success(resp, "fetch transactions").await?;

        let envelope: StatementEnvelope = resp.json().await?;
        let transactions = envelope
            .transactions
            .into_iter()
            .map(|raw| StatementTransaction {
                amount: raw.amount,
                remark: raw.remark,
                transaction_id: raw.transaction_id,
            })
            .collect();

        Ok(transactions)
    }
}
