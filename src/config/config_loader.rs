use anyhow::Result;

use super::config_model::{
    BankAccount, Database, DotEnvyConfig, PaymentConfig, Server, StatementApi, WalletAccount,
};

const DEFAULT_ORDER_TIMEOUT_SECS: i64 = 30 * 60;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let payment = PaymentConfig {
        website_url: std::env::var("WEBSITE_URL").expect("WEBSITE_URL is invalid"),
        order_timeout_secs: std::env::var("ORDER_TIMEOUT_SECS")
            .ok()
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(DEFAULT_ORDER_TIMEOUT_SECS),
        bank: BankAccount {
            short_name: std::env::var("BANK_SHORT_NAME").expect("BANK_SHORT_NAME is invalid"),
            account_number: std::env::var("BANK_ACCOUNT_NUMBER")
                .expect("BANK_ACCOUNT_NUMBER is invalid"),
            account_holder: std::env::var("BANK_ACCOUNT_HOLDER")
                .expect("BANK_ACCOUNT_HOLDER is invalid"),
            bank_name: std::env::var("BANK_NAME").expect("BANK_NAME is invalid"),
            qr_base_url: std::env::var("BANK_QR_BASE_URL")
                .unwrap_or_else(|_| "https://api.vietqr.io".to_string()),
        },
        momo: WalletAccount {
            account_number: std::env::var("MOMO_ACCOUNT_NUMBER")
                .expect("MOMO_ACCOUNT_NUMBER is invalid"),
            account_holder: std::env::var("MOMO_ACCOUNT_HOLDER")
                .expect("MOMO_ACCOUNT_HOLDER is invalid"),
            qr_base_url: std::env::var("MOMO_QR_BASE_URL")
                .unwrap_or_else(|_| "https://momosv3.apimienphi.com".to_string()),
        },
        statement: StatementApi {
            base_url: std::env::var("STATEMENT_API_BASE_URL")
                .expect("STATEMENT_API_BASE_URL is invalid"),
            access_token: std::env::var("STATEMENT_API_TOKEN")
                .expect("STATEMENT_API_TOKEN is invalid"),
        },
    };

    Ok(DotEnvyConfig {
        server,
        database,
        payment,
    })
}
