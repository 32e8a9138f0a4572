#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Display fields and endpoints for the payment rail, injected into the
/// payment usecases at construction time instead of being re-read per request.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub website_url: String,
    pub order_timeout_secs: i64,
    pub bank: BankAccount,
    pub momo: WalletAccount,
    pub statement: StatementApi,
}

#[derive(Debug, Clone)]
pub struct BankAccount {
    pub short_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub bank_name: String,
    pub qr_base_url: String,
}

#[derive(Debug, Clone)]
pub struct WalletAccount {
    pub account_number: String,
    pub account_holder: String,
    pub qr_base_url: String,
}

#[derive(Debug, Clone)]
pub struct StatementApi {
    pub base_url: String,
    pub access_token: String,
}
