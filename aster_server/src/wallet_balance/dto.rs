use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WalletBalanceQuery {
    /// Wallet address to look up.
    pub address: Option<String>,
}
