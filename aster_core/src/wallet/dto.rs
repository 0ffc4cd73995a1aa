use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Raw indexer page. Token entries are kept as JSON so they can be relayed
/// to the dashboard exactly as received.
#[derive(Debug, Deserialize)]
pub struct WalletTokensPage {
    #[serde(default)]
    pub result: Vec<Value>,
    pub cursor: Option<String>,
}

impl WalletTokensPage {
    pub fn typed_tokens(&self) -> Result<Vec<WalletToken>, serde_json::Error> {
        self.result
            .iter()
            .cloned()
            .map(serde_json::from_value::<WalletToken>)
            .collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WalletBalance {
    pub address: String,
    #[schema(value_type = Vec<Object>)]
    pub tokens: Vec<Value>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletToken {
    pub token_address: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default, deserialize_with = "decimals_from_number_or_string")]
    pub decimals: u32,
    pub usd_price: Option<f64>,
    pub usd_value: Option<f64>,
    pub native_token: Option<bool>,
}

impl WalletToken {
    pub fn is_native(&self) -> bool {
        self.native_token.unwrap_or(false)
    }

    /// Balance scaled by `decimals`; unparsable balances count as zero.
    pub fn scaled_balance(&self) -> f64 {
        let raw = self
            .balance
            .as_deref()
            .and_then(|balance| balance.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        raw / 10f64.powi(self.decimals as i32)
    }

    pub fn usd_value_or_zero(&self) -> f64 {
        self.usd_value.unwrap_or(0.0)
    }
}

fn decimals_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimals {
        Number(u32),
        Text(String),
    }

    match Option::<Decimals>::deserialize(deserializer)? {
        Some(Decimals::Number(value)) => Ok(value),
        Some(Decimals::Text(value)) => value.trim().parse().map_err(serde::de::Error::custom),
        None => Ok(0),
    }
}
