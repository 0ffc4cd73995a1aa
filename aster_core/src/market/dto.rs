use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const TRADING: &str = "TRADING";
pub const PERPETUAL: &str = "PERPETUAL";

/// Spot symbol entry from `exchangeInfo`. Unmodelled fields are kept so the
/// raw list can be passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSymbol {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub base_asset: String,
    #[serde(default)]
    pub quote_asset: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<SpotSymbol>,
    pub server_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PriceTicker {
    pub symbol: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PairPrice {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenEntry {
    pub symbol: String,
    pub pairs: Vec<PairPrice>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    pub tokens: Vec<TokenEntry>,
    #[schema(value_type = Vec<Object>)]
    pub symbols: Vec<SpotSymbol>,
    pub server_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpSymbol {
    #[serde(default)]
    pub symbol: String,
    pub pair: Option<String>,
    #[serde(default)]
    pub base_asset: String,
    #[serde(default)]
    pub quote_asset: String,
    pub margin_asset: Option<String>,
    #[serde(default)]
    pub status: String,
    pub contract_type: Option<String>,
}

impl PerpSymbol {
    pub fn is_live_perpetual(&self) -> bool {
        self.contract_type.as_deref() == Some(PERPETUAL) && self.status == TRADING
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<PerpSymbol>,
    pub server_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub last_price: Option<String>,
    pub price_change: Option<String>,
    pub price_change_percent: Option<String>,
    pub high_price: Option<String>,
    pub low_price: Option<String>,
    pub volume: Option<String>,
    pub quote_volume: Option<String>,
    pub open_price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerpPair {
    pub symbol: String,
    pub pair: Option<String>,
    pub base_asset: String,
    pub quote_asset: String,
    pub margin_asset: Option<String>,
    pub status: String,
    pub contract_type: Option<String>,
    pub current_price: String,
    pub price_change: String,
    pub price_change_percent: String,
    pub high_price: String,
    pub low_price: String,
    pub volume: String,
    pub quote_volume: String,
    pub open_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerpPairList {
    pub perp_pairs: Vec<PerpPair>,
    pub total: usize,
    pub server_time: Option<i64>,
}
