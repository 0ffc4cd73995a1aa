use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::wallet::dto::WalletToken;

/// Aggregates derived from one indexer response.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WalletTotals {
    pub bnb_balance: f64,
    pub bnb_usd_value: f64,
    pub portfolio_value: f64,
    pub total_tokens: usize,
}

impl WalletTotals {
    pub fn from_tokens(tokens: &[WalletToken]) -> Self {
        let native = tokens.iter().find(|token| token.is_native());

        Self {
            bnb_balance: native.map(WalletToken::scaled_balance).unwrap_or(0.0),
            bnb_usd_value: native.map(WalletToken::usd_value_or_zero).unwrap_or(0.0),
            portfolio_value: tokens.iter().map(WalletToken::usd_value_or_zero).sum(),
            total_tokens: tokens.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBalanceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub wallet_address: String,
    pub totals: WalletTotals,
}

impl NewBalanceSnapshot {
    pub fn new(wallet_address: impl Into<String>, timestamp: DateTime<Utc>, totals: WalletTotals) -> Self {
        Self {
            timestamp,
            wallet_address: wallet_address.into(),
            totals,
        }
    }
}

/// Stored snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BalanceSnapshot {
    pub id: String,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub wallet_address: String,
    pub bnb_balance: f64,
    pub bnb_usd_value: f64,
    pub portfolio_value: f64,
    pub total_tokens: usize,
}

impl From<(String, NewBalanceSnapshot)> for BalanceSnapshot {
    fn from((id, snapshot): (String, NewBalanceSnapshot)) -> Self {
        let NewBalanceSnapshot {
            timestamp,
            wallet_address,
            totals,
        } = snapshot;

        Self {
            id,
            timestamp,
            wallet_address,
            bnb_balance: totals.bnb_balance,
            bnb_usd_value: totals.bnb_usd_value,
            portfolio_value: totals.portfolio_value,
            total_tokens: totals.total_tokens,
        }
    }
}

/// Chart point as served by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SnapshotView {
    pub id: String,
    pub timestamp: String,
    pub bnb_balance: f64,
    pub bnb_usd_value: f64,
    pub portfolio_value: f64,
    pub total_tokens: usize,
}

impl From<BalanceSnapshot> for SnapshotView {
    fn from(snapshot: BalanceSnapshot) -> Self {
        Self {
            id: snapshot.id,
            timestamp: snapshot
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            bnb_balance: snapshot.bnb_balance,
            bnb_usd_value: snapshot.bnb_usd_value,
            portfolio_value: snapshot.portfolio_value,
            total_tokens: snapshot.total_tokens,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryPage {
    pub snapshots: Vec<SnapshotView>,
    pub count: usize,
    pub hours: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HistoryPage {
    pub fn empty(hours: u32) -> Self {
        Self {
            snapshots: Vec::new(),
            count: 0,
            hours,
            message: None,
        }
    }
}
