use chrono::Utc;
use log::info;

use super::{
    dto::{BalanceSnapshot, NewBalanceSnapshot, WalletTotals},
    storage::SnapshotStore,
};
use crate::{error::RecorderError, wallet::handler::Moralis};

/// Fetches the wallet's holdings and appends one snapshot. Not idempotent:
/// overlapping calls each write their own document.
pub async fn record_snapshot(
    moralis: &Moralis,
    store: &dyn SnapshotStore,
    wallet_address: &str,
) -> Result<BalanceSnapshot, RecorderError> {
    let page = moralis.wallet_tokens(wallet_address).await?;
    let tokens = page.typed_tokens()?;
    let totals = WalletTotals::from_tokens(&tokens);

    let snapshot = store.insert(NewBalanceSnapshot::new(wallet_address, Utc::now(), totals))?;

    info!(
        "Saved balance snapshot {} for {}: {} BNB, ${:.2} portfolio across {} tokens",
        snapshot.id,
        snapshot.wallet_address,
        snapshot.bnb_balance,
        snapshot.portfolio_value,
        snapshot.total_tokens
    );

    Ok(snapshot)
}
