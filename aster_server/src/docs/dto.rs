use aster_core::{
    market::dto::{PairPrice, PerpPair, PerpPairList, TokenEntry, TokenList},
    snapshot::dto::{BalanceSnapshot, HistoryPage, SnapshotView},
    wallet::dto::WalletBalance,
};
use utoipa::OpenApi;

use crate::{balance_history, cron, error::ErrorBody, info, perp_pairs, tokens, wallet_balance};

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        tokens::handler::tokens,
        perp_pairs::handler::perp_pairs,
        wallet_balance::handler::wallet_balance,
        balance_history::handler::balance_history,
        cron::handler::update_balance,
    ),
    components(schemas(
        info::dto::Info,
        TokenList,
        TokenEntry,
        PairPrice,
        PerpPairList,
        PerpPair,
        WalletBalance,
        HistoryPage,
        SnapshotView,
        BalanceSnapshot,
        ErrorBody
    ))
)]
pub struct ApiDoc;
