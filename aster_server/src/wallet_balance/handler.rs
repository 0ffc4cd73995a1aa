use std::sync::Arc;

use aster_core::{helpers::dto::ApiResponse, wallet::dto::WalletBalance};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use log::error;

use super::dto::WalletBalanceQuery;
use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/api/wallet-balance",
    params(WalletBalanceQuery),
    description = "Token holdings of a wallet as reported by the indexer",
    responses(
        (status = 200, description = "Success"),
        (status = 400, description = "Missing address"),
        (status = 500, description = "Indexer unavailable"),
    )
)]
pub async fn wallet_balance(
    State(server_state): State<Arc<ServerState>>,
    Query(query): Query<WalletBalanceQuery>,
) -> Result<Json<ApiResponse<WalletBalance>>, ErrorServer> {
    let address = query
        .address
        .filter(|address| !address.trim().is_empty())
        .ok_or(ErrorServer {
            status: StatusCode::BAD_REQUEST.into(),
            message: "Wallet address is required".to_string(),
        })?;

    let page = server_state
        .moralis()
        .wallet_tokens(&address)
        .await
        .map_err(|e| {
            error!("Error fetching wallet balance for {}: {}", address, e);
            ErrorServer {
                status: StatusCode::INTERNAL_SERVER_ERROR.into(),
                message: "Failed to fetch wallet balance".to_string(),
            }
        })?;

    Ok(Json(ApiResponse::new(WalletBalance {
        address,
        tokens: page.result,
        cursor: page.cursor,
    })))
}
