use std::sync::Arc;

use aster_core::{helpers::dto::ApiResponse, market::dto::TokenList};
use axum::{Json, extract::State, http::StatusCode};
use log::error;

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/api/tokens",
    description = "Spot assets with every trading pair they appear in and its last price",
    responses(
        (status = 200, description = "Success"),
        (status = 500, description = "Exchange unavailable"),
    )
)]
pub async fn tokens(
    State(server_state): State<Arc<ServerState>>,
) -> Result<Json<ApiResponse<TokenList>>, ErrorServer> {
    let tokens = server_state.market().spot_tokens().await.map_err(|e| {
        error!("Error fetching tokens: {}", e);
        ErrorServer {
            status: StatusCode::INTERNAL_SERVER_ERROR.into(),
            message: "Failed to fetch tokens from Aster Dex".to_string(),
        }
    })?;

    Ok(Json(ApiResponse::new(tokens)))
}
