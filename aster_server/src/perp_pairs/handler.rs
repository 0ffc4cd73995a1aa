use std::sync::Arc;

use aster_core::{helpers::dto::ApiResponse, market::dto::PerpPairList};
use axum::{Json, extract::State, http::StatusCode};
use log::error;

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/api/perp-pairs",
    description = "Trading perpetual contracts enriched with 24h ticker statistics",
    responses(
        (status = 200, description = "Success"),
        (status = 500, description = "Exchange unavailable"),
    )
)]
pub async fn perp_pairs(
    State(server_state): State<Arc<ServerState>>,
) -> Result<Json<ApiResponse<PerpPairList>>, ErrorServer> {
    let pairs = server_state.market().perp_pairs().await.map_err(|e| {
        error!("Error fetching perpetual pairs: {}", e);
        ErrorServer {
            status: StatusCode::INTERNAL_SERVER_ERROR.into(),
            message: "Failed to fetch perpetual pairs from Aster Dex".to_string(),
        }
    })?;

    Ok(Json(ApiResponse::new(pairs)))
}
