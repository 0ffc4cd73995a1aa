use std::sync::Arc;

use aster_core::{
    helpers::dto::ApiResponse,
    snapshot::{dto::BalanceSnapshot, recorder::record_snapshot},
};
use axum::{Json, extract::State, http::StatusCode};
use log::error;

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/api/cron/update-balance",
    description = "Record one balance snapshot of the tracked wallet. Requires `Authorization: Bearer <CRON_SECRET>`",
    responses(
        (status = 200, description = "Success"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn update_balance(
    State(server_state): State<Arc<ServerState>>,
) -> Result<Json<ApiResponse<BalanceSnapshot>>, ErrorServer> {
    let snapshot = record_snapshot(
        server_state.moralis(),
        server_state.store(),
        &server_state.config().agent_wallet,
    )
    .await
    .map_err(|e| {
        error!("Cron job error: {}", e);
        ErrorServer {
            status: StatusCode::INTERNAL_SERVER_ERROR.into(),
            message: e.to_string(),
        }
    })?;

    Ok(Json(ApiResponse::with_message(
        snapshot,
        "Balance snapshot saved",
    )))
}
