use std::sync::Arc;

use aster_core::{
    helpers::dto::ApiResponse,
    snapshot::{
        dto::HistoryPage,
        history::{parse_hours, read_history},
    },
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use super::dto::BalanceHistoryQuery;
use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/api/balance-history",
    params(BalanceHistoryQuery),
    description = "Recorded balance snapshots of the tracked wallet, oldest first. Never fails; store errors yield an empty list",
    responses(
        (status = 200, description = "Success"),
    )
)]
pub async fn balance_history(
    State(server_state): State<Arc<ServerState>>,
    Query(query): Query<BalanceHistoryQuery>,
) -> Json<ApiResponse<HistoryPage>> {
    let hours = parse_hours(query.hours.as_deref());

    let page = read_history(
        server_state.store(),
        &server_state.config().agent_wallet,
        hours,
        Utc::now(),
    );

    Json(ApiResponse::new(page))
}
