use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    balance_history::handler::balance_history,
    cron::handler::update_balance,
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::info,
    middlewares::handler::cron_auth,
    perp_pairs::handler::perp_pairs,
    state::ServerState,
    tokens::handler::tokens,
    wallet_balance::handler::wallet_balance,
};

pub fn router(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    let cron_router = Router::new()
        .route("/api/cron/update-balance", get(update_balance))
        .route_layer(middleware::from_fn_with_state(state.clone(), cron_auth));

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .merge(cron_router)
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/api/tokens", get(tokens))
        .route("/api/perp-pairs", get(perp_pairs))
        .route("/api/wallet-balance", get(wallet_balance))
        .route("/api/balance-history", get(balance_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
