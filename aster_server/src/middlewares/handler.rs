use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use log::warn;

use crate::{error::ErrorServer, state::ServerState};

/// Lets a request through only when it carries `Bearer <CRON_SECRET>`.
pub async fn cron_auth(
    State(server_state): State<Arc<ServerState>>,
    req: Request,
    next: Next,
) -> Result<Response, ErrorServer> {
    let expected = format!("Bearer {}", server_state.config().cron_secret);

    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|token| token == expected);

    if !authorized {
        warn!("Rejected cron trigger with missing or invalid credentials");
        return Err(ErrorServer {
            message: "Unauthorized".to_string(),
            status: StatusCode::UNAUTHORIZED.into(),
        });
    }

    Ok(next.run(req).await)
}
