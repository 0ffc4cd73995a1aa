mod balance_history;
mod cron;
mod docs;
mod error;
mod info;
mod job;
mod middlewares;
mod perp_pairs;
mod router;
mod state;
mod tokens;
mod wallet_balance;

use std::sync::Arc;

use aster_core::{
    config::Config,
    snapshot::storage::{SledSnapshotStore, SnapshotStore},
};
use dotenvy::dotenv;
use job::job_scheduler::schedule_jobs;
use router::router;
use state::ServerState;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let db = sled::open(&config.sled_url)?;
    let store: Arc<dyn SnapshotStore> = Arc::new(SledSnapshotStore::new(db));

    let state = Arc::new(ServerState::from_config(config, store)?);

    // Keeps the scheduler handle alive for the lifetime of the server.
    let _scheduler = match state.config().snapshot_cron.clone() {
        Some(expression) => Some(schedule_jobs(state.clone(), &expression).await?),
        None => None,
    };

    let server_domain = state.config().server_domain.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&server_domain).await?;
    log::info!("Listening on {}", server_domain);

    axum::serve(listener, app).await?;

    Ok(())
}
