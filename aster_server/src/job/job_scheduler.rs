use std::sync::Arc;

use anyhow::Result;
use aster_core::snapshot::recorder::record_snapshot;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::state::ServerState;

/// Runs the balance recorder on `expression` (six-field cron syntax).
pub fn job_record_snapshot(state: Arc<ServerState>, expression: &str) -> Result<Job> {
    Job::new_async(expression, move |_uuid, _l| {
        let state = state.clone();
        Box::pin(async move {
            match record_snapshot(
                state.moralis(),
                state.store(),
                &state.config().agent_wallet,
            )
            .await
            {
                Ok(snapshot) => log::info!("Scheduled balance snapshot {} saved", snapshot.id),
                Err(e) => log::error!("Scheduled balance snapshot failed: {}", e),
            }
        })
    })
    .map_err(|e| anyhow::anyhow!("Invalid SNAPSHOT_CRON expression '{}': {}", expression, e))
}

pub async fn schedule_jobs(state: Arc<ServerState>, expression: &str) -> Result<JobScheduler> {
    log::info!("Initializing job scheduler...");

    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create job scheduler: {}", e))?;

    let job = job_record_snapshot(state, expression)?;

    if let Err(e) = scheduler.add(job).await {
        log::error!("Failed to add balance snapshot job to scheduler: {}", e);
        return Err(anyhow::anyhow!("Failed to add balance snapshot job: {}", e));
    }

    if let Err(e) = scheduler.start().await {
        log::error!("Failed to start job scheduler: {}", e);
        return Err(anyhow::anyhow!("Failed to start scheduler: {}", e));
    }

    log::info!("Balance snapshot job scheduled with '{}'", expression);
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::{config::Config, snapshot::storage::SledSnapshotStore};
    use tempfile::TempDir;

    fn test_state(temp: &TempDir) -> Arc<ServerState> {
        let config = Config::from_lookup(|key| match key {
            "AGENT_WALLET" => Some("0xagent".to_string()),
            "MORALIS_API_KEY" => Some("moralis-key".to_string()),
            "CRON_SECRET" => Some("cron-secret".to_string()),
            _ => None,
        })
        .unwrap();
        let store = Arc::new(SledSnapshotStore::new(sled::open(temp.path()).unwrap()));

        Arc::new(ServerState::from_config(config, store).unwrap())
    }

    #[tokio::test]
    async fn test_job_accepts_six_field_expression() {
        let temp = TempDir::new().unwrap();

        assert!(job_record_snapshot(test_state(&temp), "0 */15 * * * *").is_ok());
    }

    #[tokio::test]
    async fn test_job_rejects_invalid_expression() {
        let temp = TempDir::new().unwrap();

        let Err(err) = job_record_snapshot(test_state(&temp), "every now and then") else {
            panic!("malformed cron expression was accepted");
        };

        assert!(err.to_string().contains("SNAPSHOT_CRON"));
    }
}
