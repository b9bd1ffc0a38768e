//! Background job scheduler.
//!
//! Re-reads every source on a cron schedule and swaps the result into the
//! shared [`ProfileStore`].

use std::sync::Arc;

use infldb_ingest::ProfileLoader;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::store::ProfileStore;

/// Builds and starts the scheduler with the profile reload job registered.
///
/// The returned handle must be kept alive for the lifetime of the process;
/// dropping it shuts the job down.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// `cron` is not a valid six-field expression, or the scheduler fails to
/// start.
pub async fn build_scheduler(
    store: Arc<ProfileStore>,
    loader: Arc<ProfileLoader>,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_reload_job(&scheduler, store, loader, cron).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_reload_job(
    scheduler: &JobScheduler,
    store: Arc<ProfileStore>,
    loader: Arc<ProfileLoader>,
    cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let store = Arc::clone(&store);
        let loader = Arc::clone(&loader);

        Box::pin(async move {
            tracing::info!("scheduler: reloading profile sources");
            // Failures are logged by the store; the old snapshot keeps serving.
            let _ = store.reload(&loader).await;
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron, "scheduler: profile reload job registered");
    Ok(())
}
