//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! OTP records are never deleted on the request path, so an hourly sweep
//! removes rows that are used or long expired.

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::auth::models::Otp;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // OTP retention sweep - runs every hour
    let purge_pool = pool.clone();
    let purge_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let pool = purge_pool.clone();
        Box::pin(async move {
            if let Err(e) = run_otp_purge(&pool).await {
                tracing::error!("OTP purge task failed: {}", e);
            }
        })
    })?;

    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (OTP retention sweep every hour)");
    Ok(scheduler)
}

/// Delete stale OTP records
async fn run_otp_purge(pool: &PgPool) -> Result<()> {
    let removed = Otp::purge_stale(pool).await?;

    if removed > 0 {
        tracing::info!("Purged {} stale OTP records", removed);
    }

    Ok(())
}
