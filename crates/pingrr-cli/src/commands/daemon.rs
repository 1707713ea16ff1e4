use crate::commands::build_orchestrator;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use pingrr_config::{default_scheduler_config, Config, SchedulerConfig};
use pingrr_core::Orchestrator;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

/// Effective scheduler settings after command-line overrides
fn resolve_scheduler(config: &Config, schedule_override: Option<String>, no_startup_run: bool) -> SchedulerConfig {
    let from_file = config.scheduler.clone().unwrap_or_else(default_scheduler_config);
    SchedulerConfig {
        schedule: schedule_override.unwrap_or(from_file.schedule),
        run_on_startup: from_file.run_on_startup && !no_startup_run,
    }
}

async fn run_and_log(orchestrator: &Orchestrator, operation: &'static str) {
    let summary = orchestrator.run().await;
    info!(
        operation,
        added = summary.total_added(),
        failed = summary.total_failed(),
        failed_passes = summary.failed_passes(),
        duration_ms = summary.duration_ms,
        "Scheduled run completed"
    );
}

pub async fn run_daemon(
    config: &Config,
    schedule_override: Option<String>,
    no_startup_run: bool,
    dry_run: bool,
    output: &Output,
) -> Result<()> {
    let scheduler_config = resolve_scheduler(config, schedule_override, no_startup_run);
    let orchestrator = Arc::new(build_orchestrator(config, dry_run)?);

    let mut scheduler = JobScheduler::new()
        .await
        .map_err(|e| eyre!("Failed to create scheduler: {:?}", e))?;

    let job_orchestrator = orchestrator.clone();
    let job = Job::new_async(scheduler_config.schedule.as_str(), move |_uuid, _scheduler| {
        let orchestrator = job_orchestrator.clone();
        Box::pin(async move {
            info!(operation = "scheduled_run_start", "Starting scheduled run");
            run_and_log(&orchestrator, "scheduled_run_complete").await;
        })
    })
    .map_err(|e| eyre!("Invalid schedule '{}': {:?}", scheduler_config.schedule, e))?;

    scheduler
        .add(job)
        .await
        .map_err(|e| eyre!("Failed to register scheduled run: {:?}", e))?;

    if scheduler_config.run_on_startup {
        info!(operation = "scheduler_startup", "Running on startup");
        run_and_log(&orchestrator, "startup_run_complete").await;
    }

    scheduler
        .start()
        .await
        .map_err(|e| eyre!("Failed to start scheduler: {:?}", e))?;
    info!(
        operation = "scheduler_started",
        schedule = %scheduler_config.schedule,
        dry_run = orchestrator.is_dry_run(),
        "Scheduler started"
    );
    output.info(format!(
        "Running on schedule '{}', press Ctrl+C to stop",
        scheduler_config.schedule
    ));

    tokio::signal::ctrl_c().await?;
    info!(operation = "scheduler_stopping", "Shutting down scheduler");
    scheduler
        .shutdown()
        .await
        .map_err(|e| eyre!("Failed to stop scheduler: {:?}", e))?;
    Ok(())
}
