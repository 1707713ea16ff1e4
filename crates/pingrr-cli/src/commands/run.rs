use crate::commands::build_orchestrator;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use owo_colors::OwoColorize;
use pingrr_config::Config;
use pingrr_core::{PassStatus, RunSummary};

pub async fn run_once(config: &Config, dry_run: bool, output: &Output) -> Result<()> {
    let orchestrator = build_orchestrator(config, dry_run)?;
    if orchestrator.is_dry_run() {
        output.warn("Dry run: nothing will be sent to Sonarr or Radarr");
    }

    let summary = orchestrator.run().await;
    print_summary(&summary, output)
}

pub fn print_summary(summary: &RunSummary, output: &Output) -> Result<()> {
    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(summary)?);
        return Ok(());
    }

    for pass in &summary.passes {
        let kind = pass.kind.plural();
        match &pass.status {
            PassStatus::Completed(report) => {
                let stats = &report.filter;
                output.success(format!(
                    "{}: {} of {} added to {}",
                    kind.bold(),
                    report.result.added_count(),
                    report.result.attempted(),
                    report.service
                ));
                output.info(format!(
                    "  fetched {}, already held {}, rejected {}, duplicates {}, malformed {}",
                    stats.fetched, stats.already_held, stats.rejected, stats.duplicates, stats.malformed
                ));
                for candidate in report.result.added() {
                    output.info(format!("  {} {} ({})", "+".green(), candidate.title, candidate.year));
                }
                for candidate in report.result.failed() {
                    output.error(format!("  failed to add {} ({})", candidate.title, candidate.year));
                }
            }
            PassStatus::Failed { stage, error, .. } => {
                output.error(format!("{}: {} failed: {}", kind, stage, error));
            }
            PassStatus::Skipped { reason } => {
                output.info(format!("{}: skipped, {}", kind, reason.dimmed()));
            }
        }
    }

    if summary.dry_run {
        output.warn("Dry run: the items above were not sent");
    }
    Ok(())
}
