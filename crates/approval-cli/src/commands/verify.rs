//! Runs the case matrix.

use crate::cli::CaseArgs;
use crate::context::HarnessContext;
use crate::error::{CliError, CliResult};
use crate::utils::{format_duration, ColoredOutput};
use approval_core::ApprovalRequest;
use approval_engine::{ApprovalHarness, CaseOutcome};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Pass/fail counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifySummary {
    pub passed: usize,
    pub failed: usize,
}

impl VerifySummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn from_outcomes(outcomes: &[CaseOutcome]) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            passed,
            failed: outcomes.len() - passed,
        }
    }
}

pub struct VerifyCommand;

impl VerifyCommand {
    pub async fn run(ctx: &HarnessContext, case: &CaseArgs, jobs: usize) -> CliResult<()> {
        // Resolving the harness first surfaces an unknown reporter before any case runs.
        let harness = Arc::new(ctx.harness()?);
        let requests = ctx.requests(case)?;
        info!(cases = requests.len(), jobs, "verifying");

        let start = Instant::now();
        let outcomes = Self::run_cases(harness, requests, jobs).await?;
        let summary = VerifySummary::from_outcomes(&outcomes);

        for outcome in &outcomes {
            Self::print_outcome(outcome);
        }
        println!(
            "\n{} passed, {} failed ({})",
            ColoredOutput::success(&summary.passed.to_string()),
            if summary.failed > 0 {
                ColoredOutput::error(&summary.failed.to_string())
            } else {
                ColoredOutput::dim(&summary.failed.to_string())
            },
            format_duration(start.elapsed())
        );

        if summary.failed > 0 {
            return Err(CliError::CasesFailed {
                failed: summary.failed,
                total: summary.total(),
            });
        }
        Ok(())
    }

    /// Runs each case on the blocking pool, at most `jobs` at a time.
    /// Outcomes come back in request order.
    pub async fn run_cases(
        harness: Arc<ApprovalHarness>,
        requests: Vec<ApprovalRequest>,
        jobs: usize,
    ) -> CliResult<Vec<CaseOutcome>> {
        let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
        let mut handles = Vec::with_capacity(requests.len());

        for request in requests {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| CliError::General(e.to_string()))?;
            let harness = harness.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                debug!(%request, "case started");
                let result = harness.verify(&request);
                drop(permit);
                CaseOutcome { request, result }
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await?);
        }
        Ok(outcomes)
    }

    fn print_outcome(outcome: &CaseOutcome) {
        let name = outcome.request.to_string();
        match &outcome.result {
            Ok(_) => println!("{} {}", ColoredOutput::success("PASS"), name),
            Err(e) => match e.as_mismatch() {
                Some(mismatch) => {
                    println!("{} {}", ColoredOutput::error("FAIL"), name);
                    println!("     {}", ColoredOutput::dim(&mismatch.to_string()));
                }
                None => println!("{} {}: {}", ColoredOutput::warning("ERROR"), name, e),
            },
        }
    }
}
