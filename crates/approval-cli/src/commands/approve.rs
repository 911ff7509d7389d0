//! Promotes received files after review.

use crate::cli::CaseArgs;
use crate::context::{single_request, HarnessContext};
use crate::error::{CliError, CliResult};
use crate::utils::ColoredOutput;
use tracing::info;

pub struct ApproveCommand;

impl ApproveCommand {
    pub fn run(ctx: &HarnessContext, case: &CaseArgs, all: bool) -> CliResult<()> {
        let store = ctx.store()?;

        let paths = match single_request(case)? {
            Some(request) => vec![(request.to_string(), store.resolve_path(&request))],
            None if all => store
                .pending()?
                .into_iter()
                .map(|p| (p.request.to_string(), p.path))
                .collect(),
            None => {
                return Err(CliError::InvalidArgument(
                    "pass --component and --variant, or --all".to_string(),
                ))
            }
        };

        if paths.is_empty() {
            println!("{}", ColoredOutput::dim("Nothing to approve"));
            return Ok(());
        }

        for (name, path) in &paths {
            store.promote(path)?;
            println!("{} {}", ColoredOutput::success("APPROVED"), name);
        }
        info!(count = paths.len(), "approved received files");
        Ok(())
    }
}
