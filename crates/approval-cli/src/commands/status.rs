use crate::context::HarnessContext;
use crate::error::CliResult;
use crate::utils::ColoredOutput;

pub struct StatusCommand;

impl StatusCommand {
    /// Lists received files waiting for review.
    pub fn run(ctx: &HarnessContext) -> CliResult<()> {
        let store = ctx.store()?;
        let pending = store.pending()?;
        let approved = store.baselines()?;

        println!(
            "{} approved baselines under {}",
            approved.len(),
            ColoredOutput::highlight(&store.root().display().to_string())
        );
        if pending.is_empty() {
            println!("{}", ColoredOutput::dim("No pending received files"));
            return Ok(());
        }

        println!("{}", ColoredOutput::warning("Pending review:"));
        for item in &pending {
            println!("  {}  {}", item.request, item.path.received().display());
        }
        Ok(())
    }
}
