use crate::context::HarnessContext;
use crate::error::CliResult;
use approval_core::ApprovalRequest;

pub struct RenderCommand;

impl RenderCommand {
    /// Prints the candidate surface exactly as it would be compared.
    pub fn run(ctx: &HarnessContext, component: &str, variant: &str) -> CliResult<()> {
        let request = ApprovalRequest::new(component, variant)?;
        let harness = ctx.harness()?;
        print!("{}", harness.render(&request)?);
        Ok(())
    }
}
