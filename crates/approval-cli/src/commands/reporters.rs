use crate::context::HarnessContext;
use crate::error::CliResult;
use crate::utils::ColoredOutput;

pub struct ReportersCommand;

impl ReportersCommand {
    /// Lists registered reporters and marks the one this run would use.
    pub fn run(ctx: &HarnessContext) -> CliResult<()> {
        let registry = ctx.registry();
        let active = registry.resolve(&ctx.settings)?;

        for name in registry.names() {
            let marker = if name == active.name() { "*" } else { " " };
            println!("{} {}", marker, ColoredOutput::highlight(&name));
        }
        Ok(())
    }
}
