//! api-approval CLI main entry point

use approval_cli::{
    cli::{Cli, Commands},
    commands::{ApproveCommand, RenderCommand, ReportersCommand, StatusCommand, VerifyCommand},
    context::HarnessContext,
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose)?;

    if cli.global.no_color {
        colored::control::set_override(false);
    }

    debug!("api-approval v{}", env!("CARGO_PKG_VERSION"));

    let ctx = HarnessContext::load(&cli.global)?;

    match cli.command {
        Commands::Verify { case, jobs } => VerifyCommand::run(&ctx, &case, jobs).await,
        Commands::Render { component, variant } => RenderCommand::run(&ctx, &component, &variant),
        Commands::Approve { case, all } => ApproveCommand::run(&ctx, &case, all),
        Commands::Status => StatusCommand::run(&ctx),
        Commands::Reporters => ReportersCommand::run(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_parsing() {
        let cli = Cli::try_parse_from([
            "api-approval",
            "verify",
            "--component",
            "Widget",
            "--variant",
            "v1",
            "-j",
            "8",
            "--reporter",
            "Quiet",
        ])
        .unwrap();

        assert_eq!(cli.global.reporter.as_deref(), Some("Quiet"));
        if let Commands::Verify { case, jobs } = cli.command {
            assert_eq!(case.component.as_deref(), Some("Widget"));
            assert_eq!(case.variant.as_deref(), Some("v1"));
            assert_eq!(jobs, 8);
        } else {
            panic!("Expected Verify command");
        }
    }

    #[test]
    fn test_component_requires_variant() {
        assert!(Cli::try_parse_from(["api-approval", "verify", "--component", "Widget"]).is_err());
    }

    #[test]
    fn test_approve_all_conflicts_with_case() {
        assert!(Cli::try_parse_from([
            "api-approval",
            "approve",
            "--all",
            "--component",
            "Widget",
            "--variant",
            "v1"
        ])
        .is_err());

        let cli = Cli::try_parse_from(["api-approval", "approve", "--all"]).unwrap();
        assert!(matches!(cli.command, Commands::Approve { all: true, .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "api-approval",
            "status",
            "--source-root",
            "/repo/tests",
            "--configuration",
            "release",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(
            cli.global.source_root.as_deref(),
            Some(std::path::Path::new("/repo/tests"))
        );
        assert_eq!(cli.global.configuration.as_deref(), Some("release"));
        assert!(cli.global.no_color);
        assert!(matches!(cli.command, Commands::Status));
    }
}
