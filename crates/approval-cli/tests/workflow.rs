use approval_cli::cli::{CaseArgs, GlobalArgs};
use approval_cli::commands::{ApproveCommand, VerifyCommand, VerifySummary};
use approval_cli::context::HarnessContext;
use approval_cli::CliError;
use approval_core::BuildConfiguration;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_artifact(artifacts: &Path, component: &str, variant: &str, methods: &[&str]) {
    let members: Vec<_> = methods
        .iter()
        .map(|m| json!({"name": m, "kind": "method", "visibility": "public", "signature": "(&self)"}))
        .collect();
    let doc = json!({
        "format_version": 1,
        "component": component,
        "modules": [{
            "path": "widget",
            "types": [{"name": component, "kind": "struct", "visibility": "public", "members": members}]
        }]
    });
    let dir = artifacts.join("debug").join(variant);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{component}.json")), doc.to_string()).unwrap();
}

fn context(source: &TempDir, artifacts: &TempDir, reporter: &str) -> HarnessContext {
    let args = GlobalArgs {
        source_root: Some(source.path().to_path_buf()),
        artifacts_root: Some(artifacts.path().to_path_buf()),
        configuration: Some("debug".to_string()),
        reporter: Some(reporter.to_string()),
        ..GlobalArgs::default()
    };
    HarnessContext::load(&args).unwrap()
}

fn write_artifact_in(
    artifacts: &Path,
    configuration: &str,
    component: &str,
    variant: &str,
) {
    let doc = json!({
        "format_version": 1,
        "component": component,
        "modules": [{"path": "widget"}]
    });
    let dir = artifacts.join(configuration).join(variant);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{component}.json")), doc.to_string()).unwrap();
}

fn widget_case() -> CaseArgs {
    CaseArgs {
        component: Some("Widget".to_string()),
        variant: Some("v1".to_string()),
    }
}

#[tokio::test]
async fn verify_fails_until_received_file_is_approved() {
    let source = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    write_artifact(artifacts.path(), "Widget", "v1", &["run"]);
    let ctx = context(&source, &artifacts, "Quiet");

    let err = VerifyCommand::run(&ctx, &widget_case(), 2).await.unwrap_err();
    assert!(matches!(err, CliError::CasesFailed { failed: 1, total: 1 }));

    let received = source.path().join("ApprovedApi/Widget/v1.received.txt");
    assert_eq!(
        fs::read_to_string(&received).unwrap(),
        "pub mod widget\npub struct widget::Widget\npub fn widget::Widget::run(&self)\n"
    );

    ApproveCommand::run(&ctx, &widget_case(), false).unwrap();
    assert!(!received.exists());
    assert!(source.path().join("ApprovedApi/Widget/v1.approved.txt").exists());

    VerifyCommand::run(&ctx, &widget_case(), 2).await.unwrap();

    write_artifact(artifacts.path(), "Widget", "v1", &["run", "stop"]);
    assert!(VerifyCommand::run(&ctx, &widget_case(), 2).await.is_err());
    assert!(fs::read_to_string(&received)
        .unwrap()
        .contains("pub fn widget::Widget::stop(&self)"));
}

#[tokio::test]
async fn run_cases_keeps_request_order() {
    let source = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    let ctx = context(&source, &artifacts, "Quiet");
    let harness = Arc::new(ctx.harness().unwrap());

    let mut requests = Vec::new();
    for variant in ["v1", "v2", "v3", "v4"] {
        write_artifact(artifacts.path(), "Widget", variant, &["run"]);
        requests.push(approval_core::ApprovalRequest::new("Widget", variant).unwrap());
    }
    // No artifact for this one: a load error, not a mismatch.
    requests.push(approval_core::ApprovalRequest::new("Gadget", "v1").unwrap());

    let outcomes = VerifyCommand::run_cases(harness, requests.clone(), 3).await.unwrap();
    let order: Vec<_> = outcomes.iter().map(|o| o.request.clone()).collect();
    assert_eq!(order, requests);
    assert_eq!(
        VerifySummary::from_outcomes(&outcomes),
        VerifySummary { passed: 0, failed: 5 }
    );
    assert!(outcomes[4].result.as_ref().unwrap_err().as_mismatch().is_none());
}

#[tokio::test]
async fn verify_without_configuration_uses_cargo_profile() {
    let source = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    let profile = BuildConfiguration::from_cargo_layout(&std::env::current_exe().unwrap())
        .unwrap();
    write_artifact_in(artifacts.path(), profile.as_str(), "Widget", "v1");

    let args = GlobalArgs {
        source_root: Some(source.path().to_path_buf()),
        artifacts_root: Some(artifacts.path().to_path_buf()),
        reporter: Some("Quiet".to_string()),
        ..GlobalArgs::default()
    };
    let ctx = HarnessContext::load(&args).unwrap();
    assert_eq!(ctx.config.configuration, None);

    let outcomes = VerifyCommand::run_cases(
        Arc::new(ctx.harness().unwrap()),
        vec![approval_core::ApprovalRequest::new("Widget", "v1").unwrap()],
        1,
    )
    .await
    .unwrap();
    // Found the artifact; fails only because nothing is approved yet.
    let err = outcomes[0].result.as_ref().unwrap_err();
    assert!(err.as_mismatch().is_some(), "{err}");
}

#[test]
fn unknown_reporter_fails_before_any_case() {
    let source = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();
    let ctx = context(&source, &artifacts, "NoSuchReporter");

    match ctx.harness() {
        Err(CliError::Approval(err)) => assert!(err.is_configuration()),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("unknown reporter accepted"),
    }
}
