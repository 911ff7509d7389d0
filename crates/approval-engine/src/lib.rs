//! Approval engine and per-case harness.
//!
//! One case flows forward: locate the artifact, extract its surface, compare
//! with the approved baseline, and on mismatch persist the received text and
//! hand both paths to the reporter.

pub mod engine;
pub mod error;
pub mod harness;

pub use engine::{ApprovalEngine, Approved};
pub use error::{ApprovalError, ApprovalResult, Mismatch, MismatchKind};
pub use harness::{ApprovalHarness, CaseOutcome};
