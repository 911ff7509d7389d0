pub mod approve;
pub mod render;
pub mod reporters;
pub mod status;
pub mod verify;

// Re-export command handlers
pub use approve::ApproveCommand;
pub use render::RenderCommand;
pub use reporters::ReportersCommand;
pub use status::StatusCommand;
pub use verify::{VerifyCommand, VerifySummary};
