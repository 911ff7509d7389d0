pub mod error;
pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, FileFormat};
pub use schema::{CaseConfig, HarnessConfig, DEFAULT_MISMATCH_LOG};
