pub mod console;
pub mod diff;
pub mod error;
pub mod launcher;
pub mod log;
pub mod registry;
pub mod reporter;

// Re-export commonly used types
pub use console::ConsoleReporter;
pub use diff::{DiffReporter, DiffTool, DiffToolDetector, PathDiffToolDetector};
pub use error::{ReporterError, ReporterResult};
pub use launcher::FileLauncherReporter;
pub use log::{LogReporter, MismatchRecord};
pub use registry::{
    normalize_reporter_name, ReporterContext, ReporterFactory, ReporterRegistry,
    DEFAULT_NAMESPACE, REPORTER_SUFFIX,
};
pub use reporter::{CommandLineReporter, QuietReporter, Reporter};

