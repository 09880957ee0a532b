//! Output rendering for detection reports

pub mod formatter;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter, ReportGenerator};
