//! GitHub Actions workflow commands
//!
//! Workflow commands are stdout lines the runner interprets; `::warning::`
//! surfaces a message as an annotation on the job without failing it.

/// Emits a warning annotation for the current job.
pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Command data escaping: `%`, CR and LF would otherwise terminate or
/// corrupt the command line. `%` must be escaped first.
fn escape_data(raw: &str) -> String {
    raw.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
