use std::io::Write;

use engine_logging::engine_warn;
use speakpage_engine::Notifier;

/// Prints relay failure notifications to stderr, next to the popup output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, message: &str) {
        let mut stderr = std::io::stderr().lock();
        if writeln!(stderr, "[{title}] {message}").is_err() {
            engine_warn!("Could not show notification: {}", message);
        }
    }
}
