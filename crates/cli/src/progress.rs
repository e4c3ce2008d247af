// crates/cli/src/progress.rs
//! Console reporting: per-target summary lines and a transfer progress bar

use console::Term;
use mcsync_core::pretty_epoch;
use mcsync_sync_engine::{SyncDecision, SyncError, SyncObserver, TargetReport};

const BAR_LENGTH: usize = 75;

/// Renders engine events to the terminal.
///
/// In plain mode only the summary and error lines are printed; the
/// carriage-return progress bar is suppressed so output stays one line per
/// event when piped into a file.
pub struct ConsoleReporter {
    term: Term,
    plain: bool,
}

impl ConsoleReporter {
    pub fn new(plain: bool) -> Self {
        Self {
            term: Term::stdout(),
            plain,
        }
    }
}

impl SyncObserver for ConsoleReporter {
    fn target_started(&self, report: &TargetReport<'_>) {
        let target = report.target;
        let status = match report.decision {
            SyncDecision::Download if report.local_time.is_none() => {
                "No local file. Downloading..."
            }
            SyncDecision::Download => "Remote is newer. Downloading...",
            SyncDecision::Upload => "Local is newer. Uploading...",
            SyncDecision::NoOp => "Files are in sync",
        };

        let line = format!(
            "[{}/{}]: {} {} <--> {} {} | {}",
            report.index + 1,
            report.total,
            pretty_epoch(report.local_time.unwrap_or(0)),
            target.local_file_name(),
            target.remote_file_name(),
            pretty_epoch(report.remote_time),
            status
        );
        let _ = self.term.write_line(&line);
    }

    fn transfer_progress(&self, transferred: u64, total: u64) {
        if self.plain {
            return;
        }
        let bar = render_bar(transferred, total, BAR_LENGTH);
        let _ = self.term.write_str(&format!("\r{bar}"));
    }

    fn transfer_finished(&self) {
        if !self.plain {
            let _ = self.term.write_line("");
        }
    }

    fn target_failed(&self, remote_path: &str, error: &SyncError) {
        if !self.plain {
            let _ = self.term.clear_line();
        }
        let _ = self
            .term
            .write_line(&format!("Error syncing file {remote_path}: {error}"));
    }
}

fn bar_glyphs() -> (char, char) {
    if cfg!(windows) {
        ('#', '-')
    } else {
        ('\u{2588}', '\u{2591}')
    }
}

/// Renders a fixed-width bar with a rounded percent suffix.
fn render_bar(progress: u64, total: u64, length: usize) -> String {
    let (block, shade) = bar_glyphs();

    if total == 0 {
        let bar: String = std::iter::repeat(block).take(length).collect();
        return format!("{bar} 100%");
    }

    let done = progress.min(total);
    let filled = ((length as u64 * done) / total) as usize;
    let percent = ((100 * done) as f64 / total as f64).round() as u64;

    let bar: String = std::iter::repeat(block)
        .take(filled)
        .chain(std::iter::repeat(shade).take(length - filled))
        .collect();
    format!("{bar} {percent}%")
}
