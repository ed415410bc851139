// src/readiness/reporter.rs
use crate::check::CheckError;
use crate::config::DEFAULT_ALIAS;
use console::{style, Term};
use std::time::Duration;
use tracing::warn;

/// Human-facing progress lines. Purely informational; nothing reads them back.
pub trait Reporter: Send + Sync {
    fn waiting(&self, alias: &str);
    fn unavailable(&self, alias: &str, error: &CheckError, retry_in: Duration);
    fn available(&self, alias: &str);
}

/// Writes progress to stdout, success in green.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn write_line(&self, line: &str) {
        if let Err(e) = self.term.write_line(line) {
            warn!("Failed to write progress line: {}", e);
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Reporter for ConsoleReporter {
    fn waiting(&self, alias: &str) {
        self.write_line(&waiting_line(alias));
    }

    fn unavailable(&self, alias: &str, _error: &CheckError, retry_in: Duration) {
        self.write_line(&unavailable_line(alias, retry_in));
    }

    fn available(&self, alias: &str) {
        self.write_line(&style(available_line(alias)).green().to_string());
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn waiting(&self, _alias: &str) {}
    fn unavailable(&self, _alias: &str, _error: &CheckError, _retry_in: Duration) {}
    fn available(&self, _alias: &str) {}
}

/// The `default` alias stays implicit; any other alias is named.
fn subject(alias: &str) -> String {
    if alias == DEFAULT_ALIAS {
        "database".to_string()
    } else {
        format!("database '{}'", alias)
    }
}

fn capitalized_subject(alias: &str) -> String {
    let subject = subject(alias);
    format!("D{}", &subject[1..])
}

pub(crate) fn waiting_line(alias: &str) -> String {
    format!("Waiting for {}...", subject(alias))
}

pub(crate) fn unavailable_line(alias: &str, retry_in: Duration) -> String {
    format!(
        "{} unavailable, waiting {}...",
        capitalized_subject(alias),
        format_delay(retry_in)
    )
}

pub(crate) fn available_line(alias: &str) -> String {
    format!("{} available!", capitalized_subject(alias))
}

pub(crate) fn format_delay(delay: Duration) -> String {
    if delay.subsec_nanos() != 0 {
        return format!("{}ms", delay.as_millis());
    }
    match delay.as_secs() {
        1 => "1 second".to_string(),
        secs => format!("{} seconds", secs),
    }
}
