// src/readiness/mod.rs
mod poller;
mod reporter;

pub use poller::{wait_for_database, PollState, ReadinessPoller};
pub use reporter::{ConsoleReporter, Reporter, SilentReporter};
