// src/cli/mod.rs
pub mod args;
pub mod wait_for_db;

pub use args::{Args, Command, WaitForDbArgs};
