// src/lib.rs
pub mod check;
pub mod cli;
pub mod config;
pub mod readiness;
pub mod retry;
