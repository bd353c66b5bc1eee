//! `transmission-remote` adapter: command construction, subprocess execution,
//! and report parsing for the housekeeping engine.
#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

/// Remote-console implementation over the external tool.
pub mod console;
/// Report parsing for listing and detail output.
pub mod parse;
/// Subprocess execution with a fixed deadline.
pub mod runner;

pub use console::{ConnectProfile, TransmissionConsole};
pub use runner::{COMMAND_TIMEOUT_MS, CommandRunner, ShellRunner};
