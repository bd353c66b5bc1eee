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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Sweep agent wiring for a Transmission daemon.
//!
//! Layout: `bootstrap.rs` (configuration and console wiring), `sweep.rs`
//! (the torrent evaluation cycle), `error.rs` (application errors).

/// Application bootstrap and configuration loading.
pub mod bootstrap;
/// Application-level errors.
pub mod error;
/// Torrent evaluation and clearing cycle.
pub mod sweep;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
pub use sweep::{SweepEngine, SweepReport, SweepSettings};
