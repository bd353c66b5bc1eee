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

//! Layered runtime configuration for the sweep agent.
//!
//! Layout: `model.rs` (typed settings and policies), `loader.rs` (defaults,
//! config file, environment merge and validation), `error.rs` (failure
//! taxonomy).

mod defaults;
pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load, load_from};
pub use model::{AppSettings, ErrorPolicy};
