//! # gaia - Self-hosting Build Driver
//!
//! gaia builds one artifact from a flat list of source files and flags.
//! Before it touches the project it checks whether its own binary is
//! older than its own source, and if so rebuilds and relaunches itself,
//! so edits to the build description apply on the next run.
//!
//! ## Quick Start
//!
//! ```toml
//! # gaia.toml
//! files = ["main.cpp"]
//! flags = ["-Wall", "-Wextra"]
//! commands = ["echo hi"]
//! ```
//!
//! ```bash
//! gaia          # compile if anything changed
//! gaia --force  # compile regardless
//! gaia --echo   # also print the raw command lines
//! ```
//!
//! The same flow is available as a library:
//!
//! ```no_run
//! use gaia::build::{BuildOutcome, SystemRunner, build_project};
//! use gaia::config::BuildConfig;
//!
//! let mut config = BuildConfig::new();
//! config.add_file("main.cpp").add_flags(["-Wall", "-Wextra"]);
//! match build_project(&config, &mut SystemRunner)? {
//!     BuildOutcome::Relaunched { code } => std::process::exit(code),
//!     BuildOutcome::Finished(report) => println!("compiled: {}", report.compiled),
//! }
//! # Ok::<(), gaia::error::BuildError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Staleness, command synthesis, self-rebuild and the build sequence
//! - [`config`] - Build configuration and `gaia.toml` schema
//! - [`error`] - Fatal error taxonomy

/// Build sequence and its building blocks.
pub mod build;

/// Build configuration (`gaia.toml`).
pub mod config;

/// Fatal build errors.
pub mod error;

/// Terminal diagnostics.
pub mod ui;
