//! Self-rebuild protocol.
//!
//! Before doing any project work the driver compares its own source with
//! its own binary. When the source is strictly newer (or the binary is
//! missing) it rebuilds the binary, runs the fresh copy with the same
//! flags and reports the child's exit code so the caller can terminate.
//! The child is marked with [`RELAUNCH_GUARD`] and never relaunches again,
//! which keeps a skewed clock from looping forever.

use super::probe::probe;
use super::runner::{Runner, ShellRequest};
use crate::error::BuildError;
use crate::ui;
use std::path::{Path, PathBuf};

/// Set in the environment of a relaunched driver.
pub const RELAUNCH_GUARD: &str = "GAIA_BOOTSTRAPPED";

/// Paths and tools the protocol needs, with the compiler already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPaths {
    pub source: PathBuf,
    pub binary: PathBuf,
    pub compiler: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    UpToDate,
    /// The fresh binary ran; the current process must exit with `code`.
    Relaunched { code: i32 },
}

/// True when the binary is missing or older than its source.
pub fn is_stale(source: &Path, binary: &Path) -> Result<bool, BuildError> {
    let source_stamp = probe(source)?;
    let binary_stamp = probe(binary)?;

    if !source_stamp.exists() {
        return Err(BuildError::MissingSelfSource {
            path: source.to_path_buf(),
        });
    }

    Ok(!binary_stamp.exists() || source_stamp.is_newer_than(&binary_stamp))
}

/// `<compiler> -o <binary> <source>`.
pub fn rebuild_command(paths: &SelfPaths) -> String {
    format!(
        "{} -o {} {}",
        paths.compiler,
        paths.binary.display(),
        paths.source.display()
    )
}

/// `<binary> [args...]`, with `./` added to bare relative names so the
/// shell does not search PATH.
pub fn relaunch_command(binary: &Path, args: &[String]) -> String {
    let program = if binary.is_absolute() || binary.components().count() > 1 {
        binary.display().to_string()
    } else {
        format!("./{}", binary.display())
    };

    std::iter::once(program)
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ensure_self_up_to_date<R: Runner>(
    paths: &SelfPaths,
    relaunch_args: &[String],
    runner: &mut R,
) -> Result<BootstrapOutcome, BuildError> {
    if !is_stale(&paths.source, &paths.binary)? {
        return Ok(BootstrapOutcome::UpToDate);
    }

    ui::info(&format!("recompiling {}", paths.binary.display()));
    let status = runner.run(&ShellRequest::new(rebuild_command(paths)))?;
    if !status.success() {
        return Err(BuildError::SelfRebuild {
            self_source: paths.source.clone(),
            binary: paths.binary.clone(),
            code: status.code,
        });
    }

    let relaunch = ShellRequest::new(relaunch_command(&paths.binary, relaunch_args))
        .env(RELAUNCH_GUARD, "1");
    let status = runner.run(&relaunch)?;

    Ok(BootstrapOutcome::Relaunched {
        code: status.code.unwrap_or(1),
    })
}
