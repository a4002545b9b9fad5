use super::command::{artifact_path, input_paths};
use super::probe::probe;
use crate::config::BuildConfig;
use crate::error::BuildError;

/// Why a rebuild is (or is not) needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Forced,
    MissingArtifact,
    /// A declared input vanished; the compiler gets to report it.
    MissingInput(String),
    NewerInput(String),
    UpToDate,
}

impl Staleness {
    pub fn needs_rebuild(&self) -> bool {
        !matches!(self, Staleness::UpToDate)
    }
}

/// Checks the artifact against every declared input, first trigger wins.
/// Inputs are compared one level deep only, headers are not tracked.
pub fn check_staleness(config: &BuildConfig) -> Result<Staleness, BuildError> {
    if config.force_rebuild {
        return Ok(Staleness::Forced);
    }

    let artifact = probe(artifact_path(config))?;
    if !artifact.exists() {
        return Ok(Staleness::MissingArtifact);
    }

    for input in input_paths(config) {
        let stamp = probe(&input)?;
        if !stamp.exists() {
            return Ok(Staleness::MissingInput(input));
        }
        if stamp.is_newer_than(&artifact) {
            return Ok(Staleness::NewerInput(input));
        }
    }

    Ok(Staleness::UpToDate)
}

pub fn needs_rebuild(config: &BuildConfig) -> Result<bool, BuildError> {
    Ok(check_staleness(config)?.needs_rebuild())
}
