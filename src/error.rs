//! Build failure taxonomy.
//!
//! Every variant is fatal to the current invocation. Auxiliary command
//! failures are not errors: they are collected in the build report.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a [`BuildError`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Filesystem,
    Subprocess,
    Bootstrap,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no input files given!")]
    NoInputFiles,

    #[error("no valid compiler given!")]
    NoCompiler,

    #[error("invalid project file {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("could not determine file statistics for '{path}'")]
    Stat {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("could not create output directory '{path}'")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        cause: io::Error,
    },

    #[error("error during compilation ({})", describe_code(.code))]
    Compile { code: Option<i32> },

    #[error("self source '{path}' does not exist")]
    MissingSelfSource { path: PathBuf },

    #[error("failed to rebuild '{binary}' from '{self_source}' ({})", describe_code(.code))]
    SelfRebuild {
        self_source: PathBuf,
        binary: PathBuf,
        code: Option<i32>,
    },
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::NoInputFiles | BuildError::NoCompiler | BuildError::Manifest { .. } => {
                ErrorKind::Configuration
            }
            BuildError::Stat { .. } | BuildError::CreateOutputDir { .. } => ErrorKind::Filesystem,
            BuildError::Spawn { .. } | BuildError::Compile { .. } => ErrorKind::Subprocess,
            BuildError::MissingSelfSource { .. } | BuildError::SelfRebuild { .. } => {
                ErrorKind::Bootstrap
            }
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
