use crate::error::BuildError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Modification time of a path, taken at the moment of the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStamp {
    pub path: PathBuf,
    /// `None` when the path does not exist.
    pub modified: Option<i64>,
}

impl FileStamp {
    pub fn exists(&self) -> bool {
        self.modified.is_some()
    }

    /// True when both stamps exist and `self` is strictly newer.
    pub fn is_newer_than(&self, other: &FileStamp) -> bool {
        match (self.modified, other.modified) {
            (Some(mine), Some(theirs)) => mine > theirs,
            _ => false,
        }
    }
}

/// Stats `path`. A missing path yields an absent stamp; any other stat
/// failure (permissions, I/O) is an error.
pub fn probe(path: impl AsRef<Path>) -> Result<FileStamp, BuildError> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(FileStamp {
                path: path.to_path_buf(),
                modified: None,
            });
        }
        Err(cause) => {
            return Err(BuildError::Stat {
                path: path.to_path_buf(),
                cause,
            });
        }
    };

    let modified = metadata.modified().map_err(|cause| BuildError::Stat {
        path: path.to_path_buf(),
        cause,
    })?;

    // Whole seconds; pre-epoch times come out negative.
    let seconds = match modified.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    };

    Ok(FileStamp {
        path: path.to_path_buf(),
        modified: Some(seconds),
    })
}
