use crate::config::BuildConfig;
use crate::error::BuildError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

pub const PROJECT_FILE: &str = "gaia.toml";

// --- Helper: Load Project File ---
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} not found.\n\n\
            💡 Tip: create one listing at least `files = [\"main.cpp\"]`.",
            path.display()
        ));
    }
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;

    let config: BuildConfig = toml::from_str(&config_str).map_err(|e| BuildError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string().trim().to_string(),
    })?;

    Ok(config)
}

// --- Helper: Check if a command exists ---
fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Configured compiler, else `$CXX`, else the first of clang++/g++ on PATH.
pub fn resolve_compiler(config: &BuildConfig) -> Result<String, BuildError> {
    resolve_compiler_with(config, std::env::var("CXX").ok(), is_command_available)
}

fn resolve_compiler_with(
    config: &BuildConfig,
    env_cxx: Option<String>,
    available: impl Fn(&str) -> bool,
) -> Result<String, BuildError> {
    if !config.compiler.is_empty() {
        return Ok(config.compiler.clone());
    }

    if let Some(cxx) = env_cxx.filter(|c| !c.trim().is_empty()) {
        return Ok(cxx);
    }

    ["clang++", "g++"]
        .into_iter()
        .find(|candidate| available(candidate))
        .map(str::to_string)
        .ok_or(BuildError::NoCompiler)
}
