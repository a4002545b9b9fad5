use crate::config::{BuildConfig, DEFAULT_OUTPUT_NAME};
use crate::error::BuildError;
use serde_json::json;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMPILE_DATABASE: &str = "compile_commands.json";

/// A fully synthesized compiler invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    line: String,
    output: String,
    inputs: Vec<String>,
}

impl CompileCommand {
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Artifact path the command writes.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Input paths in compile order, directory prefix included.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }
}

impl fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Appends a trailing separator unless `dir` is empty or already has one.
pub fn normalize_dir(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') || dir.ends_with(std::path::MAIN_SEPARATOR) {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

/// `<input_directory><file>` for every input file, in order.
pub fn input_paths(config: &BuildConfig) -> Vec<String> {
    let input_dir = normalize_dir(&config.input_directory);
    config
        .input_files
        .iter()
        .map(|file| format!("{}{}", input_dir, file))
        .collect()
}

/// `<output_directory><output_name>`. An empty name means `main`.
pub fn artifact_path(config: &BuildConfig) -> String {
    let name = if config.output_name.is_empty() {
        DEFAULT_OUTPUT_NAME
    } else {
        config.output_name.as_str()
    };
    format!("{}{}", normalize_dir(&config.output_directory), name)
}

/// Builds `<compiler> -o <artifact> [flags...] [files...]`. Empty flags
/// and files are dropped so the line never carries doubled spaces; the
/// `-o` operand is always present.
pub fn synthesize(config: &BuildConfig, compiler: &str) -> Result<CompileCommand, BuildError> {
    if config.input_files.is_empty() {
        return Err(BuildError::NoInputFiles);
    }

    let output = artifact_path(config);
    let inputs = input_paths(config);

    let mut line = format!("{} -o {}", compiler, output);
    for part in config.flags.iter().chain(inputs.iter()) {
        if !part.is_empty() {
            line.push(' ');
            line.push_str(part);
        }
    }

    Ok(CompileCommand {
        line,
        output,
        inputs,
    })
}

/// Writes `compile_commands.json` next to the artifact, one entry per input.
pub fn write_compile_database(
    command: &CompileCommand,
    output_dir: &Path,
    working_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let directory = working_dir.to_string_lossy();
    let entries: Vec<serde_json::Value> = command
        .inputs()
        .iter()
        .map(|file| {
            json!({
                "directory": directory,
                "command": command.as_str(),
                "file": file,
            })
        })
        .collect();

    let path = output_dir.join(COMPILE_DATABASE);
    fs::write(&path, serde_json::to_string_pretty(&entries)?)?;
    Ok(path)
}
