//! Build configuration.
//!
//! [`BuildConfig`] is the project description handed to the orchestrator.
//! It is filled in either programmatically through the chainable setters
//! or from a `gaia.toml` project file, and is never modified by the build
//! itself.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_NAME: &str = "main";
pub const DEFAULT_SELF_SOURCE: &str = "gaia.rs";
pub const DEFAULT_SELF_BINARY: &str = "gaia";
pub const DEFAULT_SELF_COMPILER: &str = "rustc";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Compiler executable. Empty means "resolve at build time".
    #[serde(default)]
    pub compiler: String,
    #[serde(default = "default_output_name")]
    pub output_name: String,
    #[serde(default)]
    pub output_directory: String,
    #[serde(default)]
    pub input_directory: String,
    /// Compiled in this order. Duplicates are kept.
    #[serde(default, rename = "files")]
    pub input_files: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    /// Shell commands run after the compile decision.
    #[serde(default, rename = "commands")]
    pub auxiliary_commands: Vec<String>,
    #[serde(skip)]
    pub force_rebuild: bool,
    #[serde(skip)]
    pub verbose_echo: bool,
    #[serde(default)]
    pub bootstrap: Option<SelfBuild>,
}

/// Where the driver's own source and binary live, for self-rebuilds.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SelfBuild {
    #[serde(default = "default_self_source")]
    pub source: PathBuf,
    #[serde(default = "default_self_binary")]
    pub binary: PathBuf,
    /// See [`SelfBuild::compiler_for`] for the fallback when unset.
    #[serde(default)]
    pub compiler: Option<String>,
}

impl SelfBuild {
    /// Compiler for the self-rebuild. An explicit `compiler` wins; a `.rs`
    /// source gets `rustc`; anything else uses the project compiler.
    pub fn compiler_for(&self, project_compiler: &str) -> String {
        if let Some(compiler) = &self.compiler {
            return compiler.clone();
        }
        match self.source.extension().and_then(|ext| ext.to_str()) {
            Some("rs") => DEFAULT_SELF_COMPILER.to_string(),
            _ => project_compiler.to_string(),
        }
    }
}

impl Default for SelfBuild {
    fn default() -> Self {
        Self {
            source: default_self_source(),
            binary: default_self_binary(),
            compiler: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compiler: String::new(),
            output_name: default_output_name(),
            output_directory: String::new(),
            input_directory: String::new(),
            input_files: Vec::new(),
            flags: Vec::new(),
            auxiliary_commands: Vec::new(),
            force_rebuild: false,
            verbose_echo: false,
            bootstrap: None,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_compiler(&mut self, compiler: impl Into<String>) -> &mut Self {
        self.compiler = compiler.into();
        self
    }

    pub fn set_output_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.output_name = name.into();
        self
    }

    pub fn set_output_directory(&mut self, dir: impl Into<String>) -> &mut Self {
        self.output_directory = dir.into();
        self
    }

    pub fn set_input_directory(&mut self, dir: impl Into<String>) -> &mut Self {
        self.input_directory = dir.into();
        self
    }

    pub fn add_file(&mut self, file: impl Into<String>) -> &mut Self {
        self.input_files.push(file.into());
        self
    }

    pub fn add_files<I, S>(&mut self, files: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn add_flag(&mut self, flag: impl Into<String>) -> &mut Self {
        self.flags.push(flag.into());
        self
    }

    pub fn add_flags<I, S>(&mut self, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn add_command(&mut self, command: impl Into<String>) -> &mut Self {
        self.auxiliary_commands.push(command.into());
        self
    }

    pub fn add_commands<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auxiliary_commands
            .extend(commands.into_iter().map(Into::into));
        self
    }

    pub fn set_force(&mut self, force: bool) -> &mut Self {
        self.force_rebuild = force;
        self
    }

    pub fn set_echo(&mut self, echo: bool) -> &mut Self {
        self.verbose_echo = echo;
        self
    }

    pub fn set_bootstrap(&mut self, bootstrap: SelfBuild) -> &mut Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    /// Flags a relaunched copy of the driver must receive to behave the same.
    pub fn relaunch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.force_rebuild {
            args.push("--force".to_string());
        }
        if self.verbose_echo {
            args.push("--echo".to_string());
        }
        args
    }
}

fn default_output_name() -> String {
    DEFAULT_OUTPUT_NAME.to_string()
}

fn default_self_source() -> PathBuf {
    PathBuf::from(DEFAULT_SELF_SOURCE)
}

fn default_self_binary() -> PathBuf {
    PathBuf::from(DEFAULT_SELF_BINARY)
}
