use super::bootstrap::{self, BootstrapOutcome, RELAUNCH_GUARD, SelfPaths};
use super::command::{self, CompileCommand, normalize_dir};
use super::feedback::FeedbackAnalyzer;
use super::runner::{COMMAND_ENV, Runner, ShellRequest};
use super::stale::{Staleness, check_staleness};
use super::utils::resolve_compiler;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::ui::{self, Echo};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Steps of a build, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingCompiler,
    Bootstrapping,
    PreparingOutput,
    Synthesizing,
    Deciding,
    Compiling,
    SkippingCompile,
    RunningAuxiliary,
    Done,
}

/// An auxiliary command that did not succeed. Never aborts the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxFailure {
    pub command: String,
    pub code: Option<i32>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub command: CompileCommand,
    pub staleness: Staleness,
    pub compiled: bool,
    pub trail: Vec<Stage>,
    pub auxiliary_failures: Vec<AuxFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A rebuilt copy of the driver ran in our place; exit with `code`.
    Relaunched { code: i32 },
    Finished(BuildReport),
}

/// True inside a driver that was started by the self-rebuild protocol.
pub fn was_relaunched() -> bool {
    std::env::var_os(RELAUNCH_GUARD).is_some()
}

// --- CORE: Build Project ---
pub fn build_project<R: Runner>(
    config: &BuildConfig,
    runner: &mut R,
) -> Result<BuildOutcome, BuildError> {
    build_with_guard(config, runner, was_relaunched())
}

fn build_with_guard<R: Runner>(
    config: &BuildConfig,
    runner: &mut R,
    relaunched: bool,
) -> Result<BuildOutcome, BuildError> {
    let start_time = Instant::now();
    let echo = Echo::new(config.verbose_echo);
    let mut trail = vec![Stage::ResolvingCompiler];

    // 1. Compiler
    let compiler = resolve_compiler(config)?;

    // 2. Self-rebuild
    trail.push(Stage::Bootstrapping);
    if let Some(self_build) = &config.bootstrap
        && !relaunched
    {
        let paths = SelfPaths {
            source: self_build.source.clone(),
            binary: self_build.binary.clone(),
            compiler: self_build.compiler_for(&compiler),
        };
        if let BootstrapOutcome::Relaunched { code } =
            bootstrap::ensure_self_up_to_date(&paths, &config.relaunch_args(), runner)?
        {
            return Ok(BuildOutcome::Relaunched { code });
        }
    }

    // 3. Output directory
    trail.push(Stage::PreparingOutput);
    let output_dir = normalize_dir(&config.output_directory);
    if !output_dir.is_empty() {
        fs::create_dir_all(&output_dir).map_err(|cause| BuildError::CreateOutputDir {
            path: output_dir.clone().into(),
            cause,
        })?;
    }

    // 4. Command line
    trail.push(Stage::Synthesizing);
    let compile_command = command::synthesize(config, &compiler)?;
    write_database(&compile_command, &output_dir, std::env::current_dir());

    // 5. Staleness
    trail.push(Stage::Deciding);
    let staleness = check_staleness(config)?;
    echo.line(compile_command.as_str());

    let compiled = if staleness.needs_rebuild() {
        trail.push(Stage::Compiling);
        ui::info(&format!("compiling {}", compile_command.output()));
        compile(&compile_command, runner)?;
        ui::success(&format!("Build finished in {:.2?}", start_time.elapsed()));
        true
    } else {
        trail.push(Stage::SkippingCompile);
        ui::info(&format!(
            "skipping compilation, {} is up to date",
            compile_command.output()
        ));
        false
    };

    // 6. Auxiliary commands
    trail.push(Stage::RunningAuxiliary);
    let auxiliary_failures = run_auxiliary(config, &compile_command, echo, runner);

    trail.push(Stage::Done);
    Ok(BuildOutcome::Finished(BuildReport {
        command: compile_command,
        staleness,
        compiled,
        trail,
        auxiliary_failures,
    }))
}

fn write_database(
    compile_command: &CompileCommand,
    output_dir: &str,
    working_dir: io::Result<PathBuf>,
) -> Option<PathBuf> {
    let dir = if output_dir.is_empty() { "." } else { output_dir };
    let working_dir = match working_dir {
        Ok(working_dir) => working_dir,
        Err(e) => {
            ui::warn(&format!(
                "could not write compile_commands.json: working directory unavailable: {}",
                e
            ));
            return None;
        }
    };
    match command::write_compile_database(compile_command, Path::new(dir), &working_dir) {
        Ok(path) => Some(path),
        Err(e) => {
            ui::warn(&format!("could not write compile_commands.json: {}", e));
            None
        }
    }
}

fn compile<R: Runner>(compile_command: &CompileCommand, runner: &mut R) -> Result<(), BuildError> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Compiling...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = runner.run(&ShellRequest::new(compile_command.as_str()).captured());
    pb.finish_and_clear();
    let status = result?;

    if !status.stdout.is_empty() {
        print!("{}", status.stdout);
    }

    if !status.success() {
        eprint!("{}", status.stderr);
        if let Some(hint) = FeedbackAnalyzer::analyze(&status.stderr) {
            ui::warn(&hint);
        }
        return Err(BuildError::Compile { code: status.code });
    }

    // Warnings, if any
    if !status.stderr.is_empty() {
        eprint!("{}", status.stderr);
    }
    Ok(())
}

fn run_auxiliary<R: Runner>(
    config: &BuildConfig,
    compile_command: &CompileCommand,
    echo: Echo,
    runner: &mut R,
) -> Vec<AuxFailure> {
    let mut failures = Vec::new();

    for extra in &config.auxiliary_commands {
        ui::info(&format!("running extra command \"{}\"", extra));
        echo.line(extra);

        let request = ShellRequest::new(extra.as_str()).env(COMMAND_ENV, compile_command.as_str());
        match runner.run(&request) {
            Ok(status) if status.success() => {}
            Ok(status) => {
                ui::warn(&format!("extra command \"{}\" failed", extra));
                failures.push(AuxFailure {
                    command: extra.clone(),
                    code: status.code,
                    reason: "non-zero exit".to_string(),
                });
            }
            Err(e) => {
                ui::warn(&ui::chain(&e));
                failures.push(AuxFailure {
                    command: extra.clone(),
                    code: None,
                    reason: ui::chain(&e),
                });
            }
        }
    }

    failures
}
