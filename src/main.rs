//! # gaia CLI Entry Point
//!
//! Loads `gaia.toml` from the working directory, applies the two
//! behaviour flags and runs the build. Arguments other than the
//! recognised flags are ignored wherever they appear.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use gaia::build::{self, BuildOutcome, SystemRunner};
use gaia::error::BuildError;
use gaia::ui;

const KNOWN_FLAGS: &[&str] = &[
    "-f", "--force", "-e", "--echo", "-h", "--help", "-V", "--version",
];

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "gaia")]
#[command(about = "Minimal self-hosting build driver", version = env!("CARGO_PKG_VERSION"))]
#[command(args_override_self = true)]
struct Cli {
    /// Rebuild even if the artifact is up to date
    #[arg(short, long)]
    force: bool,
    /// Print raw command lines before running them
    #[arg(short, long)]
    echo: bool,
}

/// Drops everything clap should not see. The program name is kept.
fn recognised_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    args.next()
        .into_iter()
        .chain(args.filter(|arg| KNOWN_FLAGS.contains(&arg.as_str())))
        .collect()
}

fn run(cli: &Cli) -> Result<i32> {
    let mut config = build::load_config(Path::new(build::PROJECT_FILE))?;
    config.set_force(cli.force).set_echo(cli.echo);

    match build::build_project(&config, &mut SystemRunner)? {
        BuildOutcome::Relaunched { code } => Ok(code),
        BuildOutcome::Finished(report) => {
            for failure in &report.auxiliary_failures {
                ui::warn(&format!(
                    "extra command \"{}\" did not succeed ({})",
                    failure.command, failure.reason
                ));
            }
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse_from(recognised_args(std::env::args()));

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            match e.downcast_ref::<BuildError>() {
                Some(build_err) => ui::error(&ui::chain(build_err)),
                None => ui::error(&format!("{:#}", e)),
            }
            std::process::exit(1);
        }
    }
}
