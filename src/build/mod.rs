pub mod bootstrap;
pub mod command;
mod core;
mod feedback;
pub mod probe;
pub mod runner;
pub mod stale;
mod utils;

pub use bootstrap::{BootstrapOutcome, RELAUNCH_GUARD, SelfPaths, ensure_self_up_to_date};
pub use command::{CompileCommand, synthesize};
pub use self::core::{AuxFailure, BuildOutcome, BuildReport, Stage, build_project, was_relaunched};
pub use probe::{FileStamp, probe};
pub use runner::{COMMAND_ENV, RunStatus, Runner, ShellRequest, SystemRunner};
pub use stale::{Staleness, check_staleness, needs_rebuild};
pub use utils::{PROJECT_FILE, load_config, resolve_compiler};
