use colored::*;

/// Turns raw compiler stderr into a short hint for common failures.
pub struct FeedbackAnalyzer;

impl FeedbackAnalyzer {
    pub fn analyze(output: &str) -> Option<String> {
        // 1. Main function missing (Specific Linker Error)
        if output.contains("undefined reference to `main'")
            || output.contains("entry point must be defined")
        {
            return Some(format!(
                "Your project is missing a {} function.\nEnsure one of the listed {} defines the entry point.",
                "main()".bold().yellow(),
                "files".bold().green()
            ));
        }

        // 2. Unresolved symbols (Linker Error)
        if output.contains("LNK2019") || output.contains("undefined reference to") {
            return Some(format!(
                "It looks like a {} error.\nA source file may be missing from {} or a library from {}.",
                "Linker".bold().red(),
                "files".bold().yellow(),
                "flags".bold().yellow()
            ));
        }

        // 3. A listed input is gone
        if Self::missing_input(output) {
            return Some(format!(
                "A {} could not be found.\nCheck {} and {} in gaia.toml.",
                "source file".bold().red(),
                "input_directory".bold().yellow(),
                "files".bold().yellow()
            ));
        }

        // 4. Missing Header (Compiler Error)
        if output.contains("fatal error: ") && output.contains("No such file or directory")
            || output.contains("cannot open include file")
        {
            return Some(format!(
                "It looks like a {} error.\nAdd the include path to {} in gaia.toml.",
                "Missing Header".bold().red(),
                "flags".bold().yellow()
            ));
        }

        None
    }

    /// gcc reports a missing input as `<driver>: error: <file>: No such file
    /// or directory`, clang as `no such file or directory: '<file>'`. A
    /// missing header is a `fatal error:` instead.
    fn missing_input(output: &str) -> bool {
        output.contains("no input files")
            || output.contains("cannot open source file")
            || output.lines().any(|line| {
                line.contains("no such file or directory: ")
                    || (line.contains("error: ")
                        && !line.contains("fatal error: ")
                        && line.contains("No such file or directory"))
            })
    }
}
