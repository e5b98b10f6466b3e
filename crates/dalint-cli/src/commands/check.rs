use crate::discovery;
use crate::exit_code::ExitCode;
use crate::report::{self, FileReport};
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Check every resolved target, render the report, and map the outcome to
/// an exit code. Files are checked one at a time; each file's findings are
/// independent of every other file's.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    ignore_dirs: &[String],
    no_default_ignores: bool,
) -> Result<ExitCode> {
    let targets = discovery::collect_targets(paths, ignore_dirs, no_default_ignores)?;
    tracing::debug!(count = targets.len(), "resolved check targets");

    let mut reports = Vec::new();
    let mut io_failed = false;
    for path in targets {
        match dalint_checker::check_file(&path) {
            Ok(errors) => reports.push(FileReport {
                file: path.display().to_string(),
                errors,
            }),
            Err(err) => {
                io_failed = true;
                eprintln!("{}", err.to_string().red());
            }
        }
    }

    match format {
        OutputFormat::Human => report::render_human(&reports),
        OutputFormat::Json => report::render_json(&reports)?,
    }

    if io_failed {
        Ok(ExitCode::IoError)
    } else if report::total_errors(&reports) > 0 {
        Ok(ExitCode::FindingsFound)
    } else {
        Ok(ExitCode::Success)
    }
}
