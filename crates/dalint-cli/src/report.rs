//! Rendering of per-file findings in human and JSON formats.

use anyhow::Result;
use colored::Colorize;
use dalint_types::ValidationError;
use std::io::Write;

/// One checked file and its findings, in file order.
pub struct FileReport {
    pub file: String,
    pub errors: Vec<ValidationError>,
}

/// Total findings across all reports.
#[must_use]
pub fn total_errors(reports: &[FileReport]) -> usize {
    reports.iter().map(|r| r.errors.len()).sum()
}

/// Human-readable rendering: a progress dot per clean file, each finding in
/// its canonical form, a per-file count, and a colored summary.
pub fn render_human(reports: &[FileReport]) {
    let mut printed_dots = false;
    for report in reports {
        if report.errors.is_empty() {
            print!(".");
            printed_dots = true;
            continue;
        }
        println!();
        println!("Found {} errors in {}:", report.errors.len(), report.file);
        for err in &report.errors {
            println!("{err}");
        }
    }
    if printed_dots {
        println!();
    }
    let _ = std::io::stdout().flush();

    let total = total_errors(reports);
    let files_with_errors = reports.iter().filter(|r| !r.errors.is_empty()).count();
    if total == 0 {
        println!("{}", "✓ No issues found".green().bold());
    } else {
        println!(
            "{}",
            format!("✗ Found {total} error(s) in {files_with_errors} file(s)").red()
        );
    }
}

/// JSON rendering for tooling.
pub fn render_json(reports: &[FileReport]) -> Result<()> {
    let files: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            serde_json::json!({
                "file": report.file,
                "error_count": report.errors.len(),
                "errors": report.errors.iter().map(|err| {
                    serde_json::json!({
                        "message": err.message,
                        "line": err.line,
                        "experimental": err.experimental,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    let total = total_errors(reports);
    let output = serde_json::json!({
        "success": total == 0,
        "files": files,
        "stats": {
            "total_files": reports.len(),
            "total_errors": total,
        },
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
