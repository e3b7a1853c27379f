use colored::Colorize;

use headcheck_core::audit::Audit;

/// Diagnostic lines for every finding.
///
/// In verbose mode each violation gets a `file "<path>" <explanation>` line.
/// Every finding ends with a ` M <path>` marker regardless of verbosity.
pub fn format_findings(audit: &Audit, verbose: bool) -> String {
    let mut out = String::new();
    for finding in &audit.findings {
        let path = finding.path.display().to_string();
        if verbose {
            for violation in &finding.violations {
                out.push_str(&format!("file {path:?} {violation}\n"));
            }
        }
        out.push_str(&format!(" M {path}\n"));
    }
    out
}

/// Banner printed on stderr ahead of the suggested header.
pub fn format_banner() -> String {
    format!(
        "\n{}\n",
        "^^^ These files should contain these comments at the top:".bold()
    )
}

/// The header every offending file should carry, or `None` for a clean tree.
pub fn format_suggested_header(audit: &Audit) -> Option<String> {
    let prefix = audit.suggested_prefix()?;
    Some(format!(
        "{prefix} {}\n{prefix} {}\n\n",
        audit.consensus.copyright, audit.consensus.license
    ))
}

/// One-line summary for update mode.
pub fn format_update_summary(changed: usize) -> String {
    match changed {
        0 => "No files needed changes".to_string(),
        1 => "Updated 1 file".to_string(),
        n => format!("Updated {n} files"),
    }
}
