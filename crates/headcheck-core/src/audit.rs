use serde::Serialize;

use crate::tally::Tally;
use crate::types::{Consensus, Finding, SourceFile, Violation};

/// Result of comparing every parsed file against the consensus.
#[derive(Debug, Clone, Serialize)]
pub struct Audit {
    pub consensus: Consensus,
    pub scanned: usize,
    pub findings: Vec<Finding>,
    /// Comment prefixes of offending files, one count per violation.
    pub prefixes: Tally,
}

impl Audit {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.findings.iter().map(|f| f.violations.len()).sum()
    }

    /// Comment prefix to use for the suggested header.
    pub fn suggested_prefix(&self) -> Option<&str> {
        self.prefixes.majority()
    }
}

/// Violations of a single file, in copyright-then-license order.
pub fn check_file(file: &SourceFile, consensus: &Consensus) -> Vec<Violation> {
    let mut violations = Vec::new();

    if file.copyright.is_empty() {
        violations.push(Violation::MissingCopyright);
    } else if file.copyright != consensus.copyright {
        violations.push(Violation::MinorityCopyright {
            want: consensus.copyright.clone(),
            got: file.copyright.clone(),
        });
    }

    if file.license.is_empty() {
        violations.push(Violation::MissingLicense);
    } else if file.license != consensus.license {
        violations.push(Violation::MinorityLicense {
            want: consensus.license.clone(),
            got: file.license.clone(),
        });
    }

    violations
}

pub fn audit(files: &[SourceFile], consensus: Consensus) -> Audit {
    let mut findings = Vec::new();
    let mut prefixes = Tally::new();

    for file in files {
        let violations = check_file(file, &consensus);
        if violations.is_empty() {
            continue;
        }
        for _ in &violations {
            prefixes.add(&file.comment_prefix);
        }
        findings.push(Finding {
            path: file.path.clone(),
            comment_prefix: file.comment_prefix.clone(),
            violations,
        });
    }

    Audit {
        consensus,
        scanned: files.len(),
        findings,
        prefixes,
    }
}
