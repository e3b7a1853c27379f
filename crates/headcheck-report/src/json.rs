use serde::Serialize;

use headcheck_core::audit::Audit;
use headcheck_core::types::{Consensus, Finding};

/// JSON document emitted by `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub consensus: &'a Consensus,
    pub scanned: usize,
    pub suggested_header: Option<Vec<String>>,
    pub findings: &'a [Finding],
}

impl<'a> JsonReport<'a> {
    pub fn new(audit: &'a Audit) -> Self {
        let suggested_header = audit.suggested_prefix().map(|prefix| {
            vec![
                format!("{prefix} {}", audit.consensus.copyright),
                format!("{prefix} {}", audit.consensus.license),
            ]
        });
        Self {
            consensus: &audit.consensus,
            scanned: audit.scanned,
            suggested_header,
            findings: &audit.findings,
        }
    }
}

/// Format an audit as JSON.
pub fn format_report(audit: &Audit, compact: bool) -> serde_json::Result<String> {
    let report = JsonReport::new(audit);
    if compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headcheck_core::tally::Tally;
    use headcheck_core::types::Violation;
    use std::path::PathBuf;

    fn sample_audit() -> Audit {
        let mut prefixes = Tally::new();
        prefixes.add("//");
        Audit {
            consensus: Consensus {
                copyright: "Copyright 2020 Acme".to_string(),
                license: "SPDX-License-Identifier: MIT".to_string(),
            },
            scanned: 2,
            findings: vec![Finding {
                path: PathBuf::from("b.go"),
                comment_prefix: "//".to_string(),
                violations: vec![Violation::MinorityLicense {
                    want: "SPDX-License-Identifier: MIT".to_string(),
                    got: "SPDX-License-Identifier: GPL-2.0".to_string(),
                }],
            }],
            prefixes,
        }
    }

    #[test]
    fn test_json_report_shape() {
        let json = format_report(&sample_audit(), false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["consensus"]["copyright"], "Copyright 2020 Acme");
        assert_eq!(parsed["scanned"], 2);
        assert_eq!(parsed["suggested_header"][0], "// Copyright 2020 Acme");
        assert_eq!(parsed["findings"][0]["path"], "b.go");
        assert_eq!(
            parsed["findings"][0]["violations"][0]["kind"],
            "minority_license"
        );
        assert_eq!(
            parsed["findings"][0]["violations"][0]["got"],
            "SPDX-License-Identifier: GPL-2.0"
        );
    }

    #[test]
    fn test_clean_audit_has_no_suggestion() {
        let audit = Audit {
            findings: Vec::new(),
            prefixes: Tally::new(),
            ..sample_audit()
        };
        let json = format_report(&audit, true).unwrap();
        assert!(!json.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["suggested_header"].is_null());
        assert_eq!(parsed["findings"].as_array().map(Vec::len), Some(0));
    }
}
