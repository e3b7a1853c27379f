use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Header fields extracted from one source file.
///
/// `copyright` and `license` hold the matching line with the comment prefix
/// and one space removed (`Copyright 2020 Acme`,
/// `SPDX-License-Identifier: MIT`), or an empty string when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub comment_prefix: String,
    pub copyright: String,
    pub license: String,
}

/// The majority copyright notice and license identifier of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consensus {
    pub copyright: String,
    pub license: String,
}

/// How a file's header disagrees with the consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingCopyright,
    MinorityCopyright { want: String, got: String },
    MissingLicense,
    MinorityLicense { want: String, got: String },
}

impl Violation {
    /// Short label, e.g. for grouping.
    pub fn label(&self) -> &'static str {
        match self {
            Violation::MissingCopyright => "missing copyright",
            Violation::MinorityCopyright { .. } => "minority copyright",
            Violation::MissingLicense => "missing license",
            Violation::MinorityLicense { .. } => "minority license",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingCopyright => write!(f, "is missing the copyright notice"),
            Violation::MinorityCopyright { want, got } => write!(
                f,
                "has minority copyright notice: want: {want:?}, got: {got:?}"
            ),
            Violation::MissingLicense => write!(f, "is missing the license identifier"),
            Violation::MinorityLicense { want, got } => write!(
                f,
                "has minority license identifier: want: {want:?}, got: {got:?}"
            ),
        }
    }
}

/// A file that needs its header updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub path: PathBuf,
    pub comment_prefix: String,
    pub violations: Vec<Violation>,
}
