use std::path::Path;

use crate::error::HeaderError;
use crate::head::read_head;
use crate::language::{CommentStyles, LanguageClassifier};
use crate::types::SourceFile;

pub const COPYRIGHT_MARKER: &str = "Copyright ";
pub const LICENSE_MARKER: &str = "SPDX-License-Identifier: ";

/// Extracts header fields from source files.
pub struct SourceParser<'a> {
    styles: &'a CommentStyles,
    classifier: &'a dyn LanguageClassifier,
    header_lines: usize,
}

impl<'a> SourceParser<'a> {
    pub fn new(
        styles: &'a CommentStyles,
        classifier: &'a dyn LanguageClassifier,
        header_lines: usize,
    ) -> Self {
        Self {
            styles,
            classifier,
            header_lines,
        }
    }

    /// Parse `path`.
    ///
    /// Returns [`HeaderError::UnknownLanguage`] for files without a known
    /// comment prefix; callers are expected to skip those.
    pub fn parse(&self, path: &Path) -> Result<SourceFile, HeaderError> {
        let content = std::fs::read(path).map_err(|e| HeaderError::io(path, e))?;
        let prefix = self.styles.prefix_for(self.classifier, path, &content)?;
        let lines =
            read_head(content.as_slice(), self.header_lines).map_err(|e| HeaderError::io(path, e))?;
        let (copyright, license) = extract_fields(&lines, prefix);
        Ok(SourceFile {
            path: path.to_path_buf(),
            comment_prefix: prefix.to_string(),
            copyright,
            license,
        })
    }
}

/// Find the copyright and license lines among `lines`. First match wins.
pub fn extract_fields(lines: &[String], prefix: &str) -> (String, String) {
    let copyright_start = format!("{prefix} {COPYRIGHT_MARKER}");
    let license_start = format!("{prefix} {LICENSE_MARKER}");
    let strip = prefix.len() + 1;

    let mut copyright = None;
    let mut license = None;
    for line in lines {
        if copyright.is_none() && line.starts_with(&copyright_start) {
            copyright = Some(line[strip..].to_string());
        }
        if license.is_none() && line.starts_with(&license_start) {
            license = Some(line[strip..].to_string());
        }
    }
    (copyright.unwrap_or_default(), license.unwrap_or_default())
}
