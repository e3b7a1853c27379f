use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while scanning a tree.
///
/// Only [`HeaderError::UnknownLanguage`] is recoverable: the pipeline skips
/// such files and keeps going. Every other variant aborts the run.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("unknown language {language:?} for {path:?}")]
    UnknownLanguage { path: PathBuf, language: String },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to load ignore file '{}': {source}", path.display())]
    Gitignore {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("cannot find any copyright notice in any source file")]
    NoCopyright,

    #[error("cannot find any SPDX-License-Identifier tag in any source file")]
    NoLicense,
}

impl HeaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HeaderError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the one error kind that means "not a source file we understand".
    pub fn is_unknown_language(&self) -> bool {
        matches!(self, HeaderError::UnknownLanguage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_is_recoverable() {
        let err = HeaderError::UnknownLanguage {
            path: PathBuf::from("a.txt"),
            language: String::new(),
        };
        assert!(err.is_unknown_language());
        assert!(!HeaderError::NoCopyright.is_unknown_language());
    }

    #[test]
    fn test_no_consensus_messages() {
        assert_eq!(
            HeaderError::NoCopyright.to_string(),
            "cannot find any copyright notice in any source file"
        );
        assert_eq!(
            HeaderError::NoLicense.to_string(),
            "cannot find any SPDX-License-Identifier tag in any source file"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = HeaderError::io(
            "src/main.go",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("src/main.go"));
    }
}
