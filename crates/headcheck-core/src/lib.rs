//! Scan a source tree for copyright and SPDX license header lines, find the
//! majority value of each, and flag or fix the files that disagree.

pub mod audit;
pub mod config;
pub mod consensus;
pub mod crawl;
pub mod error;
pub mod filter;
pub mod head;
pub mod language;
pub mod parser;
pub mod pipeline;
pub mod rewrite;
pub mod tally;
pub mod types;

pub use audit::Audit;
pub use config::Config;
pub use error::HeaderError;
pub use filter::{ExcludeRule, FileFilter};
pub use language::{CommentStyles, HeuristicClassifier, LanguageClassifier};
pub use pipeline::Linter;
pub use tally::Tally;
pub use types::*;
