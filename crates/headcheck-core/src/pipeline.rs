use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::audit::{audit, Audit};
use crate::config::Config;
use crate::crawl::crawl;
use crate::error::HeaderError;
use crate::filter::FileFilter;
use crate::language::{CommentStyles, HeuristicClassifier, LanguageClassifier};
use crate::parser::SourceParser;
use crate::rewrite::fix_file;
use crate::types::{Consensus, SourceFile, Violation};

/// Reusable lint pipeline: crawl, filter, parse, vote, audit.
pub struct Linter {
    classifier: Box<dyn LanguageClassifier>,
    styles: CommentStyles,
    config: Config,
}

impl Linter {
    /// A linter using the built-in heuristic classifier.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_classifier(
            Box::new(HeuristicClassifier::new()?),
            config,
        ))
    }

    pub fn with_classifier(classifier: Box<dyn LanguageClassifier>, config: Config) -> Self {
        let styles = CommentStyles::with_overrides(&config.languages);
        Self {
            classifier,
            styles,
            config,
        }
    }

    /// Run the full scan on `root` with the standard filter set.
    pub fn run(&self, root: &Path) -> Result<Audit> {
        let filter = FileFilter::standard(root, &self.config)?;
        self.run_with_filter(root, &filter)
    }

    /// Run the scan with a caller-supplied filter.
    pub fn run_with_filter(&self, root: &Path, filter: &FileFilter) -> Result<Audit> {
        let files = self.collect(root, filter)?;
        let consensus = Consensus::from_files(&files)?;
        let audit = audit(&files, consensus);
        tracing::info!(
            scanned = audit.scanned,
            findings = audit.findings.len(),
            violations = audit.violation_count(),
            "audit complete"
        );
        Ok(audit)
    }

    /// Crawled, non-excluded files in a recognized language, parsed.
    pub fn collect(&self, root: &Path, filter: &FileFilter) -> Result<Vec<SourceFile>, HeaderError> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        for path in crawl(root)? {
            if !filter.is_excluded(&path)? {
                candidates.push(path);
            }
        }
        tracing::debug!(candidates = candidates.len(), "filtered crawl");

        let parser = SourceParser::new(&self.styles, &*self.classifier, self.config.header.lines);
        let parsed: Vec<Option<SourceFile>> = candidates
            .par_iter()
            .map(|path| match parser.parse(path) {
                Ok(file) => Ok(Some(file)),
                Err(e) if e.is_unknown_language() => {
                    tracing::debug!("skipping: {e}");
                    Ok(None)
                }
                Err(e) => Err(e),
            })
            .collect::<Result<_, HeaderError>>()?;

        Ok(parsed.into_iter().flatten().collect())
    }

    /// Write the consensus header into every file with a finding.
    /// Returns the paths whose content changed.
    pub fn apply(&self, audit: &Audit) -> Result<Vec<PathBuf>, HeaderError> {
        let mut changed = Vec::new();
        for finding in &audit.findings {
            if fix_file(
                &finding.path,
                &finding.comment_prefix,
                &audit.consensus,
                self.config.header.lines,
            )? {
                let reasons: Vec<&str> = finding.violations.iter().map(Violation::label).collect();
                tracing::debug!(path = %finding.path.display(), ?reasons, "rewrote header");
                changed.push(finding.path.clone());
            }
        }
        Ok(changed)
    }
}
