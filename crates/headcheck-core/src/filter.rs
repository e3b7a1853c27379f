//! Exclusion rules deciding which crawled files are never linted.
//!
//! A [`FileFilter`] is an ordered list of [`ExcludeRule`]s combined with
//! logical OR. Path-only rules run before [`BinaryRule`], which has to read
//! file content.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use regex::RegexSet;

use crate::config::Config;
use crate::error::HeaderError;

/// Ignore file expected at the root of every scanned tree.
pub const GITIGNORE: &str = ".gitignore";

/// Number of leading bytes inspected for NUL when sniffing binaries.
const BINARY_SNIFF_LEN: u64 = 8000;

/// A single exclusion predicate.
///
/// `path` is the path as crawled, `rel` the same path relative to the scan
/// root with `/` separators.
pub trait ExcludeRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn excludes(&self, path: &Path, rel: &str) -> Result<bool, HeaderError>;
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid glob '{pattern}'"))?);
    }
    builder.build().context("failed to build glob set")
}

/// Data and configuration formats: JSON, TOML, YAML and friends.
pub struct ConfigurationRule {
    globs: GlobSet,
}

impl ConfigurationRule {
    pub fn new() -> Result<Self> {
        let globs = build_globset(&[
            "**/*.json",
            "**/*.jsonc",
            "**/*.toml",
            "**/*.yaml",
            "**/*.yml",
            "**/*.xml",
            "**/*.ini",
            "**/*.cfg",
            "**/*.conf",
            "**/*.properties",
            "**/*.csv",
            "**/*.tsv",
            "**/*.plist",
        ])?;
        Ok(Self { globs })
    }
}

impl ExcludeRule for ConfigurationRule {
    fn name(&self) -> &'static str {
        "configuration"
    }

    fn excludes(&self, _path: &Path, rel: &str) -> Result<bool, HeaderError> {
        Ok(self.globs.is_match(rel))
    }
}

/// Documentation trees and well-known prose files.
pub struct DocumentationRule {
    patterns: RegexSet,
}

impl DocumentationRule {
    pub fn new() -> Result<Self> {
        let patterns = RegexSet::new([
            r"^[Dd]ocs?/",
            r"(^|/)[Dd]ocumentation/",
            r"(^|/)[Jj]avadoc/",
            r"^[Mm]an/",
            r"^[Ee]xamples/",
            r"^[Dd]emos?/",
            r"^[Ss]amples?/",
            r"(^|/)CHANGE(S|LOG)?(\.|$)",
            r"(^|/)CONTRIBUTING(\.|$)",
            r"(^|/)COPYING(\.|$)",
            r"(^|/)INSTALL(\.|$)",
            r"(^|/)LICEN[CS]E(\.|$)",
            r"(^|/)[Ll]icen[cs]e(\.|$)",
            r"(^|/)README(\.|$)",
            r"(^|/)[Rr]eadme(\.|$)",
        ])
        .context("failed to compile documentation patterns")?;
        Ok(Self { patterns })
    }
}

impl ExcludeRule for DocumentationRule {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn excludes(&self, _path: &Path, rel: &str) -> Result<bool, HeaderError> {
        Ok(self.patterns.is_match(rel))
    }
}

/// Files whose name starts with a dot.
pub struct DotFileRule;

impl ExcludeRule for DotFileRule {
    fn name(&self) -> &'static str {
        "dotfile"
    }

    fn excludes(&self, path: &Path, _rel: &str) -> Result<bool, HeaderError> {
        Ok(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.')))
    }
}

pub struct ImageRule {
    globs: GlobSet,
}

impl ImageRule {
    pub fn new() -> Result<Self> {
        let globs = build_globset(&[
            "**/*.png",
            "**/*.jpg",
            "**/*.jpeg",
            "**/*.gif",
            "**/*.bmp",
            "**/*.ico",
            "**/*.webp",
            "**/*.tiff",
            "**/*.svg",
        ])?;
        Ok(Self { globs })
    }
}

impl ExcludeRule for ImageRule {
    fn name(&self) -> &'static str {
        "image"
    }

    fn excludes(&self, _path: &Path, rel: &str) -> Result<bool, HeaderError> {
        Ok(self.globs.is_match(rel))
    }
}

/// Vendored dependencies, generated build scripts, and minified assets.
pub struct VendorRule {
    patterns: RegexSet,
}

impl VendorRule {
    pub fn new() -> Result<Self> {
        let patterns = RegexSet::new([
            r"(^|/)[Vv]endor/",
            r"(^|/)_vendor/",
            r"(^|/)node_modules/",
            r"(^|/)bower_components/",
            r"(^|/)third[-_]?party/",
            r"(^|/)Godeps/_workspace/",
            r"(^|/)cache/",
            r"(^|/)dist/",
            r"^deps/",
            r"^[Dd]ependencies/",
            r"(^|/)configure$",
            r"(^|/)config\.guess$",
            r"(^|/)config\.sub$",
            r"(^|/)gradlew(\.bat)?$",
            r"\.min\.(js|css)$",
        ])
        .context("failed to compile vendor patterns")?;
        Ok(Self { patterns })
    }
}

impl ExcludeRule for VendorRule {
    fn name(&self) -> &'static str {
        "vendor"
    }

    fn excludes(&self, _path: &Path, rel: &str) -> Result<bool, HeaderError> {
        Ok(self.patterns.is_match(rel))
    }
}

/// Files with a NUL byte near the start. Unreadable files are a hard error.
pub struct BinaryRule;

impl ExcludeRule for BinaryRule {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn excludes(&self, path: &Path, _rel: &str) -> Result<bool, HeaderError> {
        let file = File::open(path).map_err(|e| HeaderError::io(path, e))?;
        let mut head = Vec::new();
        file.take(BINARY_SNIFF_LEN)
            .read_to_end(&mut head)
            .map_err(|e| HeaderError::io(path, e))?;
        Ok(head.contains(&0))
    }
}

/// Patterns from the `.gitignore` at the scan root.
pub struct GitignoreRule {
    matcher: Gitignore,
}

impl GitignoreRule {
    /// Load `<root>/.gitignore`. A missing or malformed file is an error.
    pub fn load(root: &Path) -> Result<Self, HeaderError> {
        let path = root.join(GITIGNORE);
        let mut builder = GitignoreBuilder::new(root);
        if let Some(source) = builder.add(&path) {
            return Err(HeaderError::Gitignore { path, source });
        }
        let matcher = builder
            .build()
            .map_err(|source| HeaderError::Gitignore { path, source })?;
        Ok(Self { matcher })
    }
}

impl ExcludeRule for GitignoreRule {
    fn name(&self) -> &'static str {
        "gitignore"
    }

    fn excludes(&self, _path: &Path, rel: &str) -> Result<bool, HeaderError> {
        // Paths outside the root cannot match.
        if Path::new(rel).has_root() {
            return Ok(false);
        }
        Ok(self
            .matcher
            .matched_path_or_any_parents(rel, false)
            .is_ignore())
    }
}

/// User supplied glob patterns from `[filter] exclude_patterns`.
pub struct GlobRule {
    globs: GlobSet,
}

impl GlobRule {
    pub fn new(patterns: &[String]) -> Result<Self, HeaderError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| HeaderError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|source| HeaderError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { globs })
    }
}

impl ExcludeRule for GlobRule {
    fn name(&self) -> &'static str {
        "exclude_patterns"
    }

    fn excludes(&self, _path: &Path, rel: &str) -> Result<bool, HeaderError> {
        Ok(self.globs.is_match(rel))
    }
}

/// `path` relative to `root`, with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Ordered set of exclusion rules for one scan root.
pub struct FileFilter {
    root: PathBuf,
    rules: Vec<Box<dyn ExcludeRule>>,
}

impl FileFilter {
    /// A filter with no rules: nothing is excluded.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: Vec::new(),
        }
    }

    /// The built-in heuristics, `.gitignore`, and configured patterns.
    pub fn standard(root: &Path, config: &Config) -> Result<Self> {
        let mut filter = Self::new(root)
            .with_rule(ConfigurationRule::new()?)
            .with_rule(DocumentationRule::new()?)
            .with_rule(DotFileRule)
            .with_rule(ImageRule::new()?)
            .with_rule(VendorRule::new()?)
            .with_rule(GitignoreRule::load(root)?);
        if !config.filter.exclude_patterns.is_empty() {
            filter = filter.with_rule(GlobRule::new(&config.filter.exclude_patterns)?);
        }
        Ok(filter.with_rule(BinaryRule))
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl ExcludeRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// True if any rule excludes `path`. Stops at the first match.
    pub fn is_excluded(&self, path: &Path) -> Result<bool, HeaderError> {
        let rel = relative_path(&self.root, path);
        for rule in &self.rules {
            if rule.excludes(path, &rel)? {
                tracing::debug!(path = %path.display(), rule = rule.name(), "excluded");
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn rel_excludes(rule: &dyn ExcludeRule, rel: &str) -> bool {
        rule.excludes(Path::new(rel), rel).unwrap()
    }

    #[test]
    fn test_configuration_rule() {
        let rule = ConfigurationRule::new().unwrap();
        assert!(rel_excludes(&rule, "Cargo.toml"));
        assert!(rel_excludes(&rule, "deploy/values.yaml"));
        assert!(!rel_excludes(&rule, "main.go"));
    }

    #[test]
    fn test_documentation_rule() {
        let rule = DocumentationRule::new().unwrap();
        assert!(rel_excludes(&rule, "docs/intro.go"));
        assert!(rel_excludes(&rule, "README.md"));
        assert!(rel_excludes(&rule, "pkg/LICENSE"));
        assert!(rel_excludes(&rule, "CHANGELOG"));
        assert!(!rel_excludes(&rule, "pkg/docs/intro.go"));
        assert!(!rel_excludes(&rule, "pkg/readme_parser.go"));
    }

    #[test]
    fn test_dotfile_rule() {
        assert!(rel_excludes(&DotFileRule, ".gitignore"));
        assert!(rel_excludes(&DotFileRule, "pkg/.hidden.go"));
        assert!(!rel_excludes(&DotFileRule, "pkg/visible.go"));
    }

    #[test]
    fn test_image_rule() {
        let rule = ImageRule::new().unwrap();
        assert!(rel_excludes(&rule, "assets/logo.png"));
        assert!(!rel_excludes(&rule, "assets/logo.go"));
    }

    #[test]
    fn test_vendor_rule() {
        let rule = VendorRule::new().unwrap();
        assert!(rel_excludes(&rule, "vendor/github.com/x/y.go"));
        assert!(rel_excludes(&rule, "web/node_modules/a/index.js"));
        assert!(rel_excludes(&rule, "third_party/lib.c"));
        assert!(rel_excludes(&rule, "static/app.min.js"));
        assert!(!rel_excludes(&rule, "internal/vendored.go"));
    }

    #[test]
    fn test_binary_rule() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("blob.go");
        let text = tmp.path().join("text.go");
        fs::write(&bin, b"package x\x00\x01\x02").unwrap();
        fs::write(&text, "package x\n").unwrap();
        assert!(BinaryRule.excludes(&bin, "blob.go").unwrap());
        assert!(!BinaryRule.excludes(&text, "text.go").unwrap());
    }

    #[test]
    fn test_binary_rule_unreadable_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.go");
        let err = BinaryRule.excludes(&missing, "missing.go").unwrap_err();
        assert!(matches!(err, HeaderError::Io { .. }));
    }

    #[test]
    fn test_gitignore_rule() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(GITIGNORE), "build/\n*.gen.go\n!keep.gen.go\n").unwrap();
        let rule = GitignoreRule::load(tmp.path()).unwrap();
        assert!(rel_excludes(&rule, "build/out.go"));
        assert!(rel_excludes(&rule, "pkg/api.gen.go"));
        assert!(!rel_excludes(&rule, "keep.gen.go"));
        assert!(!rel_excludes(&rule, "main.go"));
    }

    #[test]
    fn test_gitignore_missing_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = GitignoreRule::load(tmp.path()).err().unwrap();
        assert!(matches!(err, HeaderError::Gitignore { .. }));
    }

    #[test]
    fn test_glob_rule() {
        let rule = GlobRule::new(&["generated/**".to_string()]).unwrap();
        assert!(rel_excludes(&rule, "generated/a.go"));
        assert!(!rel_excludes(&rule, "src/a.go"));
    }

    #[test]
    fn test_glob_rule_invalid_pattern() {
        let err = GlobRule::new(&["a[".to_string()]).err().unwrap();
        assert!(matches!(err, HeaderError::Pattern { .. }));
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, Path::new("/repo/a/b.go")), "a/b.go");
        assert_eq!(relative_path(root, Path::new("other/c.go")), "other/c.go");
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = FileFilter::new("/repo");
        assert!(!filter.is_excluded(Path::new("/repo/main.go")).unwrap());
    }

    struct Always;

    impl ExcludeRule for Always {
        fn name(&self) -> &'static str {
            "always"
        }

        fn excludes(&self, _path: &Path, _rel: &str) -> Result<bool, HeaderError> {
            Ok(true)
        }
    }

    #[test]
    fn test_injected_rule_short_circuits() {
        // BinaryRule would fail on a missing file; Always must win first.
        let filter = FileFilter::new("/repo").with_rule(Always).with_rule(BinaryRule);
        assert!(filter.is_excluded(Path::new("/repo/missing.go")).unwrap());
    }

    #[test]
    fn test_standard_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join(GITIGNORE), "ignored.go\n").unwrap();
        fs::write(root.join("main.go"), "package main\n").unwrap();
        fs::write(root.join("ignored.go"), "package main\n").unwrap();

        let filter = FileFilter::standard(root, &Config::default()).unwrap();
        assert_eq!(
            filter.rule_names(),
            vec!["configuration", "documentation", "dotfile", "image", "vendor", "gitignore", "binary"]
        );
        assert!(!filter.is_excluded(&root.join("main.go")).unwrap());
        assert!(filter.is_excluded(&root.join("ignored.go")).unwrap());
        assert!(filter.is_excluded(&root.join(GITIGNORE)).unwrap());
    }
}
