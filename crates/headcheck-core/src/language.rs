use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::HeaderError;

/// Detects the language of a file from its name and content.
///
/// Returns a language id such as `"Go"` or `"Rust"`, or `None` when the file
/// is not recognized. Implementations must not touch the filesystem.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, path: &Path, content: &[u8]) -> Option<String>;
}

/// Language ids keyed by exact file name.
const FILENAMES: &[(&str, &str)] = &[
    ("Makefile", "Makefile"),
    ("GNUmakefile", "Makefile"),
    ("Dockerfile", "Dockerfile"),
    ("Rakefile", "Ruby"),
    ("Gemfile", "Ruby"),
    ("BUILD", "Starlark"),
    ("BUILD.bazel", "Starlark"),
    ("CMakeLists.txt", "CMake"),
];

/// Language ids keyed by lowercase file extension.
const EXTENSIONS: &[(&str, &str)] = &[
    ("go", "Go"),
    ("rs", "Rust"),
    ("c", "C"),
    ("h", "C"),
    ("cc", "C++"),
    ("cpp", "C++"),
    ("cxx", "C++"),
    ("hh", "C++"),
    ("hpp", "C++"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("scala", "Scala"),
    ("swift", "Swift"),
    ("cs", "C#"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TSX"),
    ("proto", "Protocol Buffer"),
    ("py", "Python"),
    ("rb", "Ruby"),
    ("pl", "Perl"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("tf", "HCL"),
    ("bzl", "Starlark"),
    ("cmake", "CMake"),
    ("mk", "Makefile"),
];

/// Language ids keyed by interpreter name prefix in a `#!` line.
const INTERPRETERS: &[(&str, &str)] = &[
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("sh", "Shell"),
    ("python", "Python"),
    ("ruby", "Ruby"),
    ("perl", "Perl"),
    ("node", "JavaScript"),
];

/// Name, extension, and shebang based classifier.
pub struct HeuristicClassifier {
    shebang: Regex,
}

impl HeuristicClassifier {
    pub fn new() -> Result<Self> {
        let shebang = Regex::new(r"^#!\s*(?:\S*/)?(?:env\s+(?:-\S+\s+)*)?([A-Za-z_][\w.+-]*)")
            .context("failed to compile shebang pattern")?;
        Ok(Self { shebang })
    }

    fn shebang_language(&self, content: &[u8]) -> Option<&'static str> {
        let first = content.split(|b| *b == b'\n').next()?;
        let first = std::str::from_utf8(first).ok()?;
        let interpreter = self.shebang.captures(first)?.get(1)?.as_str();
        INTERPRETERS
            .iter()
            .find(|(name, _)| interpreter.starts_with(name))
            .map(|(_, lang)| *lang)
    }
}

impl LanguageClassifier for HeuristicClassifier {
    fn classify(&self, path: &Path, content: &[u8]) -> Option<String> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;
        if let Some((_, lang)) = FILENAMES.iter().find(|(name, _)| *name == file_name) {
            return Some((*lang).to_string());
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                EXTENSIONS
                    .iter()
                    .find(|(e, _)| *e == ext)
                    .map(|(_, lang)| (*lang).to_string())
            }
            None => self.shebang_language(content).map(str::to_string),
        }
    }
}

/// Maps language ids to the token that starts a single-line comment.
#[derive(Debug, Clone)]
pub struct CommentStyles {
    prefixes: BTreeMap<String, String>,
}

impl Default for CommentStyles {
    fn default() -> Self {
        let prefixes = [("Go", "//"), ("Rust", "//")]
            .into_iter()
            .map(|(lang, prefix)| (lang.to_string(), prefix.to_string()))
            .collect();
        Self { prefixes }
    }
}

impl CommentStyles {
    /// Default table with `overrides` merged on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut styles = Self::default();
        for (lang, prefix) in overrides {
            styles.prefixes.insert(lang.clone(), prefix.clone());
        }
        styles
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.prefixes.get(language).map(String::as_str)
    }

    /// Classify `path` and look up its comment prefix.
    pub fn prefix_for(
        &self,
        classifier: &dyn LanguageClassifier,
        path: &Path,
        content: &[u8],
    ) -> Result<&str, HeaderError> {
        let language = classifier.classify(path, content).unwrap_or_default();
        self.get(&language)
            .ok_or_else(|| HeaderError::UnknownLanguage {
                path: path.to_path_buf(),
                language,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(path: &str, content: &str) -> Option<String> {
        HeuristicClassifier::new()
            .unwrap()
            .classify(Path::new(path), content.as_bytes())
    }

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify("main.go", "").as_deref(), Some("Go"));
        assert_eq!(classify("src/lib.rs", "").as_deref(), Some("Rust"));
        assert_eq!(classify("tool.PY", "").as_deref(), Some("Python"));
        assert_eq!(classify("a/b/c.hpp", "").as_deref(), Some("C++"));
        assert_eq!(classify("notes.txt", ""), None);
    }

    #[test]
    fn test_classify_by_filename() {
        assert_eq!(classify("Makefile", "").as_deref(), Some("Makefile"));
        assert_eq!(classify("build/Dockerfile", "").as_deref(), Some("Dockerfile"));
    }

    #[test]
    fn test_classify_by_shebang() {
        assert_eq!(classify("run", "#!/bin/bash\necho hi\n").as_deref(), Some("Shell"));
        assert_eq!(
            classify("tool", "#!/usr/bin/env python3\n").as_deref(),
            Some("Python")
        );
        assert_eq!(
            classify("tool", "#!/usr/bin/env -S node --harmony\n").as_deref(),
            Some("JavaScript")
        );
        assert_eq!(classify("LICENSE", "MIT License\n"), None);
    }

    #[test]
    fn test_shebang_ignored_when_extension_present() {
        assert_eq!(classify("weird.txt", "#!/bin/sh\n"), None);
    }

    #[test]
    fn test_default_styles() {
        let styles = CommentStyles::default();
        assert_eq!(styles.get("Go"), Some("//"));
        assert_eq!(styles.get("Rust"), Some("//"));
        assert_eq!(styles.get("Python"), None);
    }

    #[test]
    fn test_overrides_merge() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Python".to_string(), "#".to_string());
        overrides.insert("Go".to_string(), "///".to_string());
        let styles = CommentStyles::with_overrides(&overrides);
        assert_eq!(styles.get("Python"), Some("#"));
        assert_eq!(styles.get("Go"), Some("///"));
        assert_eq!(styles.get("Rust"), Some("//"));
    }

    struct Fixed(Option<&'static str>);

    impl LanguageClassifier for Fixed {
        fn classify(&self, _path: &Path, _content: &[u8]) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_prefix_for_known_language() {
        let styles = CommentStyles::default();
        let prefix = styles
            .prefix_for(&Fixed(Some("Go")), Path::new("x"), b"")
            .unwrap();
        assert_eq!(prefix, "//");
    }

    #[test]
    fn test_prefix_for_unknown_language() {
        let styles = CommentStyles::default();
        let err = styles
            .prefix_for(&Fixed(Some("COBOL")), Path::new("x.cbl"), b"")
            .unwrap_err();
        assert!(err.is_unknown_language());
        assert!(err.to_string().contains("COBOL"));

        let err = styles
            .prefix_for(&Fixed(None), Path::new("x"), b"")
            .unwrap_err();
        assert!(err.is_unknown_language());
    }
}
