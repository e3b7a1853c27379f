use std::collections::BTreeMap;

use serde::Serialize;

/// Frequency count of string values.
///
/// The empty string may be counted but never takes part in ordering or
/// majority selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        *self.counts.entry(value.to_string()).or_default() += 1;
    }

    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct non-empty values.
    pub fn len(&self) -> usize {
        self.non_empty().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total count over non-empty values.
    pub fn total(&self) -> usize {
        self.non_empty().map(|(_, n)| n).sum()
    }

    /// Non-empty values by descending count, ties in ascending key order.
    pub fn sorted_desc(&self) -> Vec<&str> {
        let mut entries: Vec<_> = self.non_empty().collect();
        // BTreeMap iteration is already key-ordered and the sort is stable.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().map(|(k, _)| k).collect()
    }

    /// The most frequent non-empty value.
    pub fn majority(&self) -> Option<&str> {
        self.sorted_desc().into_iter().next()
    }

    fn non_empty(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, n)| (k.as_str(), *n))
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for value in iter {
            tally.add(value);
        }
        tally
    }
}
