use std::hash::{DefaultHasher, Hash, Hasher};
use std::string::String;
use std::vec::Vec;

use crate::Record;

/// Scoring knobs for [`SearchIndex`].
///
/// A field matches when its best window scores at or below `threshold`, where a window's score
/// is `edits / pattern_len + |start - location| / distance` (0.0 is a perfect match at
/// `location`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    pub threshold: f64,
    /// Expected char position of the match inside a field.
    pub location: usize,
    /// How far from `location` a match may drift before it costs a full point.
    pub distance: usize,
    /// Longer queries are truncated to this many chars.
    pub max_pattern_len: usize,
    /// Queries shorter than this match nothing.
    pub min_match_char_len: usize,
    pub ignore_case: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            location: 0,
            distance: 100,
            max_pattern_len: 32,
            min_match_char_len: 1,
            ignore_case: true,
        }
    }
}

impl SearchOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_location(mut self, location: usize, distance: usize) -> Self {
        self.location = location;
        self.distance = distance;
        self
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

/// When a [`SearchIndex`] rebuilds its corpus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexRefresh {
    /// Build once from the first non-empty record set; only [`SearchIndex::rebuild`] refreshes
    /// it. Searching a different record set afterwards matches against the stale corpus.
    Manual,
    /// Rebuild whenever the record set's keys or search fields change.
    #[default]
    Auto,
}

#[derive(Clone, Debug)]
struct Field {
    text: String,
    /// Byte offset of every char, plus `text.len()`.
    bounds: Vec<usize>,
}

impl Field {
    fn new(raw: &str, ignore_case: bool) -> Self {
        let text = if ignore_case {
            raw.to_lowercase()
        } else {
            raw.to_owned()
        };
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self { text, bounds }
    }

    fn char_len(&self) -> usize {
        self.bounds.len() - 1
    }

    fn window(&self, start: usize, len: usize) -> &str {
        &self.text[self.bounds[start]..self.bounds[start + len]]
    }
}

/// Approximate text search over a record set.
///
/// The corpus (lower-cased search fields) is built lazily on the first search that sees a
/// non-empty record set. See [`IndexRefresh`] for when it is rebuilt.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
    options: SearchOptions,
    refresh: IndexRefresh,
    corpus: Option<Vec<Vec<Field>>>,
    fingerprint: u64,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self.corpus = None;
        self
    }

    pub fn with_refresh(mut self, refresh: IndexRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn refresh(&self) -> IndexRefresh {
        self.refresh
    }

    pub fn is_built(&self) -> bool {
        self.corpus.is_some()
    }

    /// Number of records in the built corpus (0 when not built).
    pub fn indexed_len(&self) -> usize {
        self.corpus.as_ref().map_or(0, Vec::len)
    }

    /// Drops the corpus; the next search rebuilds it.
    pub fn invalidate(&mut self) {
        self.corpus = None;
    }

    /// Rebuilds the corpus from `records` now.
    pub fn rebuild<R: Record>(&mut self, records: &[R]) {
        let ignore_case = self.options.ignore_case;
        let corpus = records
            .iter()
            .map(|r| {
                let mut fields = Vec::new();
                r.for_each_search_field(&mut |raw| {
                    if !raw.is_empty() {
                        fields.push(Field::new(raw, ignore_case));
                    }
                });
                fields
            })
            .collect();
        self.corpus = Some(corpus);
        self.fingerprint = fingerprint(records);
        vdebug!(records = records.len(), "SearchIndex::rebuild");
    }

    /// Filters `records` by `query`.
    ///
    /// - empty `records` → empty
    /// - `None` or empty query → `records` unchanged, in order
    /// - otherwise the matching records, best match first
    pub fn search<'r, R: Record>(&mut self, query: Option<&str>, records: &'r [R]) -> Vec<&'r R> {
        self.search_indices(query, records)
            .into_iter()
            .map(|i| &records[i])
            .collect()
    }

    /// Like [`Self::search`], returning positions in `records`.
    pub fn search_indices<R: Record>(&mut self, query: Option<&str>, records: &[R]) -> Vec<usize> {
        if records.is_empty() {
            return Vec::new();
        }
        let query = query.unwrap_or_default();
        if query.is_empty() {
            return (0..records.len()).collect();
        }
        self.ensure_corpus(records);
        let Some(corpus) = &self.corpus else {
            return Vec::new();
        };

        let pattern = self.prepare_pattern(query);
        if pattern.char_len() < self.options.min_match_char_len.max(1) {
            return Vec::new();
        }

        let mut hits: Vec<(f64, usize)> = corpus
            .iter()
            .enumerate()
            // A stale corpus may be longer than the records it is asked about.
            .take(records.len())
            .filter_map(|(i, fields)| {
                fields
                    .iter()
                    .filter_map(|field| self.field_score(&pattern, field))
                    .min_by(f64::total_cmp)
                    .map(|score| (score, i))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        vtrace!(hits = hits.len(), "SearchIndex::search");
        hits.into_iter().map(|(_, i)| i).collect()
    }

    fn ensure_corpus<R: Record>(&mut self, records: &[R]) {
        match (self.refresh, &self.corpus) {
            (_, None) => self.rebuild(records),
            (IndexRefresh::Auto, Some(_)) if fingerprint(records) != self.fingerprint => {
                vdebug!("SearchIndex: record set changed, rebuilding");
                self.rebuild(records);
            }
            _ => {}
        }
    }

    fn prepare_pattern(&self, query: &str) -> Field {
        let truncated: String = query.chars().take(self.options.max_pattern_len).collect();
        Field::new(&truncated, self.options.ignore_case)
    }

    /// Best window score of `pattern` inside `field`, if any is within the threshold.
    fn field_score(&self, pattern: &Field, field: &Field) -> Option<f64> {
        let m = pattern.char_len();
        let n = field.char_len();
        if m == 0 || n == 0 {
            return None;
        }
        let threshold = self.options.threshold;
        let max_edits = (threshold * m as f64).floor() as usize;
        let mut best: Option<f64> = None;

        for start in 0..n {
            let proximity = self.proximity(start);
            if proximity > threshold {
                if start > self.options.location {
                    break;
                }
                continue;
            }
            let shortest = m.saturating_sub(max_edits).max(1);
            let longest = (m + max_edits).min(n - start);
            for len in shortest..=longest {
                let edits = strsim::levenshtein(pattern.text.as_str(), field.window(start, len));
                if edits > max_edits {
                    continue;
                }
                let score = edits as f64 / m as f64 + proximity;
                if score <= threshold && best.is_none_or(|b| score < b) {
                    best = Some(score);
                }
            }
            if best == Some(0.0) {
                break;
            }
        }
        best
    }

    fn proximity(&self, start: usize) -> f64 {
        let drift = start.abs_diff(self.options.location);
        match self.options.distance {
            0 if drift == 0 => 0.0,
            0 => 1.0,
            distance => drift as f64 / distance as f64,
        }
    }
}

fn fingerprint<R: Record>(records: &[R]) -> u64 {
    let mut hasher = DefaultHasher::new();
    records.len().hash(&mut hasher);
    for r in records {
        r.stable_key().hash(&mut hasher);
        r.for_each_search_field(&mut |field| field.hash(&mut hasher));
    }
    hasher.finish()
}
