//! Pattern-based record extraction
//!
//! Each document kind is described by one or more [`RecordShape`]s: a strict
//! header pattern that must match as a single unit, a loose boundary pattern
//! that marks where any record of that kind starts, and a builder that turns
//! the header captures plus the record body into a typed record.
//!
//! A record body runs from the end of its header to the next boundary match
//! (recognized or not) or the end of the document. Boundaries that never
//! match the strict header are counted as skipped so dropped records are
//! visible in the migration summary.

pub mod active;
pub mod completed;
pub mod sprints;

pub use active::extract_active_tasks;
pub use completed::extract_completed_tasks;
pub use sprints::extract_sprint_plan;

use log::{debug, warn};
use regex::{Captures, Regex};

/// Result of running an extractor over one document
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    /// The assembled record tree
    pub record: T,

    /// Number of records recognized
    pub recognized: usize,

    /// Candidate headers that did not match the strict layout
    pub skipped: usize,
}

/// A record kind that can be located and built from a document
pub trait RecordShape {
    type Record;

    /// Human-readable kind, used in log messages
    const KIND: &'static str;

    /// Strict header pattern; all captures the builder needs live here
    fn header(&self) -> &Regex;

    /// Loose pattern marking the start of any record of this kind
    fn boundary(&self) -> &Regex;

    /// Build a record from its header captures and body text
    ///
    /// Returning `None` drops the record and counts it as skipped.
    fn build(&self, header: &Captures<'_>, body: &str) -> Option<Self::Record>;
}

/// Records found by [`extract_records`]
#[derive(Debug, Clone, PartialEq)]
pub struct Records<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

/// Find every record of `shape` in `doc`, in document order
pub fn extract_records<S: RecordShape>(doc: &str, shape: &S) -> Records<S::Record> {
    let candidates = shape.boundary().find_iter(doc).count();
    let mut items = Vec::new();
    let mut failed = 0usize;

    for caps in shape.header().captures_iter(doc) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let rest = &doc[whole.end()..];
        let end = shape.boundary().find(rest).map(|m| m.start()).unwrap_or(rest.len());
        let body = &rest[..end];

        match shape.build(&caps, body) {
            Some(record) => items.push(record),
            None => {
                debug!("Dropped {} at byte {}: header values out of range", S::KIND, whole.start());
                failed += 1;
            }
        }
    }

    let skipped = candidates.saturating_sub(items.len()).max(failed);
    if skipped > 0 {
        warn!(
            "Skipped {} {} header(s) that did not match the expected layout",
            skipped,
            S::KIND
        );
    }
    debug!("Extracted {} {} record(s)", items.len(), S::KIND);

    Records { items, skipped }
}

/// Normalize line endings and guarantee a trailing newline
///
/// Block patterns require each line to end in `\n`; without this the last
/// line of a file that lacks a final newline would silently drop out.
pub fn normalize(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// First capture group of the first match, trimmed
pub(crate) fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Capture group `index`, trimmed; empty when the group did not participate
pub(crate) fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index).map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

/// Capture group `index` parsed as a counter
pub(crate) fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().trim().parse().ok()
}

/// Non-empty lines of the block captured by group 1 of `re`
pub(crate) fn block_lines<'h>(re: &Regex, text: &'h str) -> Vec<&'h str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|block| {
            block
                .as_str()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Free text after `**Description**:` up to the next bold label paragraph
pub(crate) fn description(span: &str) -> String {
    const LABEL: &str = "**Description**:\n";
    const BOUNDARY: &str = "\n\n**";

    let Some(start) = span.find(LABEL) else {
        return String::new();
    };
    let body = &span[start + LABEL.len()..];

    // The description holds at least one character before the boundary
    let Some(first) = body.chars().next().map(char::len_utf8) else {
        return String::new();
    };
    match body[first..].find(BOUNDARY) {
        Some(end) => body[..first + end].trim().to_string(),
        None => String::new(),
    }
}
