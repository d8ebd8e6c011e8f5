//! The edit script produced by a comparison.
//!
//! A [`DiffResult`] is an ordered list of [`DiffOperation`]s. Replaying the
//! `Equal` and `Delete` operations yields the original text; replaying the
//! `Equal` and `Insert` operations yields the modified text.

use serde::{Deserialize, Serialize};

use crate::tokenize::Granularity;

/// The kind of a single edit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Text present on both sides.
    Equal,
    /// Text only present in the modified document.
    Insert,
    /// Text only present in the original document.
    Delete,
}

impl DiffKind {
    /// Returns `true` for `Insert` and `Delete`.
    pub fn is_change(self) -> bool {
        !matches!(self, DiffKind::Equal)
    }
}

/// A contiguous run of text sharing one [`DiffKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOperation {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffOperation {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Delete, text)
    }
}

/// The result of comparing two texts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// The granularity the texts were tokenized at.
    pub granularity: Granularity,
    /// The edit script, in document order.
    pub operations: Vec<DiffOperation>,
}

impl DiffResult {
    pub fn new(granularity: Granularity, operations: Vec<DiffOperation>) -> Self {
        Self {
            granularity,
            operations,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn operations(&self) -> &[DiffOperation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the script has no operations (both inputs empty).
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns `true` if the script contains no insertions or deletions.
    pub fn is_identical(&self) -> bool {
        self.operations.iter().all(|op| !op.kind.is_change())
    }

    /// Rebuild the original text from the `Equal` and `Delete` operations.
    pub fn original_text(&self) -> String {
        self.collect(DiffKind::Delete)
    }

    /// Rebuild the modified text from the `Equal` and `Insert` operations.
    pub fn modified_text(&self) -> String {
        self.collect(DiffKind::Insert)
    }

    fn collect(&self, side: DiffKind) -> String {
        self.operations
            .iter()
            .filter(|op| op.kind == DiffKind::Equal || op.kind == side)
            .map(|op| op.text.as_str())
            .collect()
    }

    /// Replay the script against `original`.
    ///
    /// Returns `None` if the retained and deleted segments do not match
    /// `original` exactly.
    pub fn apply(&self, original: &str) -> Option<String> {
        let mut rest = original;
        let mut out = String::with_capacity(original.len());
        for op in &self.operations {
            match op.kind {
                DiffKind::Equal => {
                    rest = rest.strip_prefix(op.text.as_str())?;
                    out.push_str(&op.text);
                }
                DiffKind::Delete => {
                    rest = rest.strip_prefix(op.text.as_str())?;
                }
                DiffKind::Insert => out.push_str(&op.text),
            }
        }
        rest.is_empty().then_some(out)
    }

    /// Summary counts for the script.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for op in &self.operations {
            let chars = op.text.chars().count();
            match op.kind {
                DiffKind::Equal => stats.equal += chars,
                DiffKind::Insert => {
                    stats.inserted += chars;
                    stats.changes += 1;
                }
                DiffKind::Delete => {
                    stats.deleted += chars;
                    stats.changes += 1;
                }
            }
        }
        stats
    }
}

/// Character counts for a [`DiffResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Characters retained from the original.
    pub equal: usize,
    /// Characters added by the modified text.
    pub inserted: usize,
    /// Characters removed from the original.
    pub deleted: usize,
    /// Number of `Insert` and `Delete` operations.
    pub changes: usize,
}

impl DiffStats {
    /// Similarity in `[0, 1]`: twice the retained characters over the total
    /// length of both texts. Two empty texts are fully similar.
    pub fn similarity(&self) -> f64 {
        let total = 2 * self.equal + self.inserted + self.deleted;
        if total == 0 {
            return 1.0;
        }
        (2 * self.equal) as f64 / total as f64
    }
}
