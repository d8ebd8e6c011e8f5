//! The presentation-neutral view of an edit script.

use serde::{Deserialize, Serialize};
use textdiff_core::{DiffKind, DiffResult};

/// How a segment should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    /// Text common to both documents.
    Unchanged,
    /// Text only in the modified document.
    Added,
    /// Text only in the original document.
    Removed,
}

impl SegmentStyle {
    /// CSS classes used by the HTML renderer.
    pub fn css_classes(self) -> &'static str {
        match self {
            SegmentStyle::Unchanged => "text-slate-300",
            SegmentStyle::Added => "bg-green-900 text-green-300",
            SegmentStyle::Removed => "bg-red-900 text-red-300 line-through",
        }
    }
}

impl From<DiffKind> for SegmentStyle {
    fn from(kind: DiffKind) -> Self {
        match kind {
            DiffKind::Equal => SegmentStyle::Unchanged,
            DiffKind::Insert => SegmentStyle::Added,
            DiffKind::Delete => SegmentStyle::Removed,
        }
    }
}

/// A styled run of text, ready for a renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderableSegment {
    pub style: SegmentStyle,
    pub text: String,
}

/// Map every operation of `diff` to a segment, preserving order.
pub fn segments(diff: &DiffResult) -> Vec<RenderableSegment> {
    diff.operations()
        .iter()
        .map(|op| RenderableSegment {
            style: op.kind.into(),
            text: op.text.clone(),
        })
        .collect()
}
