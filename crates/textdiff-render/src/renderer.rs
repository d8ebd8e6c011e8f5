//! Text renderers: plain markers and ANSI terminal styling.

use colored::{ColoredString, Colorize};
use textdiff_core::{DiffResult, DiffStats};

use crate::segment::{segments, RenderableSegment, SegmentStyle};

/// Turns styled segments into a presentation string.
///
/// Renderers hold no mutable state: rendering the same segments twice
/// yields the same output.
pub trait Renderer {
    fn render(&self, segments: &[RenderableSegment]) -> String;
}

/// Render a whole diff result with `renderer`.
pub fn render_result(diff: &DiffResult, renderer: &dyn Renderer) -> String {
    renderer.render(&segments(diff))
}

/// wdiff-style markers: `[-removed-]` and `{+added+}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, segments: &[RenderableSegment]) -> String {
        let mut out = String::new();
        for seg in segments {
            match seg.style {
                SegmentStyle::Unchanged => out.push_str(&seg.text),
                SegmentStyle::Added => {
                    out.push_str("{+");
                    out.push_str(&seg.text);
                    out.push_str("+}");
                }
                SegmentStyle::Removed => {
                    out.push_str("[-");
                    out.push_str(&seg.text);
                    out.push_str("-]");
                }
            }
        }
        out
    }
}

/// Terminal output with the viewer's palette: light green on dark green for
/// additions, struck-through light red on dark red for removals.
#[derive(Clone, Copy, Debug)]
pub struct AnsiRenderer {
    /// When `false`, falls back to [`PlainRenderer`] markers.
    pub color: bool,
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self { color: true }
    }
}

impl AnsiRenderer {
    fn paint(style: SegmentStyle, text: &str) -> ColoredString {
        match style {
            SegmentStyle::Unchanged => text.normal(),
            SegmentStyle::Added => text.truecolor(134, 239, 172).on_truecolor(20, 83, 45),
            SegmentStyle::Removed => text
                .truecolor(252, 165, 165)
                .on_truecolor(127, 29, 29)
                .strikethrough(),
        }
    }
}

impl Renderer for AnsiRenderer {
    fn render(&self, segments: &[RenderableSegment]) -> String {
        if !self.color {
            return PlainRenderer.render(segments);
        }
        segments
            .iter()
            .map(|seg| Self::paint(seg.style, &seg.text).to_string())
            .collect()
    }
}

/// One-line summary, e.g. `2 changes: +6 -6 chars, 50.0% similar`.
pub fn summary(stats: &DiffStats) -> String {
    let noun = if stats.changes == 1 { "change" } else { "changes" };
    format!(
        "{} {}: +{} -{} chars, {:.1}% similar",
        stats.changes,
        noun,
        stats.inserted,
        stats.deleted,
        stats.similarity() * 100.0
    )
}
