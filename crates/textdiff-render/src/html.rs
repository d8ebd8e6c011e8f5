//! HTML fragment output matching the viewer's markup.

use crate::renderer::Renderer;
use crate::segment::{RenderableSegment, SegmentStyle};

/// Renders a `<pre>` block with one `<span>` per segment.
#[derive(Clone, Copy, Debug)]
pub struct HtmlRenderer {
    /// Append the Added / Removed colour legend below the block.
    pub legend: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self { legend: true }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, segments: &[RenderableSegment]) -> String {
        let mut out = String::from("<div id=\"output\">\n<p>Differences:</p>\n<pre>");
        for seg in segments {
            out.push_str("<span class=\"");
            out.push_str(seg.style.css_classes());
            out.push_str("\">");
            escape_into(&seg.text, &mut out);
            out.push_str("</span>");
        }
        out.push_str("</pre>\n");
        if self.legend {
            out.push_str(&legend());
        }
        out.push_str("</div>\n");
        out
    }
}

fn legend() -> String {
    format!(
        "<p class=\"legend\"><span class=\"swatch {}\"></span> Added \
         <span class=\"swatch {}\"></span> Removed (with strikethrough)</p>\n",
        swatch(SegmentStyle::Added),
        swatch(SegmentStyle::Removed),
    )
}

/// The background class of a style, used for legend swatches.
fn swatch(style: SegmentStyle) -> &'static str {
    style
        .css_classes()
        .split_whitespace()
        .next()
        .unwrap_or_default()
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
