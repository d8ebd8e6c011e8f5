//! Rendering adapters for textdiff.
//!
//! Converts a [`textdiff_core::DiffResult`] into [`RenderableSegment`]s and
//! presents them through a [`Renderer`]: wdiff-style plain markers, ANSI
//! terminal colours, or an HTML fragment.

pub mod html;
pub mod renderer;
pub mod segment;

pub use html::HtmlRenderer;
pub use renderer::{render_result, summary, AnsiRenderer, PlainRenderer, Renderer};
pub use segment::{segments, RenderableSegment, SegmentStyle};
