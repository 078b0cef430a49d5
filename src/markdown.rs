//! Markdown rendering for the editor preview and for published posts.
//!
//! Two renderers live here. [`preview`] is the small pass pipeline the
//! editor runs on every keystroke; [`PostRenderer`] renders stored posts
//! with comrak and syntect on the detail page.

pub mod preview;
mod renderer;

pub use preview::render as render_preview;
pub use renderer::PostRenderer;
