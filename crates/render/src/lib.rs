//! Rendering side of dynamic lights.
//!
//! # Invariants
//! - Renderers read light state; they never mutate the registry.
//! - A section is pending in the rebuild queue at most once.
//!
//! The real mesh rebuild belongs to the host engine. `RebuildQueue` stands in
//! for its scheduling queue, and `DebugTextRenderer` draws the lightmap as text.

mod queue;
mod renderer;

pub use queue::RebuildQueue;
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "dynlights-render v0.1.0"
}
