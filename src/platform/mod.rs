//! Platform abstraction layer
//!
//! Browser-side presentation: replays draw commands onto a 2D canvas.
//! Native builds render headless into a `DrawList` and need nothing here.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
