//! Canvas rendering module
//!
//! `shapes` turns a snapshot into 2D primitives; `canvas` replays them on a
//! browser 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{Shape, frame};
