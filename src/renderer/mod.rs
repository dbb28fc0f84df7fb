//! WebGPU rendering module
//!
//! Shapes are tessellated on the CPU into flat-colored triangles; text is handed back to
//! the frontend as labels.

pub mod frame;
pub mod pipeline;

pub use frame::{FrameBuilder, TextLabel, Vertex};
pub use pipeline::{RenderState, court_to_ndc};
