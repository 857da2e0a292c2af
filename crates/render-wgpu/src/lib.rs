//! wgpu render backend for the two-cube demo.
//!
//! One shared vertex buffer holds the cube mesh; two independent object
//! bindings reference it, one per cube, and each frame issues two draws
//! with per-object model/color uniforms.
//!
//! # Invariants
//! - The vertex buffer is written once at startup and never again.
//! - Depth testing is configured into the pipeline and applies to every
//!   frame.
//! - Shader validation failure is non-fatal: the diagnostic is logged and
//!   rendering continues degraded.

mod gpu;
mod shaders;

pub use gpu::{CubeRenderer, compile_shader};
pub use shaders::CUBE_SHADER;
