//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! drives the interval ticker through `ControlFlow::WaitUntil`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
