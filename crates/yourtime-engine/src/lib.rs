//! yourtime engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the clock application:
//! window loop, interval ticker, draw stream and shape renderers.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
