//! Clock model for yourtime.
//!
//! Everything here is backend-free: the current time cell, the angle and
//! label computations, and the pure view that turns a time into a scene graph.
//! Drawing the scene is the binary's job.

pub mod angles;
pub mod cell;
pub mod palette;
pub mod state;
pub mod time;
pub mod view;

pub use angles::{digital_string, hours_angle, minutes_angle, seconds_angle, Angle};
pub use cell::{Observable, SubscriptionId};
pub use palette::{Palette, Rgba};
pub use state::ClockState;
pub use time::{ClockTime, FixedTimeSource, LocalTimeSource, TimeSource};
pub use view::{render, FaceStyle, Hand, HandKind, Node, Point, SceneGraph, Size};
