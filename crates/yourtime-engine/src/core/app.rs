use std::time::Duration;

use winit::event::WindowEvent;

use crate::time::Tick;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// All callbacks run on the event-loop thread, one at a time.
pub trait App {
    /// Delay from now until the next tick.
    ///
    /// Consulted when the ticker starts and again after every tick, so an app
    /// can keep ticks phase-locked to an outside clock. `None` leaves the
    /// ticker on its fixed interval grid.
    fn next_tick_delay(&mut self) -> Option<Duration> {
        None
    }

    /// Called when the interval ticker fires.
    ///
    /// Ask for a redraw through `runtime` when the tick changed anything visible.
    fn on_tick(&mut self, tick: Tick, runtime: &mut RuntimeCtx) -> AppControl;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
