use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use winit::dpi::LogicalSize;

use yourtime_engine::coords::Viewport;
use yourtime_engine::core::{App as EngineApp, AppControl, FrameCtx};
use yourtime_engine::device::GpuInit;
use yourtime_engine::paint::Color;
use yourtime_engine::render::shapes::circle::CircleRenderer;
use yourtime_engine::render::shapes::rect::RectRenderer;
use yourtime_engine::render::shapes::text::TextRenderer;
use yourtime_engine::scene::DrawList;
use yourtime_engine::text::FontSystem;
use yourtime_engine::time::Tick;
use yourtime_engine::window::{Runtime, RuntimeConfig, RuntimeCtx};
use yourtime_face::time::until_next_second;
use yourtime_face::view::{render, FaceStyle, Size};
use yourtime_face::ClockState;

use crate::fonts::{self, FontSet};
use crate::painter::Painter;

// ── ClockApp ──────────────────────────────────────────────────────────────

/// Builder for the clock window.
///
/// ```rust,ignore
/// ClockApp::new()
///     .title("In Your Own Time")
///     .size(400.0, 760.0)
///     .run()?;
/// ```
pub struct ClockApp {
    title: String,
    width: f64,
    height: f64,
    style: FaceStyle,
    tick_interval: Duration,
    regular_font: Option<Vec<u8>>,
    bold_font: Option<Vec<u8>>,
    state: Option<ClockState>,
}

impl ClockApp {
    pub fn new() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            title: runtime.title,
            width: runtime.initial_size.width,
            height: runtime.initial_size.height,
            style: FaceStyle::default(),
            tick_interval: runtime.tick_interval,
            regular_font: None,
            bold_font: None,
            state: None,
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Regular-weight font bytes. Without this, system monospace fonts are tried.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.regular_font = Some(data);
        self
    }

    /// Bold font bytes for the title. Falls back to the regular font.
    pub fn bold_font(mut self, data: Vec<u8>) -> Self {
        self.bold_font = Some(data);
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Replaces the clock state, e.g. with one driven by a fixed time source.
    pub fn state(mut self, state: ClockState) -> Self {
        self.state = Some(state);
        self
    }

    /// Opens the window and runs until it is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: None,
            tick_interval: self.tick_interval,
        };
        log::info!(
            "starting {:?} ({}x{}, tick every {:?})",
            config.title,
            self.width,
            self.height,
            config.tick_interval
        );

        let state = ClockAppState::new(self);
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for ClockApp {
    fn default() -> Self {
        Self::new()
    }
}

// ── ClockAppState ─────────────────────────────────────────────────────────

/// Implements `yourtime_engine::core::App` for the clock.
///
/// The draw list is rebuilt only when the time changes or the viewport does;
/// other redraws replay the last recording.
struct ClockAppState {
    clock: ClockState,
    dirty: Rc<Cell<bool>>,
    style: FaceStyle,

    font_system: FontSystem,
    fonts: FontSet,

    draw_list: DrawList,
    clear: Color,
    painted_viewport: Option<Viewport>,

    rect_renderer: RectRenderer,
    circle_renderer: CircleRenderer,
    text_renderer: TextRenderer,
}

impl ClockAppState {
    fn new(app: ClockApp) -> Self {
        let mut font_system = FontSystem::new();
        let regular = app.regular_font.or_else(fonts::system_regular);
        let bold = app.bold_font.or_else(fonts::system_bold);
        let fonts = fonts::load(&mut font_system, regular.as_deref(), bold.as_deref());

        let mut clock = app.state.unwrap_or_default();
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        clock.subscribe(move |_| flag.set(true));

        Self {
            clock,
            dirty,
            style: app.style,
            font_system,
            fonts,
            draw_list: DrawList::new(),
            clear: Color::transparent(),
            painted_viewport: None,
            rect_renderer: RectRenderer::new(),
            circle_renderer: CircleRenderer::new(),
            text_renderer: TextRenderer::new(),
        }
    }

    fn needs_repaint(&self, viewport: Viewport) -> bool {
        self.dirty.get() || self.painted_viewport != Some(viewport)
    }

    fn repaint(&mut self, viewport: Viewport) {
        let time = self.clock.time();
        let scene = render(&time, &self.style, Size::new(viewport.width, viewport.height));
        self.clear = Painter::new(&mut self.draw_list, &self.font_system, self.fonts).paint(&scene);
        self.painted_viewport = Some(viewport);
        self.dirty.set(false);
        log::trace!("repainted {} items", self.draw_list.len());
    }
}

impl EngineApp for ClockAppState {
    fn next_tick_delay(&mut self) -> Option<Duration> {
        // Re-arm from the wall clock every tick; stalls and clock steps
        // would otherwise leave the ticker off the second boundary.
        Some(until_next_second())
    }

    fn on_tick(&mut self, _tick: Tick, runtime: &mut RuntimeCtx) -> AppControl {
        self.clock.tick();
        if self.dirty.get() {
            runtime.request_redraw();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if viewport.is_valid() && self.needs_repaint(viewport) {
            self.repaint(viewport);
        }

        let dl = &mut self.draw_list;
        let fs = &self.font_system;
        let r_r = &mut self.rect_renderer;
        let r_c = &mut self.circle_renderer;
        let r_t = &mut self.text_renderer;

        ctx.render(self.clear, |rctx, target| {
            r_r.render(rctx, target, dl);
            r_c.render(rctx, target, dl);
            r_t.render(rctx, target, dl, fs);
        })
    }
}

#[cfg(test)]
mod tests {
    use yourtime_face::time::{ClockTime, FixedTimeSource};

    use super::*;

    fn app_at(h: u32, m: u32, s: u32, step: i64) -> ClockAppState {
        let start = ClockTime::from_hms(h, m, s).unwrap();
        let app = ClockApp::new()
            .font(Vec::new())
            .bold_font(Vec::new())
            .state(ClockState::with_source(FixedTimeSource::stepping(start, step)));
        ClockAppState::new(app)
    }

    #[test]
    fn builder_overrides_defaults() {
        let app = ClockApp::new()
            .title("clock")
            .size(320.0, 640.0)
            .tick_interval(Duration::from_millis(500));
        assert_eq!(app.title, "clock");
        assert_eq!((app.width, app.height), (320.0, 640.0));
        assert_eq!(app.tick_interval, Duration::from_millis(500));
    }

    #[test]
    fn first_frame_always_paints() {
        let state = app_at(12, 0, 0, 1);
        assert!(state.needs_repaint(Viewport::new(400.0, 800.0)));
    }

    #[test]
    fn repaint_clears_dirty_until_next_tick() {
        let mut state = app_at(12, 0, 0, 1);
        let vp = Viewport::new(400.0, 800.0);
        state.repaint(vp);
        assert!(!state.needs_repaint(vp));
        assert_eq!(state.draw_list.len(), 15 + 2);

        let mut runtime = RuntimeCtx::default();
        assert_eq!(state.on_tick(tick(), &mut runtime), AppControl::Continue);
        assert!(runtime.redraw_requested());
        assert!(state.needs_repaint(vp));
    }

    #[test]
    fn resize_forces_repaint() {
        let mut state = app_at(8, 0, 0, 0);
        state.repaint(Viewport::new(400.0, 800.0));
        assert!(state.needs_repaint(Viewport::new(500.0, 800.0)));
    }

    #[test]
    fn every_tick_is_aligned_to_next_second() {
        use yourtime_face::time::SECOND_BOUNDARY_MARGIN;

        let mut state = app_at(8, 0, 0, 0);
        let mut runtime = RuntimeCtx::default();
        for _ in 0..2 {
            let delay = state.next_tick_delay().unwrap();
            assert!(delay > SECOND_BOUNDARY_MARGIN, "{delay:?}");
            assert!(delay <= Duration::from_secs(1) + SECOND_BOUNDARY_MARGIN, "{delay:?}");
            state.on_tick(tick(), &mut runtime);
        }
    }

    fn tick() -> Tick {
        let mut ticker = yourtime_engine::time::Ticker::new(
            Duration::from_secs(1),
            std::time::Instant::now(),
        );
        let deadline = ticker.deadline();
        ticker.poll(deadline).unwrap()
    }
}
