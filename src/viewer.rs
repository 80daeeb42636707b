//! Standalone fireworks window backed by winit.
//!
//! The particle loop paints a software [`PixelCanvas`], which is uploaded and
//! presented through wgpu every frame. The window title carries the New Year
//! countdown.
//!
//! ```no_run
//! # use fireworks::Viewer;
//! Viewer::builder()
//!     .with_title("Fireworks")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use chrono::{Local, TimeZone};
use web_time::Duration;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    countdown::Countdown,
    engine::{AnimationEngine, FireworksTask},
    error::FireworksError,
    gpu::present::CanvasPresenter,
    host::{AnimationHost, FrameRequest},
    options::Options,
    surface::PixelCanvas,
    util::frame_timing::FrameTiming,
};

const STATS_INTERVAL: Duration = Duration::from_secs(5);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with the default title and options.
    fn new() -> Self {
        Self {
            options: None,
            title: "Fireworks".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title. The countdown is appended to it.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the fireworks.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError`] if the event loop, the GPU context or the
    /// countdown cannot be set up.
    pub fn run(self) -> Result<(), FireworksError> {
        let event_loop = EventLoop::new()
            .map_err(|e| FireworksError::Viewer(e.to_string()))?;
        // Frames are driven by redraw requests; idle once stopped.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            state: None,
            options: self.options,
            title: self.title,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| FireworksError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Window host ──────────────────────────────────────────────────────────

/// Schedules frames through winit redraw requests.
///
/// winit cannot withdraw a redraw request, so cancellation clears the
/// pending handle instead and the redraw that still arrives delivers no
/// frame.
struct WindowHost {
    window: Arc<Window>,
    next_id: u64,
    pending: Option<FrameRequest>,
    resize_subscribed: bool,
}

impl WindowHost {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
            resize_subscribed: false,
        }
    }

    fn take_pending(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }
}

impl AnimationHost for WindowHost {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        self.window.request_redraw();
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn subscribe_resize(&mut self) {
        self.resize_subscribed = true;
    }

    fn unsubscribe_resize(&mut self) {
        self.resize_subscribed = false;
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Everything that exists once the window is open.
struct ViewerState {
    window: Arc<Window>,
    presenter: CanvasPresenter,
    task: FireworksTask<PixelCanvas, WindowHost>,
    countdown: Countdown,
    timing: FrameTiming,
}

/// Internal winit application handler.
struct ViewerApp {
    state: Option<ViewerState>,
    options: Options,
    title: String,
    error: Option<FireworksError>,
}

/// Canvas size for a window size, or `None` while minimized.
fn canvas_size(inner: winit::dpi::PhysicalSize<u32>) -> Option<(u32, u32)> {
    (inner.width > 0 && inner.height > 0).then_some((inner.width, inner.height))
}

impl ViewerApp {
    fn open(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<ViewerState, FireworksError> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| FireworksError::Viewer(e.to_string()))?,
        );
        let inner = window.inner_size();
        let (width, height) = (inner.width.max(1), inner.height.max(1));

        let canvas = PixelCanvas::new(width, height);
        let presenter =
            pollster::block_on(CanvasPresenter::new(window.clone(), &canvas))?;
        let countdown =
            Countdown::until_next_new_year(self.options.countdown.refresh())?;

        let engine = AnimationEngine::new(self.options.clone());
        let host = WindowHost::new(window.clone());
        let mut task = FireworksTask::new(engine, canvas, host);
        task.start()?;

        Ok(ViewerState {
            window,
            presenter,
            task,
            countdown,
            timing: FrameTiming::new(STATS_INTERVAL),
        })
    }
}

fn update_title(title: &str, state: &ViewerState) {
    state
        .window
        .set_title(&window_title(title, &state.countdown));
}

/// Title text: the countdown, or the greeting once it has run out.
fn window_title<Tz: TimeZone>(
    title: &str,
    countdown: &Countdown<Tz>,
) -> String {
    let left = countdown.time_left();
    if left.is_zero() {
        format!("{title} | Happy New Year {}!", countdown.year())
    } else {
        format!("{title} | {} in {left}", countdown.year())
    }
}

impl ViewerState {
    fn resize(&mut self, width: u32, height: u32) {
        self.presenter.resize(width, height);
        self.task.surface_mut().resize(width, height);
        if self.task.host().resize_subscribed {
            self.task.on_resize(width, height);
        }
    }

    fn redraw(&mut self) {
        if self.task.host_mut().take_pending().is_some() {
            self.task.on_frame();
            self.timing.end_frame();
            if let Some(report) =
                self.timing.report(self.task.engine().bursts_spawned())
            {
                log::debug!(
                    "{:.1} fps, {:.2} bursts/s, {} particles",
                    report.fps,
                    report.bursts_per_second,
                    self.task.engine().particles().len()
                );
            }
        }

        match self.presenter.present(self.task.surface()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let inner = self.window.inner_size();
                self.presenter.resize(inner.width, inner.height);
                self.window.request_redraw();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(state) => {
                update_title(&self.title, &state);
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to start fireworks: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                state.task.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some((width, height)) = canvas_size(size) {
                    state.resize(width, height);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                state.redraw();
                if state.countdown.tick(&Local::now()) {
                    update_title(&self.title, state);
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeDelta, Utc};

    #[test]
    fn title_counts_down_then_greets() {
        let start = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 58).unwrap();
        let mut countdown =
            Countdown::starting_at(&start, Duration::from_secs(1)).unwrap();
        assert_eq!(
            window_title("Fireworks", &countdown),
            "Fireworks | 2027 in 00:00:00:02"
        );
        assert!(countdown.tick(&(start + TimeDelta::seconds(3))));
        assert_eq!(
            window_title("Fireworks", &countdown),
            "Fireworks | Happy New Year 2027!"
        );
    }

    #[test]
    fn minimized_window_has_no_canvas_size() {
        assert_eq!(
            canvas_size(winit::dpi::PhysicalSize::new(0, 480)),
            None
        );
        assert_eq!(
            canvas_size(winit::dpi::PhysicalSize::new(640, 480)),
            Some((640, 480))
        );
    }
}
