use rand::{rngs::StdRng, Rng};

use super::AnimationEngine;
use crate::{
    error::FireworksError,
    host::{AnimationHost, FrameRequest},
    surface::RenderSurface,
};

/// Lifecycle of a [`FireworksTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// No frame pending. Initial state, and the state after `stop`.
    Stopped,
    /// A frame has been requested from the host.
    Running(FrameRequest),
}

/// Owns one engine, the surface it paints and the host that schedules it.
///
/// Every delivered frame performs exactly one [`AnimationEngine::step`] and
/// re-arms by requesting the next frame. [`stop`](Self::stop) withdraws the
/// pending request and the resize subscription; frames or resizes that
/// still arrive afterwards are ignored.
pub struct FireworksTask<S, H, R = StdRng> {
    engine: AnimationEngine<R>,
    surface: S,
    host: H,
    state: TaskState,
}

impl<S, H, R> FireworksTask<S, H, R>
where
    S: RenderSurface,
    H: AnimationHost,
    R: Rng,
{
    /// Assemble a stopped task.
    pub fn new(engine: AnimationEngine<R>, surface: S, host: H) -> Self {
        Self {
            engine,
            surface,
            host,
            state: TaskState::Stopped,
        }
    }

    /// Mount: size the engine to the surface, subscribe to resizes, run the
    /// first frame and arm the next one. Starting a running task does
    /// nothing; starting a stopped one begins from an empty sky.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::Surface`] if the surface has no area.
    pub fn start(&mut self) -> Result<(), FireworksError> {
        if self.is_running() {
            return Ok(());
        }
        let (width, height) = self.surface.dimensions();
        if width == 0 || height == 0 {
            return Err(FireworksError::Surface(format!(
                "surface is {width}x{height}"
            )));
        }
        self.engine.clear();
        self.engine.initialize(width, height);
        self.host.subscribe_resize();
        log::info!("fireworks started on a {width}x{height} surface");

        self.engine.step(&mut self.surface);
        self.arm();
        Ok(())
    }

    /// Host callback for a delivered frame.
    pub fn on_frame(&mut self) {
        if !self.is_running() {
            return;
        }
        self.engine.step(&mut self.surface);
        self.arm();
    }

    /// Host callback for a viewport size change. Ignored while stopped.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.is_running() {
            self.engine.resize(width, height);
        }
    }

    /// Unmount: cancel the pending frame and detach from resizes.
    pub fn stop(&mut self) {
        if let TaskState::Running(request) =
            std::mem::replace(&mut self.state, TaskState::Stopped)
        {
            self.host.cancel_frame(request);
            self.host.unsubscribe_resize();
            log::info!(
                "fireworks stopped with {} particles in flight",
                self.engine.particles().len()
            );
        }
    }

    fn arm(&mut self) {
        if let Some(request) = self.host.request_frame() {
            self.state = TaskState::Running(request);
        } else {
            log::warn!("host refused a frame request; stopping fireworks");
            self.state = TaskState::Stopped;
            self.host.unsubscribe_resize();
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Whether a frame is pending.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TaskState::Running(_))
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &AnimationEngine<R> {
        &self.engine
    }

    /// Mutable engine access, e.g. to swap options.
    pub fn engine_mut(&mut self) -> &mut AnimationEngine<R> {
        &mut self.engine
    }

    /// The surface being painted.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for hosts that resize their backing store.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
