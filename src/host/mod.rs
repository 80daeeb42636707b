//! Host integration: frame scheduling and resize notifications.
//!
//! The animation never re-invokes itself. Instead a [`FireworksTask`] asks
//! its host for the next frame, and the host calls back into the task when
//! that frame arrives. Hosts also tell the task when the viewport changes
//! size, but only while the task is subscribed.
//!
//! [`FireworksTask`]: crate::engine::FireworksTask

/// Handle for one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// What the animation needs from its environment.
pub trait AnimationHost {
    /// Arrange for the task's `on_frame` to be invoked once before the next
    /// repaint. Returns `None` if the host could not schedule the frame.
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Withdraw a pending request so its frame is never delivered.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Start forwarding viewport size changes to the task.
    fn subscribe_resize(&mut self);

    /// Stop forwarding viewport size changes.
    fn unsubscribe_resize(&mut self);
}

/// Host driven by hand, for headless rendering and tests.
///
/// Requests are queued rather than delivered; the owner decides when a
/// frame "arrives" by calling [`ManualHost::take_pending`] and then the
/// task's `on_frame`.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: u64,
    pending: Option<FrameRequest>,
    resize_subscribed: bool,
    requests: u64,
    cancellations: u64,
}

impl ManualHost {
    /// A host with nothing scheduled and no resize subscription.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding frame request, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Remove and return the outstanding request, as a real host does when
    /// it fires the callback.
    pub fn take_pending(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    /// Whether resize notifications are currently forwarded.
    #[must_use]
    pub fn is_resize_subscribed(&self) -> bool {
        self.resize_subscribed
    }

    /// Total frames requested over the host's lifetime.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Total requests withdrawn over the host's lifetime.
    #[must_use]
    pub fn cancellations(&self) -> u64 {
        self.cancellations
    }
}

impl AnimationHost for ManualHost {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.next_id += 1;
        self.requests += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
            self.cancellations += 1;
        }
    }

    fn subscribe_resize(&mut self) {
        self.resize_subscribed = true;
    }

    fn unsubscribe_resize(&mut self) {
        self.resize_subscribed = false;
    }
}
