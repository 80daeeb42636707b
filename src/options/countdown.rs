use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Countdown clock options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CountdownOptions {
    /// Re-evaluation interval in milliseconds.
    pub refresh_ms: u64,
}

impl CountdownOptions {
    /// Refresh interval as a [`Duration`].
    #[must_use]
    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self { refresh_ms: 1000 }
    }
}
