//! Countdown to the next New Year.
//!
//! The clock is sampled on a fixed interval, not every frame. Callers pass
//! the current time in, so the breakdown is a pure function of two
//! instants.

use std::{fmt, time::Duration};

use chrono::{DateTime, Datelike, Local, TimeDelta, TimeZone};

use crate::error::FireworksError;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Remaining time split into calendar-free fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    /// Whole days.
    pub days: u64,
    /// Hours past the whole days, `0..24`.
    pub hours: u8,
    /// Minutes past the whole hours, `0..60`.
    pub minutes: u8,
    /// Seconds past the whole minutes, `0..60`.
    pub seconds: u8,
}

impl TimeLeft {
    /// Time from `now` until `target`, rounded down to whole seconds. Zero
    /// once `target` has passed.
    #[must_use]
    pub fn between<Tz: TimeZone>(
        now: &DateTime<Tz>,
        target: &DateTime<Tz>,
    ) -> Self {
        let millis = target.clone().signed_duration_since(now.clone());
        let millis = u64::try_from(millis.num_milliseconds()).unwrap_or(0);
        Self::from_seconds(millis / 1000)
    }

    /// Split a whole number of seconds.
    #[must_use]
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: ((total / 3600) % 24) as u8,
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Whether the countdown has run out.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The four display fields as `(name, value)`, largest unit first, each
    /// value zero-padded to at least two digits.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("days", format!("{:02}", self.days)),
            ("hours", format!("{:02}", self.hours)),
            ("minutes", format!("{:02}", self.minutes)),
            ("seconds", format!("{:02}", self.seconds)),
        ]
    }
}

/// Zero-padded `DD:HH:MM:SS`. Days widen past two digits as needed.
impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Midnight on 1 January of the year after `now`, in `now`'s time zone.
#[must_use]
pub fn next_new_year<Tz: TimeZone>(
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    now.timezone()
        .with_ymd_and_hms(now.year() + 1, 1, 1, 0, 0, 0)
        .earliest()
}

/// A countdown to a fixed instant, re-evaluated at most once per refresh
/// interval.
///
/// Refreshes fall on a grid of whole intervals measured back from the
/// target, so with a one second interval each refresh follows the second
/// the display changes and late frames never make it skip a value.
#[derive(Debug, Clone)]
pub struct Countdown<Tz: TimeZone = Local> {
    target: DateTime<Tz>,
    refresh: TimeDelta,
    next_due: Option<DateTime<Tz>>,
    current: TimeLeft,
}

impl Countdown<Local> {
    /// Count down to the next local New Year from the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::Clock`] if local midnight on 1 January
    /// cannot be resolved.
    pub fn until_next_new_year(
        refresh: Duration,
    ) -> Result<Self, FireworksError> {
        Self::starting_at(&Local::now(), refresh)
    }
}

impl<Tz: TimeZone> Countdown<Tz> {
    /// Count down from `now` to the following New Year.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::Clock`] if the target instant does not
    /// exist in `now`'s time zone.
    pub fn starting_at(
        now: &DateTime<Tz>,
        refresh: Duration,
    ) -> Result<Self, FireworksError> {
        let target = next_new_year(now).ok_or_else(|| {
            FireworksError::Clock(format!(
                "no midnight on 1 January {}",
                now.year() + 1
            ))
        })?;
        let refresh = TimeDelta::from_std(refresh)
            .ok()
            .filter(|r| r.num_milliseconds() > 0)
            .unwrap_or_else(|| TimeDelta::seconds(1));
        let mut countdown = Self {
            target,
            refresh,
            next_due: None,
            current: TimeLeft::default(),
        };
        let _ = countdown.tick(now);
        Ok(countdown)
    }

    /// Re-evaluate once `now` is past the next refresh instant. Returns
    /// `true` when the displayed value changed.
    pub fn tick(&mut self, now: &DateTime<Tz>) -> bool {
        if self.next_due.as_ref().is_some_and(|due| now <= due) {
            return false;
        }
        self.next_due = Some(self.following_refresh(now));
        let next = TimeLeft::between(now, &self.target);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Earliest refresh instant `target - k * refresh` not before `now`,
    /// or one interval on once the target has passed. The displayed value
    /// changes just after each such instant.
    fn following_refresh(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let remaining = self
            .target
            .clone()
            .signed_duration_since(now.clone())
            .num_milliseconds();
        if remaining <= 0 {
            return now.clone() + self.refresh;
        }
        let step = self.refresh.num_milliseconds();
        let intervals = remaining / step;
        let Some(offset) = intervals
            .checked_mul(step)
            .and_then(TimeDelta::try_milliseconds)
        else {
            return now.clone() + self.refresh;
        };
        self.target.clone() - offset
    }

    /// Value as of the last evaluation.
    #[must_use]
    pub fn time_left(&self) -> TimeLeft {
        self.current
    }

    /// The year being counted down to.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.target.year()
    }
}
