//! Live-stream status resolution and settings validation.
//!
//! The stream is considered live during one fixed weekly window (by default
//! Sunday 09:00-12:00 local time). Outside the window the status is offline
//! and carries the start of the next window.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc, Weekday,
};

use crate::error::CoreError;

/// Valid encoder output resolutions.
pub const VALID_RESOLUTIONS: &[&str] = &["720p", "1080p", "1440p", "2160p"];

/// Valid default visibility values for recorded streams.
pub const VALID_VISIBILITIES: &[&str] = &["public", "members", "private"];

/// Bitrate bounds in kbps.
pub const MIN_BITRATE_KBPS: i32 = 500;
pub const MAX_BITRATE_KBPS: i32 = 20_000;

/// Default HLS playback base of the streaming provider.
pub const DEFAULT_PLAYBACK_BASE: &str = "https://stream.mux.com";

/// A recurring weekly broadcast window in local time. `end_hour` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastWindow {
    pub weekday: Weekday,
    pub start_hour: u32,
    pub end_hour: u32,
    pub utc_offset: FixedOffset,
}

impl Default for BroadcastWindow {
    fn default() -> Self {
        Self {
            weekday: Weekday::Sun,
            start_hour: 9,
            end_hour: 12,
            utc_offset: Utc.fix(),
        }
    }
}

impl BroadcastWindow {
    /// Build a window, rejecting empty or out-of-range hour spans.
    pub fn new(
        weekday: Weekday,
        start_hour: u32,
        end_hour: u32,
        utc_offset_minutes: i32,
    ) -> Result<Self, CoreError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(CoreError::Validation(format!(
                "Broadcast window {start_hour}:00-{end_hour}:00 must satisfy start < end <= 24"
            )));
        }
        let utc_offset = FixedOffset::east_opt(utc_offset_minutes * 60).ok_or_else(|| {
            CoreError::Validation(format!("UTC offset {utc_offset_minutes} minutes is out of range"))
        })?;
        Ok(Self {
            weekday,
            start_hour,
            end_hour,
            utc_offset,
        })
    }

    fn length(&self) -> Duration {
        Duration::hours(i64::from(self.end_hour - self.start_hour))
    }
}

/// Outcome of resolving the window against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Live {
        started_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },
    Offline {
        next_start: DateTime<Utc>,
    },
}

impl StreamState {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Live { .. } => "live",
            Self::Offline { .. } => "offline",
        }
    }
}

/// Resolve whether `now` falls inside `window`.
///
/// When offline, `next_start` is strictly after `now`: on the broadcast day
/// after the window closes it points at the following week.
pub fn resolve(now: DateTime<Utc>, window: &BroadcastWindow) -> StreamState {
    let local = now.with_timezone(&window.utc_offset);

    let today = local.weekday().num_days_from_monday();
    let target = window.weekday.num_days_from_monday();
    let days_ahead = i64::from((target + 7 - today) % 7);

    let start_time = NaiveTime::from_hms_opt(window.start_hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let start_date = local.date_naive() + Duration::days(days_ahead);
    let start_local = window
        .utc_offset
        .from_local_datetime(&start_date.and_time(start_time))
        .single()
        .unwrap_or(local);
    let start = start_local.with_timezone(&Utc);
    let end = start + window.length();

    if now < start {
        StreamState::Offline { next_start: start }
    } else if now < end {
        StreamState::Live {
            started_at: start,
            ends_at: end,
        }
    } else {
        StreamState::Offline {
            next_start: start + Duration::days(7),
        }
    }
}

/// Adaptive-bitrate playback manifest for a provider stream id.
pub fn playback_url(base: &str, stream_id: &str) -> String {
    format!("{}/{}.m3u8", base.trim_end_matches('/'), stream_id)
}

pub fn validate_resolution(resolution: &str) -> Result<(), CoreError> {
    if VALID_RESOLUTIONS.contains(&resolution) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid resolution '{resolution}'. Must be one of: {}",
            VALID_RESOLUTIONS.join(", ")
        )))
    }
}

pub fn validate_visibility(visibility: &str) -> Result<(), CoreError> {
    if VALID_VISIBILITIES.contains(&visibility) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid visibility '{visibility}'. Must be one of: {}",
            VALID_VISIBILITIES.join(", ")
        )))
    }
}

pub fn validate_bitrate(kbps: i32) -> Result<(), CoreError> {
    if (MIN_BITRATE_KBPS..=MAX_BITRATE_KBPS).contains(&kbps) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Max bitrate must be between {MIN_BITRATE_KBPS} and {MAX_BITRATE_KBPS} kbps, got {kbps}"
        )))
    }
}
