//! Clip-range rules for recorded player actions.
//!
//! Every tagged action owns a clip window into the match video. The window
//! is derived from the moment the operator tags the event, padded by the
//! category's configured lead-in and lead-out, and must always describe a
//! forward range that starts at or after the beginning of the video.

use crate::error::CoreError;
use crate::types::Seconds;

/// Padding applied around an event when a category does not configure one.
pub const DEFAULT_CLIP_PADDING_SECS: Seconds = 5.0;

/// Clamp a clip start to the beginning of the video.
pub fn clamp_clip_start(start: Seconds) -> Seconds {
    start.max(0.0)
}

/// Compute the clip window for an event tagged at `event` seconds.
///
/// Returns `(clip_start, clip_end)` with the start clamped at zero. Events
/// tagged near the start of the video keep their full lead-out.
pub fn clip_window(event: Seconds, before: Seconds, after: Seconds) -> (Seconds, Seconds) {
    (clamp_clip_start(event - before), event + after)
}

/// Validate a clip range before it is persisted.
///
/// Checks:
/// - `start >= 0`
/// - `end > start` (zero or negative duration clips are rejected)
pub fn validate_clip_range(start: Seconds, end: Seconds) -> Result<(), CoreError> {
    if start < 0.0 {
        return Err(CoreError::Validation(format!(
            "clip_start must be >= 0, got {start}"
        )));
    }
    if end <= start {
        return Err(CoreError::Validation(format!(
            "clip_end ({end}) must be greater than clip_start ({start})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
