use thiserror::Error;

/// Failures a completed gesture can run into.
///
/// None of these are fatal. `EmptyGesture` is the only one reported to the
/// caller without a score; the others degrade to a fallback template or to a
/// resolution without a target.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("gesture too short: {samples} samples, need at least {min}")]
    EmptyGesture { samples: usize, min: usize },
    #[error("anchor is behind the camera or outside the view")]
    NoProjection,
    #[error("no live target to resolve the gesture against")]
    NoValidTarget,
}

/// Why a gesture start was ignored.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StartRejected {
    #[error("a gesture is already being captured")]
    AlreadyCapturing,
    #[error("gesture start arrived inside the debounce window")]
    Debounced,
    #[error("gesture start is too far from the rune")]
    NotNearTarget,
    #[error("drawing is disabled in the current phase")]
    DrawingDisabled,
}
