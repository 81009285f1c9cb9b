//! Freehand path capture for a single press-to-release gesture.
//!
//! Mouse, pen and touch input all funnel into [`PathCapture`]. A touch
//! gesture is pinned to the identifier of the finger that started it; other
//! fingers are ignored until that finger lifts.

use crate::constants::{MIN_GESTURE_SAMPLES, START_DEBOUNCE_MS};
use crate::error::{GestureError, StartRejected};
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

/// Where a sample came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Touch(i32),
}

#[derive(Clone, Debug)]
pub struct CaptureParams {
    pub min_samples: usize,
    pub debounce: Duration,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            min_samples: MIN_GESTURE_SAMPLES,
            debounce: Duration::from_millis(START_DEBOUNCE_MS),
        }
    }
}

/// Screen-space samples of one finished gesture, in capture order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GesturePath(Vec<Vec2>);

impl GesturePath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Vec2> {
        self.0.first().copied()
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing(InputSource),
}

pub struct PathCapture {
    pub params: CaptureParams,
    state: CaptureState,
    samples: Vec<Vec2>,
    last_end: Option<Instant>,
}

impl Default for PathCapture {
    fn default() -> Self {
        Self::new(CaptureParams::default())
    }
}

impl PathCapture {
    pub fn new(params: CaptureParams) -> Self {
        Self {
            params,
            state: CaptureState::Idle,
            samples: Vec::new(),
            last_end: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing(_))
    }

    /// Samples recorded so far by the active gesture.
    pub fn samples(&self) -> &[Vec2] {
        &self.samples
    }

    /// True when `source` belongs to the active gesture.
    pub fn owns(&self, source: InputSource) -> bool {
        match self.state {
            CaptureState::Capturing(active) => active == source,
            CaptureState::Idle => false,
        }
    }

    pub fn start(
        &mut self,
        point: Vec2,
        source: InputSource,
        now: Instant,
    ) -> Result<(), StartRejected> {
        if self.is_capturing() {
            return Err(StartRejected::AlreadyCapturing);
        }
        if let Some(last) = self.last_end {
            let since_end = if now > last {
                now.duration_since(last)
            } else {
                Duration::ZERO
            };
            if since_end < self.params.debounce {
                return Err(StartRejected::Debounced);
            }
        }
        self.samples.clear();
        self.samples.push(point);
        self.state = CaptureState::Capturing(source);
        Ok(())
    }

    /// Append a sample. Returns false when the sample was dropped.
    pub fn add_sample(&mut self, point: Vec2, source: InputSource) -> bool {
        match self.state {
            CaptureState::Capturing(active) if active == source => {
                self.samples.push(point);
                true
            }
            CaptureState::Capturing(_) => false,
            CaptureState::Idle => {
                log::warn!("[capture] sample ({:.0},{:.0}) with no active gesture", point.x, point.y);
                false
            }
        }
    }

    /// Finish the active gesture and hand over its path.
    pub fn end(&mut self, now: Instant) -> Result<GesturePath, GestureError> {
        if !self.is_capturing() {
            // a stray release must not debounce the next real start
            return Err(GestureError::EmptyGesture {
                samples: 0,
                min: self.params.min_samples,
            });
        }
        self.state = CaptureState::Idle;
        self.last_end = Some(now);
        let samples = std::mem::take(&mut self.samples);
        if samples.len() < self.params.min_samples {
            return Err(GestureError::EmptyGesture {
                samples: samples.len(),
                min: self.params.min_samples,
            });
        }
        Ok(GesturePath::new(samples))
    }

    /// Drop the active gesture without producing a path.
    pub fn cancel(&mut self, now: Instant) {
        if self.is_capturing() {
            self.last_end = Some(now);
        }
        self.state = CaptureState::Idle;
        self.samples.clear();
    }
}
