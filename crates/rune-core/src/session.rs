//! One gesture-and-resolve cycle: `Idle -> Capturing -> Resolving -> Idle`.
//!
//! [`SpellSession`] owns the path capture and the scoring/projection/selection
//! parameters. The scene is passed in on every call as a [`SceneView`]
//! because the camera and the targets change every frame.

use crate::camera::CameraProvider;
use crate::capture::{CaptureParams, GesturePath, InputSource, PathCapture};
use crate::constants::{PROXIMITY_PX, TOUCH_PROXIMITY_MULTIPLIER};
use crate::error::{GestureError, StartRejected};
use crate::scoring::{score_paths, InputProfile, ScoreBreakdown, ScoringParams};
use crate::shape::looks_like_s;
use crate::targeting::{
    explicit_pick, near_any_anchor, select_with_intent, Selection, SelectionParams, Target,
};
use crate::template::{ProjectionParams, TemplatePath, TemplateProjector, TemplateSource};
use glam::Vec2;
use instant::Instant;

/// Where the template is drawn for the current phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TemplateMode {
    /// Fixed position on a 2D canvas (the cage popup).
    Screen { anchor: Vec2, scale: f32 },
    /// Attached to the selected target's rune.
    World,
}

/// What a gesture start has to satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartGate {
    Open,
    /// Within proximity of some template vertex.
    NearTemplate,
    /// Within proximity of an alive target's projected rune.
    NearAnchor,
    /// At least one alive target.
    AnyAlive,
}

pub struct SceneView<'a, T> {
    pub camera: Option<&'a dyn CameraProvider>,
    pub targets: &'a [T],
    pub mode: TemplateMode,
    pub gate: StartGate,
    /// Used to center the fallback template when no camera is available.
    pub viewport: Vec2,
}

impl<'a, T: Target> SceneView<'a, T> {
    pub fn screen(anchor: Vec2, scale: f32, viewport: Vec2) -> Self {
        Self {
            camera: None,
            targets: &[],
            mode: TemplateMode::Screen { anchor, scale },
            gate: StartGate::NearTemplate,
            viewport,
        }
    }

    pub fn world(camera: &'a dyn CameraProvider, targets: &'a [T], gate: StartGate) -> Self {
        Self {
            camera: Some(camera),
            targets,
            mode: TemplateMode::World,
            gate,
            viewport: camera.viewport(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionParams {
    pub capture: CaptureParams,
    pub scoring: ScoringParams,
    pub projection: ProjectionParams,
    pub selection: SelectionParams,
    pub proximity_px: f32,
}

impl SessionParams {
    pub fn for_profile(profile: InputProfile) -> Self {
        let proximity_px = match profile {
            InputProfile::Desktop => PROXIMITY_PX,
            InputProfile::Touch => PROXIMITY_PX * TOUCH_PROXIMITY_MULTIPLIER,
        };
        Self {
            capture: CaptureParams::default(),
            scoring: ScoringParams::for_profile(profile),
            projection: ProjectionParams::for_profile(profile),
            selection: SelectionParams::for_profile(profile),
            proximity_px,
        }
    }
}

impl Default for SessionParams {
    fn default() -> Self {
        Self::for_profile(InputProfile::Desktop)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Capturing,
    Resolving,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub breakdown: ScoreBreakdown,
    pub target: Option<Selection>,
    pub template: TemplateSource,
    pub samples: usize,
    /// Whether the raw path swings left-right like an "S". Informational.
    pub s_like: bool,
}

impl Resolution {
    pub fn score(&self) -> f32 {
        self.breakdown.score
    }

    pub fn target_index(&self) -> Result<usize, GestureError> {
        self.target
            .map(|s| s.index)
            .ok_or(GestureError::NoValidTarget)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Resolved(Resolution),
    Rejected(GestureError),
}

pub struct SpellSession {
    pub params: SessionParams,
    capture: PathCapture,
    projector: TemplateProjector,
    /// Target the gesture started on, picked under the camera of that frame.
    start_target: Option<usize>,
    state: SessionState,
}

impl Default for SpellSession {
    fn default() -> Self {
        Self::new(SessionParams::default())
    }
}

impl SpellSession {
    pub fn new(params: SessionParams) -> Self {
        Self {
            capture: PathCapture::new(params.capture.clone()),
            projector: TemplateProjector::new(params.projection.clone()),
            params,
            start_target: None,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn capture(&self) -> &PathCapture {
        &self.capture
    }

    pub fn projector(&self) -> &TemplateProjector {
        &self.projector
    }

    pub fn owns(&self, source: InputSource) -> bool {
        self.capture.owns(source)
    }

    pub fn begin<T: Target>(
        &mut self,
        point: Vec2,
        source: InputSource,
        now: Instant,
        scene: &SceneView<'_, T>,
    ) -> Result<(), StartRejected> {
        if self.capture.is_capturing() {
            return Err(StartRejected::AlreadyCapturing);
        }
        self.check_gate(point, scene)?;
        self.capture.start(point, source, now)?;
        self.start_target = match (scene.mode, scene.camera) {
            (TemplateMode::World, Some(camera)) => {
                explicit_pick(scene.targets, camera, point, &self.params.selection)
            }
            _ => None,
        };
        self.state = SessionState::Capturing;
        Ok(())
    }

    pub fn sample(&mut self, point: Vec2, source: InputSource) -> bool {
        self.capture.add_sample(point, source)
    }

    pub fn cancel(&mut self, now: Instant) {
        self.capture.cancel(now);
        self.start_target = None;
        self.state = SessionState::Idle;
    }

    /// End the gesture and resolve it against the current scene.
    pub fn finish<T: Target>(&mut self, now: Instant, scene: &SceneView<'_, T>) -> Outcome {
        let path = match self.capture.end(now) {
            Ok(p) => p,
            Err(e) => {
                self.start_target = None;
                self.state = SessionState::Idle;
                log::debug!("[session] {}", e);
                return Outcome::Rejected(e);
            }
        };
        self.state = SessionState::Resolving;
        let intended = self.start_target.take();
        let resolution = self.resolve(&path, intended, scene);
        self.state = SessionState::Idle;
        log::info!(
            "[session] resolved: score={:.2} (drawing={:.2}, coverage={:.2}) target={:?}",
            resolution.breakdown.score,
            resolution.breakdown.drawing_accuracy,
            resolution.breakdown.template_coverage,
            resolution.target.map(|s| s.index)
        );
        Outcome::Resolved(resolution)
    }

    /// Score a finished path. Pure with respect to the session state.
    /// `intended` is the target picked when the gesture started, if any.
    pub fn resolve<T: Target>(
        &self,
        path: &GesturePath,
        intended: Option<usize>,
        scene: &SceneView<'_, T>,
    ) -> Resolution {
        let (target, (template, source)) = self.target_and_template(intended, scene);
        Resolution {
            breakdown: score_paths(path.points(), template.points(), &self.params.scoring),
            target,
            template: source,
            samples: path.len(),
            s_like: looks_like_s(path.points()),
        }
    }

    /// Score of the gesture in progress, for real-time feedback.
    pub fn live_accuracy<T: Target>(&self, scene: &SceneView<'_, T>) -> Option<f32> {
        let samples = self.capture.samples();
        if !self.capture.is_capturing() || samples.len() < 2 {
            return None;
        }
        let (_, (template, _)) = self.target_and_template(self.start_target, scene);
        Some(score_paths(samples, template.points(), &self.params.scoring).score)
    }

    /// Template for the current scene, freshly projected.
    pub fn template<T: Target>(&self, scene: &SceneView<'_, T>) -> TemplatePath {
        self.target_and_template(self.start_target, scene).1 .0
    }

    fn target_and_template<T: Target>(
        &self,
        intended: Option<usize>,
        scene: &SceneView<'_, T>,
    ) -> (Option<Selection>, (TemplatePath, TemplateSource)) {
        match scene.mode {
            TemplateMode::Screen { anchor, scale } => (
                None,
                (
                    self.projector.screen_anchored(anchor, scale),
                    TemplateSource::Screen { anchor, scale },
                ),
            ),
            TemplateMode::World => {
                let selection = select_with_intent(
                    scene.targets,
                    scene.camera,
                    intended,
                    &self.params.selection,
                );
                let placed = match scene.camera {
                    Some(camera) => {
                        let anchor = selection.map(|s| scene.targets[s.index].anchor());
                        self.projector.world_anchored_or_fallback(camera, anchor)
                    }
                    None => self.projector.fallback(scene.viewport),
                };
                (selection, placed)
            }
        }
    }

    fn check_gate<T: Target>(
        &self,
        point: Vec2,
        scene: &SceneView<'_, T>,
    ) -> Result<(), StartRejected> {
        let radius = self.params.proximity_px;
        let ok = match scene.gate {
            StartGate::Open => true,
            StartGate::NearTemplate => {
                let template = self.template(scene);
                let r_sq = radius * radius;
                template.is_empty()
                    || template
                        .points()
                        .iter()
                        .any(|p| p.distance_squared(point) <= r_sq)
            }
            StartGate::NearAnchor => match scene.camera {
                Some(camera) => near_any_anchor(scene.targets, camera, point, radius),
                None => true,
            },
            StartGate::AnyAlive => scene.targets.iter().any(|t| t.is_alive()),
        };
        if ok {
            Ok(())
        } else {
            Err(StartRejected::NotNearTarget)
        }
    }
}
