//! Target candidates and best-target selection.

use crate::camera::CameraProvider;
use crate::constants::*;
use crate::scoring::InputProfile;
use crate::template::project_anchor;
use glam::{Vec2, Vec3};

/// Anything a rune can be cast at.
pub trait Target {
    /// Current world position of the rune this target carries.
    fn anchor(&self) -> Vec3;
    /// Where the target itself stands. Camera distance and view angle are
    /// measured to this point; defaults to the anchor.
    fn position(&self) -> Vec3 {
        self.anchor()
    }
    fn is_alive(&self) -> bool;
    /// Invoked by the phase policy when a spell lands on this target.
    fn on_defeated(&mut self);
}

impl<T: Target + ?Sized> Target for Box<T> {
    fn anchor(&self) -> Vec3 {
        (**self).anchor()
    }
    fn position(&self) -> Vec3 {
        (**self).position()
    }
    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }
    fn on_defeated(&mut self) {
        (**self).on_defeated()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionParams {
    pub pick_radius_px: f32,
    pub center_weight: f32,
    pub proximity_weight: f32,
    pub facing_weight: f32,
    pub max_view_angle: f32,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            pick_radius_px: PICK_RADIUS_PX,
            center_weight: CENTER_WEIGHT,
            proximity_weight: PROXIMITY_WEIGHT,
            facing_weight: FACING_WEIGHT,
            max_view_angle: MAX_VIEW_ANGLE_RAD,
        }
    }
}

impl SelectionParams {
    pub fn for_profile(profile: InputProfile) -> Self {
        let base = Self::default();
        match profile {
            InputProfile::Desktop => base,
            InputProfile::Touch => Self {
                pick_radius_px: TOUCH_PICK_RADIUS_PX,
                ..base
            },
        }
    }
}

/// How a target was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionReason {
    /// The gesture started on this target's rune.
    Explicit,
    /// Best screen-space heuristic score.
    Heuristic,
    /// Nothing qualified; first alive target.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub reason: SelectionReason,
}

/// Angle between the camera's forward vector and the direction to `world`.
pub fn view_angle<C: CameraProvider + ?Sized>(camera: &C, world: Vec3) -> f32 {
    let to_target = (world - camera.eye()).normalize_or_zero();
    let forward = camera.forward();
    if to_target == Vec3::ZERO || forward == Vec3::ZERO {
        return std::f32::consts::PI;
    }
    forward.angle_between(to_target)
}

/// Weighted preference for a candidate whose rune is on screen at `screen`
/// and whose body is `distance` from the camera.
pub fn heuristic_score(
    params: &SelectionParams,
    screen_center: Vec2,
    screen: Vec2,
    distance: f32,
    angle: f32,
) -> f32 {
    let from_center = screen.distance(screen_center);
    (params.center_weight - from_center).max(0.0)
        + (params.proximity_weight - distance).max(0.0)
        + (params.facing_weight - angle * params.facing_weight).max(0.0)
}

/// Alive target whose projected rune is closest to `point`, within the pick
/// radius. Ties go to the earlier target.
pub fn explicit_pick<T, C>(
    targets: &[T],
    camera: &C,
    point: Vec2,
    params: &SelectionParams,
) -> Option<usize>
where
    T: Target,
    C: CameraProvider + ?Sized,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, t) in targets.iter().enumerate() {
        if !t.is_alive() {
            continue;
        }
        let Ok(projected) = project_anchor(camera, t.anchor()) else {
            continue;
        };
        let d = projected.screen.distance(point);
        if d > params.pick_radius_px {
            continue;
        }
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Highest heuristic score among alive, projectable targets inside the view
/// cone. Ties go to the earlier target.
pub fn heuristic_pick<T, C>(targets: &[T], camera: &C, params: &SelectionParams) -> Option<usize>
where
    T: Target,
    C: CameraProvider + ?Sized,
{
    let center = camera.viewport_center();
    let mut best: Option<(usize, f32)> = None;
    for (i, t) in targets.iter().enumerate() {
        if !t.is_alive() {
            continue;
        }
        let body = t.position();
        let angle = view_angle(camera, body);
        if angle > params.max_view_angle {
            continue;
        }
        let Ok(projected) = project_anchor(camera, t.anchor()) else {
            continue;
        };
        let distance = camera.eye().distance(body);
        let score = heuristic_score(params, center, projected.screen, distance, angle);
        match best {
            Some((_, bs)) if score <= bs => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

pub fn first_alive<T: Target>(targets: &[T]) -> Option<usize> {
    targets.iter().position(|t| t.is_alive())
}

/// Pick the target a completed gesture was aimed at.
///
/// Explicit intent (the gesture started on a rune) wins over the heuristic;
/// when neither applies but something is alive, the first alive target is
/// returned so a gesture never resolves without a target when one exists.
pub fn select_target<T, C>(
    targets: &[T],
    camera: Option<&C>,
    start: Option<Vec2>,
    params: &SelectionParams,
) -> Option<Selection>
where
    T: Target,
    C: CameraProvider + ?Sized,
{
    let intended = match (camera, start) {
        (Some(camera), Some(p)) => explicit_pick(targets, camera, p, params),
        _ => None,
    };
    select_with_intent(targets, camera, intended, params)
}

/// Like [`select_target`], with the explicit pick already made (usually
/// when the gesture started, under that frame's camera). An intended target
/// that has since died falls through to the heuristic.
pub fn select_with_intent<T, C>(
    targets: &[T],
    camera: Option<&C>,
    intended: Option<usize>,
    params: &SelectionParams,
) -> Option<Selection>
where
    T: Target,
    C: CameraProvider + ?Sized,
{
    if let Some(index) = intended {
        if targets.get(index).is_some_and(|t| t.is_alive()) {
            return Some(Selection {
                index,
                reason: SelectionReason::Explicit,
            });
        }
        log::debug!("[target] intended target {} is gone", index);
    }
    if let Some(index) = camera.and_then(|c| heuristic_pick(targets, c, params)) {
        return Some(Selection {
            index,
            reason: SelectionReason::Heuristic,
        });
    }
    first_alive(targets).map(|index| Selection {
        index,
        reason: SelectionReason::Fallback,
    })
}

/// True when `point` lies within `radius` of the projected anchor of any
/// alive target.
pub fn near_any_anchor<T, C>(targets: &[T], camera: &C, point: Vec2, radius: f32) -> bool
where
    T: Target,
    C: CameraProvider + ?Sized,
{
    targets.iter().filter(|t| t.is_alive()).any(|t| {
        project_anchor(camera, t.anchor())
            .map(|a| a.screen.distance(point) <= radius)
            .unwrap_or(false)
    })
}
