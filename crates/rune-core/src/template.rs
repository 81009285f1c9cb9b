//! Rune template projection.
//!
//! The normalized rune is positioned over whatever it is attached to: a fixed
//! spot on a 2D canvas, or the screen projection of a moving 3D anchor scaled
//! by viewing distance. Projections are recomputed on every request because
//! both the camera and the anchor move continuously.

use crate::camera::{ndc_to_pixels, CameraProvider};
use crate::constants::*;
use crate::error::GestureError;
use crate::scoring::InputProfile;
use crate::shape::canonical_rune;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct ProjectionParams {
    pub base_scale: f32,
    pub reference_distance: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub fallback_scale: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            base_scale: TEMPLATE_BASE_SCALE_PX,
            reference_distance: TEMPLATE_REFERENCE_DISTANCE,
            min_scale: TEMPLATE_MIN_SCALE,
            max_scale: TEMPLATE_MAX_SCALE,
            fallback_scale: FALLBACK_SCALE_PX,
        }
    }
}

impl ProjectionParams {
    pub fn for_profile(profile: InputProfile) -> Self {
        let base = Self::default();
        match profile {
            InputProfile::Desktop => base,
            InputProfile::Touch => Self {
                fallback_scale: TOUCH_FALLBACK_SCALE_PX,
                ..base
            },
        }
    }

    /// `base_scale * clamp(reference / distance, min, max)`. Swapped bounds
    /// are reordered and a NaN bound is ignored.
    pub fn distance_scale(&self, distance: f32) -> f32 {
        let lo = self.min_scale.min(self.max_scale);
        let hi = self.min_scale.max(self.max_scale);
        let ratio = if distance > f32::EPSILON {
            self.reference_distance / distance
        } else {
            hi
        };
        self.base_scale * ratio.max(lo).min(hi)
    }
}

/// A 3D anchor as it currently appears on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenAnchor {
    pub screen: Vec2,
    /// World-space distance from the camera eye.
    pub distance: f32,
}

/// Project `world` to pixels, rejecting points behind the camera or outside
/// the clip volume.
pub fn project_anchor<C: CameraProvider + ?Sized>(
    camera: &C,
    world: Vec3,
) -> Result<ScreenAnchor, GestureError> {
    let ndc = camera.project_ndc(world);
    let inside = ndc.is_finite()
        && (-1.0..=1.0).contains(&ndc.x)
        && (-1.0..=1.0).contains(&ndc.y)
        && (-1.0..=1.0).contains(&ndc.z);
    if !inside {
        return Err(GestureError::NoProjection);
    }
    Ok(ScreenAnchor {
        screen: ndc_to_pixels(ndc.truncate(), camera.viewport()),
        distance: camera.eye().distance(world),
    })
}

/// The reference polyline in the same pixel frame as the drawn path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplatePath(Vec<Vec2>);

impl TemplatePath {
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

    /// Translate every vertex, used when the host canvas is offset.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self(self.0.iter().map(|p| *p + offset).collect())
    }
}

/// How the template was placed for a particular resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TemplateSource {
    Screen { anchor: Vec2, scale: f32 },
    World { anchor: Vec2, scale: f32 },
    Fallback { anchor: Vec2, scale: f32 },
}

pub struct TemplateProjector {
    pub params: ProjectionParams,
    shape: Vec<Vec2>,
}

impl Default for TemplateProjector {
    fn default() -> Self {
        Self::new(ProjectionParams::default())
    }
}

impl TemplateProjector {
    pub fn new(params: ProjectionParams) -> Self {
        Self::with_shape(params, canonical_rune())
    }

    /// Use a custom normalized shape instead of the canonical rune.
    pub fn with_shape(params: ProjectionParams, shape: Vec<Vec2>) -> Self {
        Self { params, shape }
    }

    pub fn shape(&self) -> &[Vec2] {
        &self.shape
    }

    fn place(&self, anchor: Vec2, scale: f32) -> TemplatePath {
        TemplatePath(self.shape.iter().map(|v| anchor + *v * scale).collect())
    }

    /// 2D mode: fixed anchor and fixed scale, no camera involved.
    pub fn screen_anchored(&self, anchor: Vec2, scale: f32) -> TemplatePath {
        self.place(anchor, scale)
    }

    /// 3D mode: follow `world` through `camera`.
    pub fn world_anchored<C: CameraProvider + ?Sized>(
        &self,
        camera: &C,
        world: Vec3,
    ) -> Result<(TemplatePath, TemplateSource), GestureError> {
        let projected = project_anchor(camera, world)?;
        let scale = self.params.distance_scale(projected.distance);
        Ok((
            self.place(projected.screen, scale),
            TemplateSource::World {
                anchor: projected.screen,
                scale,
            },
        ))
    }

    /// Viewport-centered template at the default scale.
    pub fn fallback(&self, viewport: Vec2) -> (TemplatePath, TemplateSource) {
        let anchor = viewport * 0.5;
        let scale = self.params.fallback_scale;
        (
            self.place(anchor, scale),
            TemplateSource::Fallback { anchor, scale },
        )
    }

    /// World-anchored template, or the centered fallback when there is no
    /// anchor or it cannot be projected.
    pub fn world_anchored_or_fallback<C: CameraProvider + ?Sized>(
        &self,
        camera: &C,
        world: Option<Vec3>,
    ) -> (TemplatePath, TemplateSource) {
        match world.map(|w| self.world_anchored(camera, w)) {
            Some(Ok(placed)) => placed,
            Some(Err(e)) => {
                log::debug!("[template] {}; using centered fallback", e);
                self.fallback(camera.viewport())
            }
            None => self.fallback(camera.viewport()),
        }
    }
}
