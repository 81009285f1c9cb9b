//! Gesture capture, rune template projection, accuracy scoring and target
//! selection for the rune-tracing spell mechanic.
//!
//! Everything here is platform independent; the browser front-end lives in
//! `rune-web`.

pub mod camera;
pub mod capture;
pub mod constants;
pub mod error;
pub mod phase;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod targeting;
pub mod template;
pub mod world;

pub use camera::{Camera, CameraProvider, ViewProjCamera};
pub use capture::{GesturePath, InputSource, PathCapture};
pub use error::{GestureError, StartRejected};
pub use phase::{GamePhase, GameState, PhaseDecision};
pub use scoring::{score_paths, AccuracyTier, InputProfile, ScoreBreakdown, ScoringParams};
pub use session::{Outcome, Resolution, SceneView, SpellSession, StartGate, TemplateMode};
pub use targeting::{select_target, select_with_intent, Selection, SelectionReason, Target};
pub use template::{TemplatePath, TemplateProjector, TemplateSource};
pub use world::{RuneStone, Serpent, SerpentWave, WaveEvent};
