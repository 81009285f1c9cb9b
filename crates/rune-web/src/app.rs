//! Browser-side game context.
//!
//! `App` owns the spell session, the phase state and the rune carriers. DOM
//! handlers feed it canvas pixels; it answers with what the host should hear
//! about (`SpellReport`, phase transitions). Nothing in here dispatches DOM
//! events itself, so host listeners never run while the `RefCell` is held.

use crate::constants::*;
use crate::trail::Trail;
use crate::{camera, dom, overlay};
use glam::{Vec2, Vec3};
use instant::Instant;
use rune_core::constants::popup_anchor;
use rune_core::session::SessionParams;
use rune_core::world::WaveParams;
use rune_core::{
    AccuracyTier, CameraProvider, GamePhase, GameState, InputProfile, InputSource, Outcome,
    RuneStone, SceneView, SerpentWave, SpellSession, StartGate, StartRejected, Target,
    TemplateMode, ViewProjCamera,
};
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Outcome of one resolved gesture, as reported to the host.
#[derive(Clone, Debug)]
pub struct SpellReport {
    pub accuracy: f32,
    pub target: Option<usize>,
    pub success: bool,
    /// Phase the spell was cast in.
    pub phase: GamePhase,
    pub transition: Option<GamePhase>,
}

impl SpellReport {
    pub fn detail(&self) -> JsValue {
        let target = self
            .target
            .map(|i| JsValue::from_f64(i as f64))
            .unwrap_or(JsValue::NULL);
        dom::js_object(&[
            ("accuracy", JsValue::from_f64(self.accuracy as f64)),
            ("target", target),
            ("success", JsValue::from_bool(self.success)),
            ("phase", JsValue::from_str(self.phase.name())),
        ])
        .into()
    }
}

pub fn announce_spell(report: &SpellReport) {
    if let Err(e) = dom::dispatch_custom_event(SPELL_CAST_EVENT, &report.detail()) {
        log::error!("[event] {} dispatch failed: {:?}", SPELL_CAST_EVENT, e);
    }
    if let Some(phase) = report.transition {
        announce_phase(phase);
    }
}

pub fn announce_phase(phase: GamePhase) {
    let detail = dom::js_object(&[("phase", JsValue::from_str(phase.name()))]);
    if let Err(e) = dom::dispatch_custom_event(PHASE_CHANGE_EVENT, &detail.into()) {
        log::error!("[event] {} dispatch failed: {:?}", PHASE_CHANGE_EVENT, e);
    }
}

fn scene_for<'a, T: Target>(
    camera: Option<&'a ViewProjCamera>,
    targets: &'a [T],
    mode: TemplateMode,
    gate: StartGate,
    viewport: Vec2,
) -> SceneView<'a, T> {
    SceneView {
        camera: camera.map(|c| c as &dyn CameraProvider),
        targets,
        mode,
        gate,
        viewport,
    }
}

pub struct App {
    canvas: web::HtmlCanvasElement,
    document: web::Document,
    trail: Trail,
    session: SpellSession,
    state: GameState,
    stone: RuneStone,
    wave: SerpentWave,
    camera: Option<ViewProjCamera>,
    trail_clear_at: Option<Instant>,
    notice_hide_at: Option<Instant>,
}

impl App {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        profile: InputProfile,
    ) -> anyhow::Result<Self> {
        let trail = Trail::new(&canvas, profile)?;
        Ok(Self {
            canvas,
            document,
            trail,
            session: SpellSession::new(SessionParams::for_profile(profile)),
            state: GameState::default(),
            stone: RuneStone::default(),
            wave: SerpentWave::new(WaveParams::default(), 0),
            camera: None,
            trail_clear_at: None,
            notice_hide_at: None,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn training_progress(&self) -> u32 {
        self.state.training_progress()
    }

    pub fn wave(&self) -> &SerpentWave {
        &self.wave
    }

    fn viewport(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Top-left of the cage popup frame inside the drawing canvas; the popup
    /// is centered.
    fn popup_origin(&self) -> Vec2 {
        self.viewport() * 0.5 - popup_anchor()
    }

    /// Canvas pixels to the frame the current template lives in.
    fn to_scene(&self, p: Vec2) -> Vec2 {
        match self.state.template_mode() {
            Some((TemplateMode::Screen { .. }, _)) => p - self.popup_origin(),
            _ => p,
        }
    }

    fn notify(&mut self, now: Instant, message: &str) {
        overlay::notify(&self.document, message);
        self.notice_hide_at = Some(now + Duration::from_millis(NOTIFICATION_MS));
    }

    /// Redraw the golden guide for screen-anchored phases, drop it otherwise.
    pub fn refresh_guide(&mut self) {
        let guide = match self.state.template_mode() {
            Some((TemplateMode::Screen { anchor, scale }, _)) => Some(
                self.session
                    .projector()
                    .screen_anchored(anchor, scale)
                    .translated(self.popup_origin())
                    .points()
                    .to_vec(),
            ),
            _ => None,
        };
        self.trail.set_guide(guide);
    }

    pub fn set_camera(&mut self, view_proj: &[f32], eye: &[f32], forward: &[f32]) -> anyhow::Result<()> {
        self.camera = Some(camera::from_host(view_proj, eye, forward, self.viewport())?);
        Ok(())
    }

    pub fn set_rock(&mut self, position: Vec3) {
        self.stone.position = position;
    }

    pub fn enter_phase(&mut self, phase: GamePhase, now: Instant) {
        if self.session.capture().is_capturing() {
            self.session.cancel(now);
        }
        self.state.enter(phase);
        if !self.state.allows_drawing() {
            overlay::hide_accuracy(&self.document);
        }
        self.refresh_guide();
    }

    pub fn start_battle(&mut self, seed: u64, now: Instant) {
        self.wave = SerpentWave::new(WaveParams::default(), seed);
        self.wave.spawn_all();
        self.enter_phase(GamePhase::Battle, now);
    }

    /// Try to start a gesture; true when capture began.
    pub fn pointer_down(&mut self, p: Vec2, source: InputSource, now: Instant) -> bool {
        let Some((mode, gate)) = self.state.template_mode() else {
            log::debug!("[input] {}", StartRejected::DrawingDisabled);
            return false;
        };
        let scene_p = self.to_scene(p);
        let viewport = self.viewport();
        let started = match self.state.phase() {
            GamePhase::Battle => {
                let scene = scene_for(self.camera.as_ref(), self.wave.serpents(), mode, gate, viewport);
                self.session.begin(scene_p, source, now, &scene)
            }
            _ => {
                let stones = std::slice::from_ref(&self.stone);
                let scene = scene_for(self.camera.as_ref(), stones, mode, gate, viewport);
                self.session.begin(scene_p, source, now, &scene)
            }
        };
        match started {
            Ok(()) => {
                self.trail_clear_at = None;
                self.trail.begin(p);
                overlay::show_accuracy(&self.document);
                true
            }
            Err(StartRejected::NotNearTarget) => {
                let message = match self.state.phase() {
                    GamePhase::Battle => "No serpents remaining to target!",
                    GamePhase::Training => "Stay close to the rock! Start drawing on its rune",
                    _ => "Stay close to the 'S'! Start drawing near the golden line",
                };
                self.notify(now, message);
                false
            }
            Err(e) => {
                log::debug!("[input] start ignored: {}", e);
                false
            }
        }
    }

    fn live_accuracy(&self) -> Option<f32> {
        let (mode, gate) = self.state.template_mode()?;
        let viewport = self.viewport();
        match self.state.phase() {
            GamePhase::Battle => {
                let scene = scene_for(self.camera.as_ref(), self.wave.serpents(), mode, gate, viewport);
                self.session.live_accuracy(&scene)
            }
            _ => {
                let stones = std::slice::from_ref(&self.stone);
                let scene = scene_for(self.camera.as_ref(), stones, mode, gate, viewport);
                self.session.live_accuracy(&scene)
            }
        }
    }

    /// Feed a move sample; true when it extended the active gesture.
    pub fn pointer_move(&mut self, p: Vec2, source: InputSource) -> bool {
        if !self.session.owns(source) {
            return false;
        }
        let scene_p = self.to_scene(p);
        if !self.session.sample(scene_p, source) {
            return false;
        }
        let live = self.live_accuracy();
        let color = live
            .map(|s| AccuracyTier::from_score(s).color_hex())
            .unwrap_or(TRAIL_START_COLOR);
        self.trail.extend(p, color);
        if let Some(score) = live {
            overlay::update_accuracy(&self.document, score, true);
        }
        true
    }

    /// End the gesture owned by `source` and apply the phase policy.
    pub fn pointer_up(&mut self, source: InputSource, now: Instant) -> Option<SpellReport> {
        if !self.session.owns(source) {
            return None;
        }
        let (mode, gate) = self
            .state
            .template_mode()
            .unwrap_or((TemplateMode::World, StartGate::Open));
        let viewport = self.viewport();
        let outcome = match self.state.phase() {
            GamePhase::Battle => {
                let scene = scene_for(self.camera.as_ref(), self.wave.serpents(), mode, gate, viewport);
                self.session.finish(now, &scene)
            }
            _ => {
                let stones = std::slice::from_ref(&self.stone);
                let scene = scene_for(self.camera.as_ref(), stones, mode, gate, viewport);
                self.session.finish(now, &scene)
            }
        };
        self.trail.finish();
        self.trail_clear_at = Some(now + Duration::from_millis(TRAIL_CLEAR_DELAY_MS));

        let resolution = match outcome {
            Outcome::Resolved(r) => r,
            Outcome::Rejected(e) => {
                log::info!("[spell] rejected: {}", e);
                overlay::hide_accuracy(&self.document);
                self.notify(now, "Too short! Trace the complete 'S' from START to END");
                return None;
            }
        };

        let phase = self.state.phase();
        let decision = self
            .state
            .apply_spell(&resolution, &mut self.stone, &mut self.wave);
        overlay::update_accuracy(&self.document, resolution.score(), false);
        if !decision.message.is_empty() {
            self.notify(now, &decision.message);
        }
        let target = decision
            .defeated
            .or_else(|| resolution.target.map(|s| s.index));
        log::info!(
            "[spell] {} accuracy={:.2} target={:?} success={} s_like={}",
            phase.name(),
            resolution.score(),
            target,
            decision.success,
            resolution.s_like
        );
        if decision.transition.is_some() {
            self.refresh_guide();
        }
        Some(SpellReport {
            accuracy: resolution.score(),
            target,
            success: decision.success,
            phase,
            transition: decision.transition,
        })
    }

    pub fn cancel(&mut self, source: InputSource, now: Instant) {
        if !self.session.owns(source) {
            return;
        }
        log::debug!("[input] gesture cancelled");
        self.session.cancel(now);
        self.trail.clear();
        overlay::hide_accuracy(&self.document);
    }

    /// Per-frame update; returns the phase entered this frame, if any.
    pub fn tick(&mut self, dt_sec: f32, elapsed_sec: f32, now: Instant) -> Option<GamePhase> {
        let mut transition = None;
        if self.state.phase() == GamePhase::Battle {
            let events = self.wave.update(dt_sec, elapsed_sec);
            transition = self.state.on_wave_events(&events);
        }
        if let Some(phase) = transition {
            if self.session.capture().is_capturing() {
                self.session.cancel(now);
                self.trail.clear();
            }
            overlay::hide_accuracy(&self.document);
            if phase == GamePhase::Defeat {
                self.notify(now, "A serpent reached your mentor!");
            }
        }
        if self.trail_clear_at.is_some_and(|at| now >= at) {
            self.trail_clear_at = None;
            self.trail.clear();
        }
        if self.notice_hide_at.is_some_and(|at| now >= at) {
            self.notice_hide_at = None;
            overlay::hide_notification(&self.document);
        }
        transition
    }
}
