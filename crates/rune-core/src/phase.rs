//! Phase policy: thresholds, progress and transitions.
//!
//! `GameState` is the one place the current phase lives. Everything that
//! depends on the phase asks it, and every transition is an explicit call
//! that returns what changed.

use crate::constants::*;
use crate::scoring::percent;
use crate::session::{Resolution, StartGate, TemplateMode};
use crate::targeting::{first_alive, Target};
use crate::world::{RuneStone, SerpentWave, WaveEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Loading,
    Exploration,
    UnlockingCage,
    Training,
    Battle,
    Victory,
    Defeat,
}

impl GamePhase {
    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Loading => "loading",
            GamePhase::Exploration => "exploration",
            GamePhase::UnlockingCage => "unlockingCage",
            GamePhase::Training => "training",
            GamePhase::Battle => "battle",
            GamePhase::Victory => "victory",
            GamePhase::Defeat => "defeat",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "loading" => Some(GamePhase::Loading),
            "exploration" => Some(GamePhase::Exploration),
            "unlockingCage" => Some(GamePhase::UnlockingCage),
            "training" => Some(GamePhase::Training),
            "battle" => Some(GamePhase::Battle),
            "victory" => Some(GamePhase::Victory),
            "defeat" => Some(GamePhase::Defeat),
            _ => None,
        }
    }

    pub fn allows_drawing(self) -> bool {
        matches!(
            self,
            GamePhase::UnlockingCage | GamePhase::Training | GamePhase::Battle
        )
    }
}

#[derive(Clone, Debug)]
pub struct PhaseThresholds {
    pub cage: f32,
    pub training: f32,
    pub battle: f32,
    pub training_required: u32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            cage: CAGE_THRESHOLD,
            training: TRAINING_THRESHOLD,
            battle: BATTLE_THRESHOLD,
            training_required: TRAINING_SPELLS_REQUIRED,
        }
    }
}

/// What the policy made of one resolved spell.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseDecision {
    pub success: bool,
    pub threshold: f32,
    pub defeated: Option<usize>,
    pub transition: Option<GamePhase>,
    pub message: String,
}

pub struct GameState {
    pub thresholds: PhaseThresholds,
    phase: GamePhase,
    training_progress: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(PhaseThresholds::default())
    }
}

impl GameState {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self {
            thresholds,
            phase: GamePhase::Loading,
            training_progress: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn training_progress(&self) -> u32 {
        self.training_progress
    }

    /// Switch phase; returns the phase that was left.
    pub fn enter(&mut self, phase: GamePhase) -> GamePhase {
        let previous = self.phase;
        if phase == GamePhase::Training && previous != GamePhase::Training {
            self.training_progress = 0;
        }
        self.phase = phase;
        log::info!("[phase] {} -> {}", previous.name(), phase.name());
        previous
    }

    pub fn allows_drawing(&self) -> bool {
        self.phase.allows_drawing()
    }

    pub fn threshold(&self) -> Option<f32> {
        match self.phase {
            GamePhase::UnlockingCage => Some(self.thresholds.cage),
            GamePhase::Training => Some(self.thresholds.training),
            GamePhase::Battle => Some(self.thresholds.battle),
            _ => None,
        }
    }

    /// Template placement and start gate for the current phase.
    pub fn template_mode(&self) -> Option<(TemplateMode, StartGate)> {
        match self.phase {
            GamePhase::UnlockingCage => Some((
                TemplateMode::Screen {
                    anchor: popup_anchor(),
                    scale: POPUP_SCALE_PX,
                },
                StartGate::NearTemplate,
            )),
            GamePhase::Training => Some((TemplateMode::World, StartGate::NearAnchor)),
            GamePhase::Battle => Some((TemplateMode::World, StartGate::AnyAlive)),
            _ => None,
        }
    }

    pub fn apply_spell(
        &mut self,
        resolution: &Resolution,
        stone: &mut RuneStone,
        wave: &mut SerpentWave,
    ) -> PhaseDecision {
        let score = resolution.score();
        let pct = percent(score);
        let Some(threshold) = self.threshold() else {
            return PhaseDecision {
                success: false,
                threshold: 1.0,
                defeated: None,
                transition: None,
                message: String::new(),
            };
        };
        let success = score >= threshold;
        let need = percent(threshold);
        let mut decision = PhaseDecision {
            success,
            threshold,
            defeated: None,
            transition: None,
            message: String::new(),
        };

        match self.phase {
            GamePhase::UnlockingCage => {
                if success {
                    decision.message = "Perfect! The seal is breaking!".to_string();
                    self.enter(GamePhase::Training);
                    decision.transition = Some(GamePhase::Training);
                } else {
                    decision.message = format!(
                        "{pct}% accuracy. You need {need}% or better. Trace the complete 'S' from START to END!"
                    );
                }
            }
            GamePhase::Training => {
                if success {
                    stone.on_defeated();
                    self.training_progress += 1;
                    decision.message = format!(
                        "{}/{} spells mastered",
                        self.training_progress, self.thresholds.training_required
                    );
                    if self.training_progress >= self.thresholds.training_required {
                        self.enter(GamePhase::Battle);
                        decision.transition = Some(GamePhase::Battle);
                    }
                } else {
                    decision.message = format!(
                        "{pct}% accuracy on the rock. You need {need}% or better. Trace the full 'S' shape from top to bottom!"
                    );
                }
            }
            GamePhase::Battle => {
                if success {
                    let chosen = resolution
                        .target
                        .map(|s| s.index)
                        .filter(|&i| wave.serpents().get(i).map_or(false, |s| s.is_alive()))
                        .or_else(|| first_alive(wave.serpents()));
                    match chosen {
                        Some(index) => {
                            let events = wave.defeat(index);
                            decision.defeated = Some(index);
                            decision.message = format!(
                                "{}/{} serpents defeated",
                                wave.defeated_count(),
                                wave.serpents().len()
                            );
                            if let Some(next) = self.on_wave_events(&events) {
                                decision.transition = Some(next);
                            }
                        }
                        None => {
                            decision.success = false;
                            decision.message = "No serpents remaining to target!".to_string();
                        }
                    }
                } else if wave.alive_count() > 0 {
                    decision.message = format!(
                        "{pct}% accuracy. You need {need}% or better. Trace a complete 'S' shape!"
                    );
                } else {
                    decision.message = "Practice your 'S' tracing for future battles!".to_string();
                }
            }
            _ => {}
        }
        decision
    }

    /// React to wave events; returns the new phase when one was entered.
    pub fn on_wave_events(&mut self, events: &[WaveEvent]) -> Option<GamePhase> {
        if self.phase != GamePhase::Battle {
            return None;
        }
        for ev in events {
            match ev {
                WaveEvent::ReachedGoal(_) => {
                    self.enter(GamePhase::Defeat);
                    return Some(GamePhase::Defeat);
                }
                WaveEvent::Cleared => {
                    self.enter(GamePhase::Victory);
                    return Some(GamePhase::Victory);
                }
                WaveEvent::Defeated(_) => {}
            }
        }
        None
    }
}
