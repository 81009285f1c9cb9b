//! Concrete rune carriers: the training stone and the battle serpents.

use crate::constants::*;
use crate::targeting::Target;
use glam::Vec3;
use rand::prelude::*;

/// Static training rock. Stays alive until the phase ends.
#[derive(Clone, Debug)]
pub struct RuneStone {
    pub position: Vec3,
    pub rune_offset: Vec3,
    pub charged: u32,
    alive: bool,
}

impl Default for RuneStone {
    fn default() -> Self {
        Self::new(STONE_POSITION)
    }
}

impl RuneStone {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rune_offset: STONE_RUNE_OFFSET,
            charged: 0,
            alive: true,
        }
    }

    pub fn retire(&mut self) {
        self.alive = false;
    }
}

impl Target for RuneStone {
    fn anchor(&self) -> Vec3 {
        self.position + self.rune_offset
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    // A successful spell charges the stone rather than destroying it.
    fn on_defeated(&mut self) {
        self.charged += 1;
    }
}

#[derive(Clone, Debug)]
pub struct Serpent {
    pub id: u32,
    pub position: Vec3,
    /// World units per second toward the goal.
    pub speed: f32,
    /// Phase offset for the floating animation.
    pub phase: f32,
    pub rune_height: f32,
    alive: bool,
}

impl Serpent {
    pub fn new(id: u32, position: Vec3, speed: f32, phase: f32) -> Self {
        Self {
            id,
            position,
            speed,
            phase,
            rune_height: SERPENT_RUNE_HEIGHT,
            alive: true,
        }
    }

    /// Advance toward `goal` and animate the float and rune bob.
    pub fn advance(&mut self, goal: Vec3, dt_sec: f32, elapsed_sec: f32) {
        if !self.alive {
            return;
        }
        let dir = (goal - self.position).normalize_or_zero();
        self.position += dir * self.speed * dt_sec;
        let wave = (elapsed_sec + self.phase).sin();
        self.position.y = SERPENT_FLOAT_BASE + wave * SERPENT_FLOAT_AMPLITUDE;
        self.rune_height = SERPENT_RUNE_HEIGHT + wave * SERPENT_RUNE_BOB;
    }

    /// Horizontal distance to `goal`; the float height does not count.
    pub fn ground_distance(&self, goal: Vec3) -> f32 {
        let mut flat = self.position - goal;
        flat.y = 0.0;
        flat.length()
    }
}

impl Target for Serpent {
    fn anchor(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.rune_height, 0.0)
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn on_defeated(&mut self) {
        self.alive = false;
    }
}

#[derive(Clone, Debug)]
pub struct WaveParams {
    pub count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub spawn_height: f32,
    pub goal: Vec3,
    pub goal_radius: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            count: WAVE_SIZE,
            radius_min: SPAWN_RADIUS_MIN,
            radius_max: SPAWN_RADIUS_MAX,
            speed_min: SERPENT_SPEED_MIN,
            speed_max: SERPENT_SPEED_MAX,
            spawn_height: SPAWN_HEIGHT,
            goal: SERPENT_GOAL,
            goal_radius: SERPENT_GOAL_RADIUS,
        }
    }
}

/// Uniform sample from `[a, b]` taken in either order. Non-finite bounds are
/// never handed to the RNG.
fn sample_between(rng: &mut StdRng, a: f32, b: f32) -> f32 {
    let (lo, hi) = (a.min(b), a.max(b));
    match (lo.is_finite(), hi.is_finite()) {
        (true, true) => rng.gen_range(lo..=hi),
        (true, false) => lo,
        (false, true) => hi,
        (false, false) => 0.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveEvent {
    Defeated(usize),
    ReachedGoal(usize),
    Cleared,
}

/// The battle's candidate registry.
pub struct SerpentWave {
    pub params: WaveParams,
    serpents: Vec<Serpent>,
    defeated: usize,
    rng: StdRng,
}

impl SerpentWave {
    pub fn new(params: WaveParams, seed: u64) -> Self {
        Self {
            params,
            serpents: Vec::new(),
            defeated: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn the whole wave on a ring around the origin.
    pub fn spawn_all(&mut self) {
        for _ in 0..self.params.count {
            self.spawn_one();
        }
        log::info!("[wave] {} serpents spawned", self.serpents.len());
    }

    pub fn spawn_one(&mut self) -> usize {
        let p = &self.params;
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let radius = sample_between(&mut self.rng, p.radius_min, p.radius_max);
        let speed = sample_between(&mut self.rng, p.speed_min, p.speed_max);
        let position = Vec3::new(angle.cos() * radius, p.spawn_height, angle.sin() * radius);
        let id = self.serpents.len() as u32 + 1;
        self.serpents.push(Serpent::new(id, position, speed, angle));
        self.serpents.len() - 1
    }

    pub fn serpents(&self) -> &[Serpent] {
        &self.serpents
    }

    pub fn alive_count(&self) -> usize {
        self.serpents.iter().filter(|s| s.is_alive()).count()
    }

    pub fn defeated_count(&self) -> usize {
        self.defeated
    }

    pub fn is_cleared(&self) -> bool {
        !self.serpents.is_empty() && self.alive_count() == 0
    }

    pub fn update(&mut self, dt_sec: f32, elapsed_sec: f32) -> Vec<WaveEvent> {
        let goal = self.params.goal;
        let mut events = Vec::new();
        for (i, s) in self.serpents.iter_mut().enumerate() {
            if !s.is_alive() {
                continue;
            }
            s.advance(goal, dt_sec, elapsed_sec);
            if s.ground_distance(goal) < self.params.goal_radius {
                events.push(WaveEvent::ReachedGoal(i));
            }
        }
        events
    }

    /// Defeat serpent `index`. A serpent can only be defeated once.
    pub fn defeat(&mut self, index: usize) -> Vec<WaveEvent> {
        let Some(s) = self.serpents.get_mut(index) else {
            return Vec::new();
        };
        if !s.is_alive() {
            log::debug!("[wave] serpent {} already defeated", s.id);
            return Vec::new();
        }
        s.on_defeated();
        let id = s.id;
        self.defeated += 1;
        log::info!(
            "[wave] serpent {} defeated ({}/{})",
            id,
            self.defeated,
            self.serpents.len()
        );
        let mut events = vec![WaveEvent::Defeated(index)];
        if self.is_cleared() {
            events.push(WaveEvent::Cleared);
        }
        events
    }
}
