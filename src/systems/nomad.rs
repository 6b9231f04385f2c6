use tracing::info;

use crate::{
    engine::{System, TickContext, TickSummary},
    flower::Position,
    rng::{GardenRng, RngExt},
    seed::flower_seed,
    world::GardenState,
};

const MIN_LETTERS: usize = 4;
const MAX_LETTERS: usize = 10;
/// Nomad sentiment is drawn from `[-NEUTRAL_BAND, NEUTRAL_BAND)`.
const NEUTRAL_BAND: f64 = 0.2;
const NOMAD_SLOT: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

const EDGES: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

/// Occasionally lets a Markov-dreamt word drift in from the canvas edge.
pub struct NomadSystem;

impl NomadSystem {
    pub fn new() -> Self {
        Self
    }

    /// Plant one nomad unconditionally and return its word.
    pub fn spawn(state: &mut GardenState, rng: &mut GardenRng) -> String {
        let word = state.markov().generate(rng, MIN_LETTERS, MAX_LETTERS);
        let (width, height) = (state.width(), state.height());
        let edge = rng.pick(&EDGES).copied().unwrap_or(Edge::Top);
        let position = match edge {
            Edge::Top => Position::new(rng.uniform(0.0, width), 0.0),
            Edge::Bottom => Position::new(rng.uniform(0.0, width), height),
            Edge::Left => Position::new(0.0, rng.uniform(0.0, height)),
            Edge::Right => Position::new(width, rng.uniform(0.0, height)),
        };

        let mut features = state.lexicon().analyze(&word);
        features.sentiment = rng.uniform(-NEUTRAL_BAND, NEUTRAL_BAND);
        let seed = flower_seed(state.master_seed(), &word, NOMAD_SLOT);

        let flower = state.plant(word.clone(), features, position, seed, rng);
        flower.max_age *= 0.5;
        flower.is_nomad = true;
        word
    }
}

impl Default for NomadSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for NomadSystem {
    fn name(&self) -> &str {
        "nomad"
    }

    fn run(
        &mut self,
        ctx: &TickContext,
        state: &mut GardenState,
        rng: &mut GardenRng,
        summary: &mut TickSummary,
    ) {
        if !rng.chance(ctx.dynamics.nomad_spawn_chance) {
            return;
        }
        let word = Self::spawn(state, rng);
        info!(tick = ctx.tick, word = %word, "nomad wandered in");
        summary.nomads.push(word);
    }
}
