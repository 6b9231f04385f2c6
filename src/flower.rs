use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fractal::Segment;
use crate::linguistics::FeatureVector;
use crate::rng::RngExt;

pub const INITIAL_SCALE: f64 = 0.1;
/// At or below this scale a fading flower is dead and invisible.
pub const VISIBLE_SCALE: f64 = 0.01;

const BASE_MAX_AGE: i64 = 100;
const MAX_AGE_JITTER: i64 = 20;
const FADE_SPEED: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlowerId(u64);

impl FlowerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }

    pub fn midpoint(self, other: Position) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Flower {
    pub id: FlowerId,
    pub source_word: String,
    pub features: FeatureVector,
    pub geometry: Arc<[Segment]>,
    pub position: Position,
    pub seed: u32,
    pub age: u64,
    pub max_age: f64,
    pub current_scale: f64,
    pub max_scale: f64,
    pub growth_rate: f64,
    pub is_fading: bool,
    pub is_dead: bool,
    pub is_nomad: bool,
    pub effective_color_intensity: f64,
}

impl Flower {
    /// Lifespan and growth rate are drawn from `rng`; scale starts small.
    pub fn sprout<R: Rng>(
        id: FlowerId,
        source_word: String,
        features: FeatureVector,
        geometry: Vec<Segment>,
        position: Position,
        seed: u32,
        rng: &mut R,
    ) -> Self {
        let max_age = (BASE_MAX_AGE + rng.gen_range(-MAX_AGE_JITTER..=MAX_AGE_JITTER)) as f64;
        let growth_rate = 0.05 + rng.uniform(0.0, 1.0) * 0.05;
        let max_scale = 1.0 + (features.length as f64 / 10.0 - 0.5);
        let effective_color_intensity = features.sentiment;

        Self {
            id,
            source_word,
            features,
            geometry: geometry.into(),
            position,
            seed,
            age: 0,
            max_age,
            current_scale: INITIAL_SCALE,
            max_scale,
            growth_rate,
            is_fading: false,
            is_dead: false,
            is_nomad: false,
            effective_color_intensity,
        }
    }

    /// Advance one tick of growth or decay.
    ///
    /// While blooming, the fade threshold is re-drawn every tick from
    /// `[0.75, 0.95] * max_age`; once fading the flower never recovers.
    pub fn update<R: Rng>(&mut self, time_effect: f64, rng: &mut R) {
        self.age += 1;

        if !self.is_fading {
            if self.current_scale < self.max_scale {
                self.current_scale =
                    (self.current_scale + self.growth_rate * time_effect).min(self.max_scale);
            }
            let threshold = self.max_age * rng.uniform(0.75, 0.95);
            if self.age as f64 > threshold {
                self.is_fading = true;
            }
        }

        if self.is_fading {
            self.current_scale -= self.growth_rate * FADE_SPEED * time_effect;
            if self.current_scale <= VISIBLE_SCALE {
                self.is_dead = true;
            }
        }

        let age_factor = (1.0 - self.age as f64 / (self.max_age * 1.5)).max(0.5);
        self.effective_color_intensity = self.features.sentiment * age_factor;
    }

    pub fn is_visible(&self) -> bool {
        self.current_scale > VISIBLE_SCALE
    }

    /// Mature, still blooming, and grown from sown text.
    pub fn can_pollinate(&self) -> bool {
        self.age as f64 > self.max_age * 0.3 && !self.is_fading && !self.is_nomad
    }
}
