//! Read-only views of the garden handed to renderers and reporters.

use std::sync::Arc;

use serde::Serialize;

use crate::flower::{Flower, FlowerId, Position};
use crate::fractal::Segment;

/// Everything the rasterizer needs to draw one flower.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowerView {
    pub id: FlowerId,
    pub geometry: Arc<[Segment]>,
    pub position: Position,
    pub scale: f64,
    pub color_intensity: f64,
    pub source_word: String,
    pub is_nomad: bool,
    /// Set for words containing a rare letter; drawn one glyph denser.
    pub thickness_boost: bool,
}

impl From<&Flower> for FlowerView {
    fn from(flower: &Flower) -> Self {
        Self {
            id: flower.id,
            geometry: Arc::clone(&flower.geometry),
            position: flower.position,
            scale: flower.current_scale,
            color_intensity: flower.effective_color_intensity,
            source_word: flower.source_word.clone(),
            is_nomad: flower.is_nomad,
            thickness_boost: flower.features.has_rare_char,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenStats {
    pub tick: u64,
    pub population: usize,
    pub nomads: usize,
    pub fading: usize,
    pub mean_age: f64,
    pub time_effect: f64,
}

impl GardenStats {
    pub fn collect(tick: u64, time_effect: f64, flowers: &[Flower]) -> Self {
        let population = flowers.len();
        let mean_age = if population > 0 {
            flowers.iter().map(|f| f.age as f64).sum::<f64>() / population as f64
        } else {
            0.0
        };
        Self {
            tick,
            population,
            nomads: flowers.iter().filter(|f| f.is_nomad).count(),
            fading: flowers.iter().filter(|f| f.is_fading).count(),
            mean_age,
            time_effect,
        }
    }

    pub fn nomad_fraction(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            self.nomads as f64 / self.population as f64
        }
    }
}
