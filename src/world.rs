use std::f64::consts::TAU;

use rand::Rng;

use crate::flower::{Flower, FlowerId, Position};
use crate::fractal::synthesize;
use crate::linguistics::{FeatureVector, Lexicon};
use crate::markov::MarkovChain;
use crate::rng::RngExt;
use crate::seed::flower_seed;
use crate::snapshot::{FlowerView, GardenStats};

/// Fraction of the canvas kept free on each side for unplaced phrases.
const MARGIN: f64 = 0.1;
const RING_BASE_RADIUS: f64 = 20.0;
const RING_RADIUS_PER_WORD: f64 = 5.0;
const RING_RADIUS_JITTER: f64 = 5.0;
const RING_ANGLE_JITTER: f64 = 0.2;

/// Population and environment of one garden.
///
/// Systems mutate this through the engine; nothing outside the crate touches
/// the flower list directly.
pub struct GardenState {
    width: f64,
    height: f64,
    master_seed: u64,
    lexicon: Lexicon,
    markov: MarkovChain,
    pub(crate) flowers: Vec<Flower>,
    pub(crate) garden_time: u64,
    pub(crate) time_effect: f64,
    next_flower: u64,
}

impl GardenState {
    pub fn new(width: u32, height: u32, master_seed: u64, founding_quote: &str) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            master_seed,
            lexicon: Lexicon::new(),
            markov: MarkovChain::from_text(founding_quote),
            flowers: Vec::new(),
            garden_time: 0,
            time_effect: 1.0,
            next_flower: 0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn markov(&self) -> &MarkovChain {
        &self.markov
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn garden_time(&self) -> u64 {
        self.garden_time
    }

    pub fn time_effect(&self) -> f64 {
        self.time_effect
    }

    pub fn population(&self) -> usize {
        self.flowers.len()
    }

    /// Plant every word of `phrase` as its own flower.
    ///
    /// Without a base position words land anywhere in the inner 80% of the
    /// canvas; with one they ring the base at a radius that grows with the
    /// phrase length. Returns the number of flowers planted.
    pub fn sow<R: Rng>(&mut self, phrase: &str, base: Option<Position>, rng: &mut R) -> usize {
        let words = self.lexicon.analyze(phrase).cleaned_words;
        let count = words.len();
        let mut planted = 0;

        for (index, word) in words.into_iter().enumerate() {
            let position = match base {
                None => Position::new(
                    rng.uniform(self.width * MARGIN, self.width * (1.0 - MARGIN)),
                    rng.uniform(self.height * MARGIN, self.height * (1.0 - MARGIN)),
                ),
                Some(base) => {
                    let angle = (index as f64 / count as f64) * TAU
                        + rng.uniform(-RING_ANGLE_JITTER, RING_ANGLE_JITTER);
                    let radius = RING_BASE_RADIUS
                        + count as f64 * RING_RADIUS_PER_WORD
                        + rng.uniform(-RING_RADIUS_JITTER, RING_RADIUS_JITTER);
                    Position::new(
                        base.x + angle.cos() * radius,
                        base.y + angle.sin() * radius,
                    )
                }
            };

            let features = self.lexicon.analyze(&word);
            if features.is_empty() {
                continue;
            }
            let seed = flower_seed(self.master_seed, &word, index as i64);
            self.plant(word, features, position, seed, rng);
            planted += 1;
        }

        planted
    }

    /// Synthesize geometry and add one flower at a clamped position.
    pub(crate) fn plant<R: Rng>(
        &mut self,
        word: String,
        features: FeatureVector,
        position: Position,
        seed: u32,
        rng: &mut R,
    ) -> &mut Flower {
        let geometry = synthesize(&features, seed);
        let id = self.allocate();
        let position = position.clamped(self.width, self.height);
        self.flowers
            .push(Flower::sprout(id, word, features, geometry, position, seed, rng));
        let last = self.flowers.len() - 1;
        &mut self.flowers[last]
    }

    pub fn snapshot(&self) -> Vec<FlowerView> {
        self.flowers
            .iter()
            .filter(|flower| flower.is_visible())
            .map(FlowerView::from)
            .collect()
    }

    pub fn stats(&self) -> GardenStats {
        GardenStats::collect(self.garden_time, self.time_effect, &self.flowers)
    }

    fn allocate(&mut self) -> FlowerId {
        let id = FlowerId::new(self.next_flower);
        self.next_flower += 1;
        id
    }
}
