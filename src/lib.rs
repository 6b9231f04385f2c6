pub mod config;
pub mod engine;
pub mod error;
pub mod flower;
pub mod fractal;
pub mod linguistics;
pub mod markov;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod seed;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use config::GardenConfig;
pub use engine::{Garden, Pollination, TickSummary};
pub use error::GardenError;
pub use flower::{Flower, FlowerId, Position};
pub use fractal::{FractalSynthesizer, Segment};
pub use linguistics::{FeatureVector, Lexicon};
pub use render::{Frame, Rasterizer};
pub use scenario::{Scenario, ScenarioLoader};
pub use snapshot::{FlowerView, GardenStats};
