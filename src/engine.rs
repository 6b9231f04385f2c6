use serde::Serialize;
use tracing::{debug, debug_span, info};

use crate::config::{DynamicsConfig, GardenConfig};
use crate::error::GardenError;
use crate::flower::{Flower, Position};
use crate::markov::MarkovChain;
use crate::rng::{seeded, GardenRng};
use crate::seed::derive_master_seed;
use crate::snapshot::{FlowerView, GardenStats};
use crate::systems::{
    CapacitySystem, ClimateSystem, LifecycleSystem, NomadSystem, PollinationSystem,
};
use crate::world::GardenState;

pub struct TickContext<'a> {
    pub tick: u64,
    pub dynamics: &'a DynamicsConfig,
}

pub trait System: Send {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &TickContext,
        state: &mut GardenState,
        rng: &mut GardenRng,
        summary: &mut TickSummary,
    );
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pollination {
    pub parents: (String, String),
    pub child: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickSummary {
    pub tick: u64,
    pub time_effect: f64,
    pub population: usize,
    pub deaths: usize,
    pub nomads: Vec<String>,
    pub pollinations: Vec<Pollination>,
    pub evicted: usize,
}

/// A living garden: the population, its random stream, and the fixed
/// schedule of systems that advance it one tick at a time.
///
/// Every source of randomness is owned by the instance, so two gardens never
/// share state and a garden grown from the same quote and the same calls
/// evolves identically.
pub struct Garden {
    config: GardenConfig,
    state: GardenState,
    rng: GardenRng,
    systems: Vec<Box<dyn System>>,
}

impl Garden {
    pub fn new(founding_quote: &str, config: GardenConfig) -> Result<Self, GardenError> {
        config.validate()?;
        let master_seed = derive_master_seed(founding_quote)?;
        let state = GardenState::new(
            config.canvas.width,
            config.canvas.height,
            master_seed,
            founding_quote,
        );
        debug!(master_seed, "garden seeded");

        Ok(Self {
            config,
            state,
            rng: seeded(master_seed),
            systems: vec![
                Box::new(ClimateSystem::new()),
                Box::new(LifecycleSystem::new()),
                Box::new(NomadSystem::new()),
                Box::new(PollinationSystem::new()),
                Box::new(CapacitySystem::new()),
            ],
        })
    }

    /// Sow a phrase, one flower per word. Returns the number planted.
    pub fn sow(&mut self, phrase: &str, position: Option<Position>) -> usize {
        let planted = self.state.sow(phrase, position, &mut self.rng);
        debug!(phrase, planted, "sowed phrase");
        planted
    }

    pub fn advance(&mut self) -> TickSummary {
        self.state.garden_time += 1;
        let ctx = TickContext {
            tick: self.state.garden_time,
            dynamics: &self.config.dynamics,
        };
        let mut summary = TickSummary {
            tick: ctx.tick,
            ..TickSummary::default()
        };

        for system in &mut self.systems {
            let _span = debug_span!("system", name = system.name(), tick = ctx.tick).entered();
            system.run(&ctx, &mut self.state, &mut self.rng, &mut summary);
        }

        summary.time_effect = self.state.time_effect;
        summary.population = self.state.population();
        if !summary.nomads.is_empty() || !summary.pollinations.is_empty() {
            info!(
                tick = summary.tick,
                nomads = ?summary.nomads,
                pollinations = summary.pollinations.len(),
                population = summary.population,
                "garden changed"
            );
        }
        debug!(
            tick = summary.tick,
            population = summary.population,
            deaths = summary.deaths,
            "tick complete"
        );
        summary
    }

    pub fn run(&mut self, ticks: u64) {
        self.run_with_hook(ticks, |_| {});
    }

    pub fn run_with_hook<F>(&mut self, ticks: u64, mut hook: F)
    where
        F: FnMut(&TickSummary),
    {
        for _ in 0..ticks {
            let summary = self.advance();
            hook(&summary);
        }
    }

    pub fn snapshot(&self) -> Vec<FlowerView> {
        self.state.snapshot()
    }

    /// System names in the order they run each tick.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    pub fn stats(&self) -> GardenStats {
        self.state.stats()
    }

    pub fn flowers(&self) -> &[Flower] {
        self.state.flowers()
    }

    pub fn population(&self) -> usize {
        self.state.population()
    }

    pub fn master_seed(&self) -> u64 {
        self.state.master_seed()
    }

    pub fn garden_time(&self) -> u64 {
        self.state.garden_time()
    }

    pub fn time_effect(&self) -> f64 {
        self.state.time_effect()
    }

    pub fn markov(&self) -> &MarkovChain {
        self.state.markov()
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.config.canvas.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTE: &str = "Colourless green ideas sleep furiously.";

    fn garden() -> Garden {
        Garden::new(QUOTE, GardenConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_quote_is_fatal() {
        let result = Garden::new("   ", GardenConfig::default());
        assert!(matches!(result, Err(GardenError::EmptyInput)));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let result = Garden::new(QUOTE, GardenConfig::with_canvas(0, 0));
        assert!(matches!(result, Err(GardenError::InvalidConfig(_))));
    }

    #[test]
    fn test_master_seed_from_quote() {
        assert_eq!(garden().master_seed(), 19175);
    }

    #[test]
    fn test_system_schedule_order() {
        assert_eq!(
            garden().system_names(),
            vec!["climate", "lifecycle", "nomad", "pollination", "capacity"]
        );
    }

    #[test]
    fn test_advance_counts_ticks() {
        let mut garden = garden();
        garden.sow(QUOTE, None);
        let mut ticks = Vec::new();
        garden.run_with_hook(6, |summary| ticks.push(summary.tick));
        assert_eq!(ticks, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(garden.garden_time(), 6);
    }

    #[test]
    fn test_time_effect_follows_slow_sine() {
        let mut garden = garden();
        let summary = garden.advance();
        assert!((summary.time_effect - (0.8 + 0.2 * 0.01f64.sin())).abs() < 1e-12);
        garden.run(99);
        assert!((garden.time_effect() - (0.8 + 0.2 * 1.0f64.sin())).abs() < 1e-12);
    }

    #[test]
    fn test_same_quote_same_garden() {
        let mut a = garden();
        let mut b = garden();
        a.sow(QUOTE, None);
        b.sow(QUOTE, None);
        let summaries_a: Vec<_> = (0..120).map(|_| a.advance()).collect();
        let summaries_b: Vec<_> = (0..120).map(|_| b.advance()).collect();
        assert_eq!(summaries_a, summaries_b);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_flowers_age_every_tick() {
        let mut garden = garden();
        garden.sow("green", None);
        garden.run(3);
        assert_eq!(garden.flowers()[0].age, 3);
    }
}
