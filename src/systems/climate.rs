use crate::{
    engine::{System, TickContext, TickSummary},
    rng::GardenRng,
    world::GardenState,
};

const BASE_EFFECT: f64 = 0.8;
const SWING: f64 = 0.2;
const PHASE_PER_TICK: f64 = 0.01;

/// Slow day/night oscillation scaling how fast flowers grow and fade.
pub struct ClimateSystem;

impl ClimateSystem {
    pub fn new() -> Self {
        Self
    }

    pub fn time_effect(tick: u64) -> f64 {
        BASE_EFFECT + SWING * (tick as f64 * PHASE_PER_TICK).sin()
    }
}

impl Default for ClimateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ClimateSystem {
    fn name(&self) -> &str {
        "climate"
    }

    fn run(
        &mut self,
        ctx: &TickContext,
        state: &mut GardenState,
        _rng: &mut GardenRng,
        _summary: &mut TickSummary,
    ) {
        state.time_effect = Self::time_effect(ctx.tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_effect_bounds() {
        for tick in 0..2_000 {
            let effect = ClimateSystem::time_effect(tick);
            assert!((0.6..=1.0).contains(&effect), "tick {tick}: {effect}");
        }
        assert_eq!(ClimateSystem::time_effect(0), 0.8);
    }
}
