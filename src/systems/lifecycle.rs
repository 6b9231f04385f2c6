use crate::{
    engine::{System, TickContext, TickSummary},
    rng::GardenRng,
    world::GardenState,
};

/// Ages every flower and clears out the ones that died this tick.
pub struct LifecycleSystem;

impl LifecycleSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LifecycleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for LifecycleSystem {
    fn name(&self) -> &str {
        "lifecycle"
    }

    fn run(
        &mut self,
        _ctx: &TickContext,
        state: &mut GardenState,
        rng: &mut GardenRng,
        summary: &mut TickSummary,
    ) {
        let time_effect = state.time_effect;
        for flower in state.flowers.iter_mut() {
            flower.update(time_effect, rng);
        }

        let before = state.flowers.len();
        state.flowers.retain(|flower| !flower.is_dead);
        summary.deaths = before - state.flowers.len();
    }
}
