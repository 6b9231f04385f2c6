use std::cmp::Reverse;

use tracing::info;

use crate::{
    engine::{System, TickContext, TickSummary},
    rng::GardenRng,
    world::GardenState,
};

/// Keeps the population at or below `max_flowers`.
///
/// Survivors are the oldest flowers; ties keep their planting order.
pub struct CapacitySystem;

impl CapacitySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CapacitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CapacitySystem {
    fn name(&self) -> &str {
        "capacity"
    }

    fn run(
        &mut self,
        ctx: &TickContext,
        state: &mut GardenState,
        _rng: &mut GardenRng,
        summary: &mut TickSummary,
    ) {
        let cap = ctx.dynamics.max_flowers;
        if state.flowers.len() <= cap {
            return;
        }
        state.flowers.sort_by_key(|flower| Reverse(flower.age));
        summary.evicted = state.flowers.len() - cap;
        state.flowers.truncate(cap);
        info!(tick = ctx.tick, evicted = summary.evicted, "population capped");
    }
}
