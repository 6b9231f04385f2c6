use tracing::info;

use crate::{
    engine::{Pollination, System, TickContext, TickSummary},
    flower::Position,
    rng::{GardenRng, RngExt},
    world::GardenState,
};

const MIN_CHILD_LEN: usize = 3;
const MAX_CHILD_LEN: usize = 14;
const POSITION_JITTER: f64 = 10.0;

/// Splices two mature sown flowers into a child word planted between them.
pub struct PollinationSystem;

impl PollinationSystem {
    pub fn new() -> Self {
        Self
    }

    /// First half of `left` followed by the second half of `right`, split on
    /// characters.
    pub fn splice(left: &str, right: &str) -> String {
        let left_half = left.chars().count() / 2;
        let right_half = right.chars().count() / 2;
        left.chars()
            .take(left_half)
            .chain(right.chars().skip(right_half))
            .collect()
    }

    /// One pollination attempt. Returns `None` whenever any gate rejects it.
    pub fn attempt(
        state: &mut GardenState,
        chance: f64,
        rng: &mut GardenRng,
    ) -> Option<Pollination> {
        if state.population() < 2 || !rng.chance(chance) {
            return None;
        }

        let eligible: Vec<usize> = state
            .flowers()
            .iter()
            .enumerate()
            .filter(|(_, flower)| flower.can_pollinate())
            .map(|(index, _)| index)
            .collect();
        if eligible.len() < 2 {
            return None;
        }

        let first = *rng.pick(&eligible)?;
        let second = *rng.pick(&eligible)?;
        if first == second {
            return None;
        }

        let (a, b) = (&state.flowers()[first], &state.flowers()[second]);
        let child = Self::splice(&a.source_word, &b.source_word);
        let length = child.chars().count();
        if !(MIN_CHILD_LEN..=MAX_CHILD_LEN).contains(&length) {
            return None;
        }

        let parents = (a.source_word.clone(), b.source_word.clone());
        let mid = a.position.midpoint(b.position);
        let base = Position::new(
            mid.x + rng.uniform(-POSITION_JITTER, POSITION_JITTER),
            mid.y + rng.uniform(-POSITION_JITTER, POSITION_JITTER),
        );
        state.sow(&child, Some(base), rng);

        Some(Pollination { parents, child })
    }
}

impl Default for PollinationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PollinationSystem {
    fn name(&self) -> &str {
        "pollination"
    }

    fn run(
        &mut self,
        ctx: &TickContext,
        state: &mut GardenState,
        rng: &mut GardenRng,
        summary: &mut TickSummary,
    ) {
        let interval = ctx.dynamics.pollination_interval.max(1);
        if ctx.tick % interval != 0 {
            return;
        }
        if let Some(pollination) = Self::attempt(state, ctx.dynamics.pollination_chance, rng) {
            info!(
                tick = ctx.tick,
                left = %pollination.parents.0,
                right = %pollination.parents.1,
                child = %pollination.child,
                "cross-pollinated"
            );
            summary.pollinations.push(pollination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    fn mature_state(phrase: &str) -> GardenState {
        let mut state = GardenState::new(80, 40, 7, phrase);
        state.sow(phrase, None, &mut seeded(1));
        for flower in state.flowers.iter_mut() {
            flower.age = 60;
            flower.max_age = 100.0;
        }
        state
    }

    #[test]
    fn test_splice_halves() {
        assert_eq!(PollinationSystem::splice("garden", "flower"), "garwer");
        assert_eq!(PollinationSystem::splice("green", "ideas"), "greas");
        assert_eq!(PollinationSystem::splice("a", "b"), "b");
    }

    #[test]
    fn test_child_planted_between_parents() {
        let mut state = mature_state("garden flower");
        let mut rng = seeded(2);
        let mut made = None;
        for _ in 0..200 {
            if let Some(p) = PollinationSystem::attempt(&mut state, 1.0, &mut rng) {
                made = Some(p);
                break;
            }
        }
        let pollination = made.expect("no pollination in 200 attempts");
        assert!(["garwer", "floden"].contains(&pollination.child.as_str()));
        assert_eq!(state.population(), 3);
        assert_eq!(state.flowers()[2].source_word, pollination.child);
        assert!(!state.flowers()[2].is_nomad);
    }

    #[test]
    fn test_immature_flowers_never_pollinate() {
        let mut state = GardenState::new(80, 40, 7, "garden flower");
        let mut rng = seeded(3);
        state.sow("garden flower", None, &mut rng);
        for _ in 0..100 {
            assert!(PollinationSystem::attempt(&mut state, 1.0, &mut rng).is_none());
        }
        assert_eq!(state.population(), 2);
    }

    #[test]
    fn test_short_children_rejected() {
        let mut state = mature_state("ab cd");
        let mut rng = seeded(4);
        for _ in 0..100 {
            assert!(PollinationSystem::attempt(&mut state, 1.0, &mut rng).is_none());
        }
        assert_eq!(state.population(), 2);
    }

    #[test]
    fn test_off_interval_ticks_skipped() {
        let mut state = mature_state("garden flower");
        let mut rng = seeded(5);
        let dynamics = crate::config::DynamicsConfig {
            pollination_interval: 10,
            pollination_chance: 1.0,
            ..Default::default()
        };
        let mut summary = TickSummary::default();
        for tick in 1..10 {
            let ctx = TickContext {
                tick,
                dynamics: &dynamics,
            };
            PollinationSystem::new().run(&ctx, &mut state, &mut rng, &mut summary);
        }
        assert!(summary.pollinations.is_empty());
        assert_eq!(state.population(), 2);
    }
}
