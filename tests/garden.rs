use std::collections::HashMap;

use echo_garden::{
    config::DynamicsConfig, render::Rasterizer, FlowerId, Garden, GardenConfig, GardenError,
};

const QUOTE: &str = "Colourless green ideas sleep furiously.";

fn sown_garden(config: GardenConfig) -> Garden {
    let mut garden = Garden::new(QUOTE, config).expect("garden should seed");
    garden.sow(QUOTE, None);
    garden
}

#[test]
fn fifty_ticks_from_the_classic_quote() {
    let mut garden = sown_garden(GardenConfig::default());
    let mut raster = Rasterizer::new(80, 40);

    for _ in 0..50 {
        let summary = garden.advance();
        assert!(summary.population <= 100);
        let frame = raster.render(&garden.snapshot());
        assert_eq!(frame.width(), 80);
        assert_eq!(frame.height(), 40);
        assert_eq!(frame.rows().count(), 40);
        assert!(frame.rows().all(|row| row.len() == 80));
    }

    let stats = garden.stats();
    assert!(stats.population >= 5, "sown flowers outlive fifty ticks");
    assert!(stats.population <= 100);
    assert!(
        stats.nomad_fraction() <= 0.5,
        "{} nomads out of {}",
        stats.nomads,
        stats.population
    );
    assert_eq!(stats.tick, 50);
}

#[test]
fn positions_stay_on_canvas() {
    let config = GardenConfig {
        dynamics: DynamicsConfig {
            nomad_spawn_chance: 0.5,
            pollination_chance: 1.0,
            pollination_interval: 2,
            ..DynamicsConfig::default()
        },
        ..GardenConfig::with_canvas(30, 12)
    };
    let mut garden = sown_garden(config);
    garden.sow("joyful love lingers near the edge", None);

    garden.run_with_hook(300, |_| {});
    for flower in garden.flowers() {
        assert!((0.0..=30.0).contains(&flower.position.x));
        assert!((0.0..=12.0).contains(&flower.position.y));
    }
}

#[test]
fn population_never_exceeds_cap() {
    let config = GardenConfig {
        dynamics: DynamicsConfig {
            nomad_spawn_chance: 1.0,
            max_flowers: 8,
            ..DynamicsConfig::default()
        },
        ..GardenConfig::default()
    };
    let mut garden = sown_garden(config);
    let mut evicted = 0;
    garden.run_with_hook(60, |summary| {
        assert!(summary.population <= 8);
        evicted += summary.evicted;
    });
    assert!(evicted > 0);
    assert!((5..=8).contains(&garden.population()));
}

#[test]
fn scale_rises_then_falls_and_dead_flowers_vanish() {
    let mut garden = sown_garden(GardenConfig::default());
    let mut history: HashMap<FlowerId, (f64, bool)> = HashMap::new();

    for _ in 0..250 {
        garden.advance();
        for flower in garden.flowers() {
            assert!(!flower.is_dead, "dead flower survived its tick");
            if let Some(&(previous, was_fading)) = history.get(&flower.id) {
                if was_fading {
                    assert!(flower.is_fading);
                    assert!(flower.current_scale <= previous);
                } else if !flower.is_fading {
                    assert!(flower.current_scale >= previous);
                }
            }
            history.insert(flower.id, (flower.current_scale, flower.is_fading));
        }
    }
}

#[test]
fn identical_quotes_grow_identical_gardens() {
    let mut a = sown_garden(GardenConfig::default());
    let mut b = sown_garden(GardenConfig::default());
    a.run(120);
    b.run(120);
    assert_eq!(a.snapshot(), b.snapshot());

    let mut raster = Rasterizer::new(80, 40);
    let first = raster.render(&a.snapshot()).to_ansi_string();
    let second = raster.render(&b.snapshot()).to_ansi_string();
    assert_eq!(first, second);
}

#[test]
fn gardens_do_not_share_randomness() {
    let mut alone = sown_garden(GardenConfig::default());
    alone.run(80);

    let mut paired = sown_garden(GardenConfig::default());
    let mut noisy = Garden::new("something else entirely", GardenConfig::default()).unwrap();
    noisy.sow("something else entirely", None);
    for _ in 0..80 {
        paired.advance();
        noisy.advance();
    }
    assert_eq!(alone.snapshot(), paired.snapshot());
}

#[test]
fn empty_quote_cannot_seed_a_garden() {
    assert!(matches!(
        Garden::new("", GardenConfig::default()),
        Err(GardenError::EmptyInput)
    ));
}
