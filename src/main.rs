use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use echo_garden::{
    config::CanvasConfig,
    render::Rasterizer,
    scenario::{Scenario, ScenarioLoader},
    Garden,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Ephemeral Echo Garden runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/colourless_green.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Replace the scenario's founding quote
    #[arg(long)]
    quote: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Print a frame every N ticks; 0 prints only the final frame
    #[arg(long, default_value_t = 0)]
    frame_every: u64,

    /// Plain glyphs without ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Print garden statistics as JSON after the run
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    apply_overrides(&mut scenario, &cli);

    let filter = EnvFilter::try_new(&scenario.garden.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut garden = scenario.build_garden()?;
    let ticks = scenario.ticks(cli.ticks);
    let CanvasConfig { width, height } = scenario.garden.canvas;
    let mut raster = Rasterizer::new(width as usize, height as usize);
    let color = !cli.no_color;

    info!(
        scenario = %scenario.name,
        master_seed = garden.master_seed(),
        ticks,
        "garden planted"
    );

    for _ in 0..ticks {
        let summary = scenario.step(&mut garden);
        if cli.frame_every > 0 && summary.tick % cli.frame_every == 0 {
            print_frame(&mut raster, &garden, color);
        }
    }
    if cli.frame_every == 0 || ticks % cli.frame_every != 0 {
        print_frame(&mut raster, &garden, color);
    }

    if cli.stats {
        let stats = serde_json::to_string_pretty(&garden.stats())
            .context("Failed to serialize garden statistics")?;
        println!("{stats}");
    }

    info!(
        scenario = %scenario.name,
        ticks,
        population = garden.population(),
        "garden run complete"
    );
    Ok(())
}

fn apply_overrides(scenario: &mut Scenario, cli: &Cli) {
    if let Some(quote) = &cli.quote {
        scenario.quote = quote.clone();
    }
    if let Some(width) = cli.width {
        scenario.garden.canvas.width = width;
    }
    if let Some(height) = cli.height {
        scenario.garden.canvas.height = height;
    }
}

fn print_frame(raster: &mut Rasterizer, garden: &Garden, color: bool) {
    let views = garden.snapshot();
    let frame = raster.render(&views);
    let body = if color {
        frame.to_ansi_string()
    } else {
        frame.to_plain_string()
    };
    println!("{body}");
    println!(
        "--- Ephemeral Echo Garden --- Entities: {} --- Colors: {} ---",
        views.len(),
        if color { "On" } else { "Off" }
    );
}
