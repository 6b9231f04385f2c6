use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::GardenConfig;
use crate::engine::Garden;
use crate::flower::Position;

fn default_ticks() -> u64 {
    200
}

fn default_sow_quote() -> bool {
    true
}

/// A reproducible garden run: founding quote, config, and phrases to sow
/// at fixed ticks.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub quote: String,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Sow the founding quote before the first tick.
    #[serde(default = "default_sow_quote")]
    pub sow_quote: bool,
    #[serde(default)]
    pub phrases: Vec<ScheduledPhrase>,
    #[serde(default)]
    pub garden: GardenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledPhrase {
    pub text: String,
    /// Sown just before this tick advances; 0 sows with the founding quote.
    pub tick: u64,
    #[serde(default)]
    pub position: Option<[f64; 2]>,
}

impl ScheduledPhrase {
    pub fn base(&self) -> Option<Position> {
        self.position.map(|[x, y]| Position::new(x, y))
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .garden
            .validate()
            .with_context(|| format!("Invalid garden settings in {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// Build the garden and sow everything scheduled for tick 0.
    pub fn build_garden(&self) -> Result<Garden> {
        let mut garden = Garden::new(&self.quote, self.garden.clone())
            .with_context(|| format!("Failed to seed garden for scenario '{}'", self.name))?;
        if self.sow_quote {
            garden.sow(&self.quote, None);
        }
        for phrase in self.phrases_at(0) {
            garden.sow(&phrase.text, phrase.base());
        }
        Ok(garden)
    }

    pub fn phrases_at(&self, tick: u64) -> impl Iterator<Item = &ScheduledPhrase> {
        self.phrases.iter().filter(move |phrase| phrase.tick == tick)
    }

    /// Advance `garden` one tick, sowing the phrases scheduled for it first.
    pub fn step(&self, garden: &mut Garden) -> crate::engine::TickSummary {
        let next = garden.garden_time() + 1;
        for phrase in self.phrases_at(next) {
            garden.sow(&phrase.text, phrase.base());
        }
        garden.advance()
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.unwrap_or(self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_scenario_defaults() {
        let scenario: Scenario =
            serde_yaml::from_str("name: tiny\nquote: \"a small green thought\"\n").unwrap();
        assert_eq!(scenario.ticks, 200);
        assert!(scenario.sow_quote);
        assert!(scenario.phrases.is_empty());
        assert_eq!(scenario.garden.canvas.width, 80);
        assert_eq!(scenario.ticks(Some(5)), 5);
    }

    #[test]
    fn test_scheduled_phrases_sown_on_their_tick() {
        let yaml = r#"
name: sched
quote: "green ideas"
sow_quote: false
phrases:
  - text: bloom
    tick: 3
    position: [40.0, 20.0]
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let mut garden = scenario.build_garden().unwrap();
        assert_eq!(garden.population(), 0);
        scenario.step(&mut garden);
        scenario.step(&mut garden);
        assert_eq!(garden.population(), 0);
        scenario.step(&mut garden);
        assert_eq!(garden.flowers()[0].source_word, "bloom");
        assert_eq!(garden.flowers()[0].age, 1);
    }

    #[test]
    fn test_loader_reports_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ScenarioLoader::new(dir.path());
        let err = loader.load("missing.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario file"));

        let mut file = fs::File::create(dir.path().join("bad.yaml")).unwrap();
        writeln!(file, "name: bad\nquote: hi\ngarden:\n  canvas:\n    width: 0").unwrap();
        let err = loader.load("bad.yaml").unwrap_err();
        assert!(err.to_string().contains("Invalid garden settings"));
    }
}
