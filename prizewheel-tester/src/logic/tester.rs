use colored::Colorize;
use prizewheel_game::{PrizeTable, WheelConfig};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::logic::scenarios::{Scenario, run_scenario};

/// Observed versus configured frequency for one prize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeFrequency {
    pub prize_id: u32,
    pub name: String,
    pub expected: f64,
    pub observed: f64,
    pub hits: u64,
}

impl PrizeFrequency {
    #[must_use]
    pub fn deviation(&self) -> f64 {
        (self.observed - self.expected).abs()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub checks_run: usize,
    pub failures: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frequencies: Vec<PrizeFrequency>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Accumulates check outcomes while a scenario runs.
#[derive(Debug, Default)]
pub struct CheckLog {
    pub checks_run: usize,
    pub failures: Vec<String>,
    pub frequencies: Vec<PrizeFrequency>,
}

impl CheckLog {
    pub fn check(&mut self, ok: bool, failure: impl FnOnce() -> String) {
        self.checks_run += 1;
        if !ok {
            self.failures.push(failure());
        }
    }
}

/// Shared inputs for every scenario run.
#[derive(Debug, Clone)]
pub struct WheelTester {
    pub table: PrizeTable,
    pub config: WheelConfig,
    pub spins: u32,
    pub tolerance: f64,
    pub verbose: bool,
}

impl WheelTester {
    #[must_use]
    pub fn new(table: PrizeTable, spins: u32, tolerance: f64, verbose: bool) -> Self {
        Self {
            table,
            config: WheelConfig::default(),
            spins,
            tolerance,
            verbose,
        }
    }

    pub fn run(&self, scenarios: &[Scenario], seeds: &[u64]) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(scenarios.len() * seeds.len());
        for scenario in scenarios {
            for &seed in seeds {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {seed})",
                        scenario.key().bright_white()
                    );
                }
                let started = Instant::now();
                let log = run_scenario(*scenario, self, seed);
                let result = ScenarioResult {
                    scenario_name: scenario.key().to_string(),
                    seed,
                    passed: log.failures.is_empty(),
                    checks_run: log.checks_run,
                    failures: log.failures,
                    frequencies: log.frequencies,
                    duration: started.elapsed(),
                };
                log::debug!(
                    "{} seed {seed}: {} checks, {} failures",
                    result.scenario_name,
                    result.checks_run,
                    result.failures.len()
                );
                results.push(result);
            }
        }
        results
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
