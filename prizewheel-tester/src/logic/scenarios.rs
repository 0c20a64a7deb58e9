use anyhow::{Result, bail};
use prizewheel_game::constants::FULL_TURN_DEGREES;
use prizewheel_game::{
    Clock, KeyValueStore, ManualClock, MemoryStore, Phase, SpinError, WheelSession, draw,
    select_prize, target_rotation,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::logic::tester::{CheckLog, PrizeFrequency, WheelTester};

const BAND_EPSILON: f64 = 1e-12;
/// Largest roll the selector can see; rolls at or above 1.0 clamp here.
const MAX_ROLL: f64 = 1.0 - f64::EPSILON / 2.0;
const RANDOM_ROLLS: usize = 1_000;
const START_MS: u64 = 1_700_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Distribution,
    Gating,
    Reference,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Distribution, Self::Gating, Self::Reference];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::Gating => "gating",
            Self::Reference => "reference",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Distribution => "Seeded Monte-Carlo spins match configured probabilities",
            Self::Gating => "One play per device: delay, reload, replay and clear behaviour",
            Self::Reference => "Fixed rolls land in their cumulative bands; wheel angles align",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    Scenario::ALL
        .iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

/// Expand CLI scenario tokens; `all` selects every scenario.
pub fn resolve_scenarios(tokens: &[String]) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();
    for token in tokens {
        if token == "all" {
            for scenario in Scenario::ALL {
                if !scenarios.contains(&scenario) {
                    scenarios.push(scenario);
                }
            }
            continue;
        }
        let Some(scenario) = Scenario::from_key(token) else {
            bail!("unknown scenario '{token}' (try --list-scenarios)");
        };
        if !scenarios.contains(&scenario) {
            scenarios.push(scenario);
        }
    }
    if scenarios.is_empty() {
        bail!("no scenarios selected");
    }
    Ok(scenarios)
}

pub fn run_scenario(scenario: Scenario, tester: &WheelTester, seed: u64) -> CheckLog {
    let mut log = CheckLog::default();
    match scenario {
        Scenario::Distribution => run_distribution(tester, seed, &mut log),
        Scenario::Gating => run_gating(tester, seed, &mut log),
        Scenario::Reference => run_reference(tester, seed, &mut log),
    }
    log
}

fn run_distribution(tester: &WheelTester, seed: u64, log: &mut CheckLog) {
    let table = &tester.table;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut hits = vec![0_u64; table.len()];
    for _ in 0..tester.spins {
        let selection = draw(table, &mut rng);
        hits[selection.index] += 1;
    }

    let total = f64::from(tester.spins.max(1));
    for (prize, count) in table.prizes().iter().zip(hits) {
        #[allow(clippy::cast_precision_loss)]
        let observed = count as f64 / total;
        let frequency = PrizeFrequency {
            prize_id: prize.id,
            name: prize.name.clone(),
            expected: prize.probability,
            observed,
            hits: count,
        };
        log.check(frequency.deviation() <= tester.tolerance, || {
            format!(
                "prize {} ({}) observed {:.4}, expected {:.4} ± {}",
                prize.id, prize.name, observed, prize.probability, tester.tolerance
            )
        });
        log.frequencies.push(frequency);
    }
}

fn open<S: KeyValueStore>(
    tester: &WheelTester,
    backend: S,
    clock: &ManualClock,
    rng: &mut ChaCha20Rng,
) -> WheelSession<S> {
    WheelSession::load(
        tester.table.clone(),
        tester.config,
        backend,
        clock.now_ms(),
        rng,
    )
}

fn run_gating(tester: &WheelTester, seed: u64, log: &mut CheckLog) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let clock = ManualClock::starting_at(START_MS);
    let delay = tester.config.reveal_delay_ms;

    // First visit: spin, wait, reveal.
    let backend = MemoryStore::new();
    let mut wheel = open(tester, backend.clone(), &clock, &mut rng);
    log.check(wheel.phase() == &Phase::Ready, || {
        "fresh device should be ready to spin".to_string()
    });
    let session_id = wheel.session_id().clone();

    let Ok(pending) = wheel.commit_selection(&mut rng, clock.now_ms()) else {
        log.check(false, || "first spin was rejected".to_string());
        return;
    };
    log.check(
        wheel.commit_selection(&mut rng, clock.now_ms()) == Err(SpinError::SpinInProgress),
        || "second spin during animation should be rejected".to_string(),
    );
    if delay > 0 {
        log.check(
            matches!(
                wheel.reveal_after_delay(clock.now_ms()),
                Err(SpinError::RevealNotDue { .. })
            ),
            || "reveal before delay should be refused".to_string(),
        );
    }
    log.check(!wheel.store().load_state().has_played, || {
        "play recorded before the reveal delay elapsed".to_string()
    });

    clock.advance(delay);
    match wheel.reveal_after_delay(clock.now_ms()) {
        Ok(prize) => log.check(prize == pending.prize, || {
            "revealed prize differs from drawn prize".to_string()
        }),
        Err(err) => log.check(false, || format!("reveal failed after delay: {err}")),
    }

    // Later visits see the same prize and cannot spin.
    for _ in 0..3 {
        let mut revisit = open(tester, backend.clone(), &clock, &mut rng);
        log.check(revisit.prior_result() == Some(&pending.prize), || {
            "revisit lost the recorded prize".to_string()
        });
        log.check(revisit.session_id() == &session_id, || {
            "session id changed between visits".to_string()
        });
        log.check(
            revisit.commit_selection(&mut rng, clock.now_ms()) == Err(SpinError::AlreadyPlayed),
            || "replay was not blocked".to_string(),
        );
    }

    // Clearing re-enables play.
    wheel.clear();
    log.check(backend.is_empty(), || "clear left data behind".to_string());
    let reopened = open(tester, backend, &clock, &mut rng);
    log.check(reopened.phase() == &Phase::Ready, || {
        "device not eligible after clear".to_string()
    });

    check_reload_during_delay(tester, MemoryStore::new(), &clock, &mut rng, log);
}

/// Reload inside the delay window drops the in-flight result.
fn check_reload_during_delay(
    tester: &WheelTester,
    backend: MemoryStore,
    clock: &ManualClock,
    rng: &mut ChaCha20Rng,
    log: &mut CheckLog,
) {
    let mut wheel = open(tester, backend.clone(), clock, rng);
    if let Err(err) = wheel.commit_selection(rng, clock.now_ms()) {
        log.check(false, || format!("spin before reload was rejected: {err}"));
        return;
    }
    log.check(wheel.abandon().is_some(), || {
        "reload found no spin in flight".to_string()
    });
    let reloaded = open(tester, backend, clock, rng);
    log.check(reloaded.phase() == &Phase::Ready, || {
        "reload during the delay window marked the device as played".to_string()
    });
}

/// Index the selector should pick for `roll`: the first band whose upper
/// bound reaches it, else the last band.
fn expected_index(bands: &[(f64, f64)], roll: f64) -> usize {
    bands
        .iter()
        .position(|&(_, hi)| roll <= hi)
        .unwrap_or(bands.len().saturating_sub(1))
}

fn run_reference(tester: &WheelTester, seed: u64, log: &mut CheckLog) {
    let table = &tester.table;
    let bands = table.cumulative_bands();
    let last = table.len().saturating_sub(1);

    for (index, (lo, hi)) in bands.iter().copied().enumerate() {
        // Bands pushed past 1.0 by rounding noise cannot be rolled.
        if lo >= MAX_ROLL {
            continue;
        }
        let mid = f64::midpoint(lo, hi).min(MAX_ROLL);
        let picked = select_prize(table, mid).index;
        log.check(picked == index, || {
            format!("midpoint of band {index} selected index {picked}")
        });
        let upper = hi.min(MAX_ROLL);
        let picked = select_prize(table, upper).index;
        let expected = expected_index(&bands, upper);
        log.check(picked == expected, || {
            format!("upper bound {upper} of band {index} selected index {picked}, expected {expected}")
        });
    }
    log.check(select_prize(table, 0.0).index == 0, || {
        "roll 0.0 should select the first prize".to_string()
    });
    let top = select_prize(table, MAX_ROLL).index;
    let expected_top = expected_index(&bands, MAX_ROLL);
    log.check(top == expected_top, || {
        format!("top-of-range roll selected index {top}, expected {expected_top}")
    });

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for _ in 0..RANDOM_ROLLS {
        let roll: f64 = rng.r#gen();
        let selection = select_prize(table, roll);
        let (lo, hi) = bands[selection.index];
        let in_band =
            roll >= lo - BAND_EPSILON && (roll <= hi + BAND_EPSILON || selection.index == last);
        log.check(in_band && selection.index == expected_index(&bands, roll), || {
            format!("roll {roll} outside band ({lo}, {hi}] of index {}", selection.index)
        });
        log.check(select_prize(table, roll) == selection, || {
            format!("roll {roll} selected differently on repeat")
        });
    }

    let turns = FULL_TURN_DEGREES * f64::from(tester.config.base_turns);
    for index in 0..table.len() {
        let offset = target_rotation(index, table.len(), tester.config.base_turns) - turns;
        log.check(offset > 0.0 && offset <= FULL_TURN_DEGREES, || {
            format!("segment {index} offset {offset} outside (0, 360]")
        });
    }
}
