use prizewheel_game::constants::{PLAYED_KEY, SESSION_KEY};
use prizewheel_game::{
    Clock, EligibilityStore, KeyValueStore, ManualClock, MemoryStore, Phase, Prize, PrizeTable,
    SpinError, WheelConfig, WheelSession, draw, select_prize, target_rotation,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn lettered_table() -> PrizeTable {
    let weights = [
        ("A", 0.05),
        ("B", 0.15),
        ("C", 0.15),
        ("D", 0.25),
        ("E", 0.25),
        ("F", 0.10),
        ("G", 0.05),
    ];
    let prizes = weights
        .iter()
        .zip(1_u32..)
        .map(|((name, p), id)| Prize::new(id, *name, *p, format!("#{id:06}")))
        .collect();
    PrizeTable::new(prizes).unwrap()
}

#[test]
fn reference_scenario_rolls() {
    let table = lettered_table();
    let cases = [(0.04, "A"), (0.21, "C"), (0.99, "G"), (0.36, "D"), (0.86, "F")];
    for (roll, expected) in cases {
        assert_eq!(select_prize(&table, roll).prize.name, expected, "roll {roll}");
    }
}

#[test]
fn same_roll_same_prize() {
    let table = lettered_table();
    for step in 0..200 {
        let roll = f64::from(step) / 200.0;
        assert_eq!(select_prize(&table, roll), select_prize(&table, roll));
    }
}

#[test]
fn seeded_frequencies_track_probabilities() {
    let table = PrizeTable::default_table();
    let mut rng = ChaCha20Rng::seed_from_u64(0x5EED);
    let spins = 100_000_u32;
    let mut counts = vec![0_u32; table.len()];
    for _ in 0..spins {
        counts[draw(&table, &mut rng).index] += 1;
    }
    for (prize, count) in table.prizes().iter().zip(&counts) {
        let observed = f64::from(*count) / f64::from(spins);
        assert!(
            (observed - prize.probability).abs() < 0.01,
            "prize {} observed {observed} expected {}",
            prize.id,
            prize.probability
        );
    }
}

#[test]
fn rotation_reference_angle() {
    let angle = target_rotation(2, 7, 5);
    assert!((angle - 2057.14).abs() < 0.01);
}

#[test]
fn full_visit_lifecycle() {
    let backend = MemoryStore::new();
    let clock = ManualClock::starting_at(1_700_000_000_000);
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let config = WheelConfig::default();

    let mut wheel = WheelSession::load(
        PrizeTable::default_table(),
        config,
        backend.clone(),
        clock.now_ms(),
        &mut rng,
    );
    assert_eq!(wheel.phase(), &Phase::Ready);
    let session_id = wheel.session_id().clone();
    assert_eq!(backend.get_item(SESSION_KEY).as_deref(), Some(session_id.as_str()));

    let pending = wheel.commit_selection(&mut rng, clock.now_ms()).unwrap();
    assert!(backend.get_item(PLAYED_KEY).is_none());

    clock.advance(config.reveal_delay_ms);
    let won = wheel.reveal_after_delay(clock.now_ms()).unwrap();
    assert_eq!(won, pending.prize);

    // A later visit sees the same prize and cannot spin again.
    for _ in 0..3 {
        let mut revisit = WheelSession::load(
            PrizeTable::default_table(),
            config,
            backend.clone(),
            clock.now_ms(),
            &mut rng,
        );
        assert_eq!(revisit.prior_result(), Some(&won));
        assert_eq!(revisit.session_id(), &session_id);
        assert_eq!(
            revisit.commit_selection(&mut rng, clock.now_ms()),
            Err(SpinError::AlreadyPlayed)
        );
    }

    let store = EligibilityStore::new(backend.clone());
    store.clear();
    assert!(!store.load_state().has_played);
    assert!(backend.get_item(SESSION_KEY).is_none());
}
