//! Pipeline tests: turnstile ordering, per-stage behavior under adversarial
//! delays, executor wiring, full-chain values, and contract violations.

use hashmill::engine::hashing::{DigestSuite, ThrottledSuite};
use hashmill::pipeline::{
    Turnstile, batch_digest_stage, combine_stage, item_digest_stage, run_pipeline, standard_stages,
};
use hashmill::{MillOpts, Payload, StageFn, mill, mill_with_suite};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Purely functional stub: outputs encode the operation and its input.
struct StubSuite;

impl DigestSuite for StubSuite {
    fn fast_checksum(&self, s: &str) -> String {
        format!("f({s})")
    }

    fn slow_digest(&self, s: &str) -> String {
        format!("s({s})")
    }
}

/// Stub whose slow digest takes longest for the earliest values, so units
/// finish computing in reverse arrival order.
struct InvertedDelaySuite {
    step_ms: u64,
    max: u64,
}

impl DigestSuite for InvertedDelaySuite {
    fn fast_checksum(&self, s: &str) -> String {
        format!("f({s})")
    }

    fn slow_digest(&self, s: &str) -> String {
        let v: u64 = s.parse().unwrap_or(0);
        thread::sleep(Duration::from_millis(
            self.max.saturating_sub(v) * self.step_ms,
        ));
        format!("s({s})")
    }
}

/// Known-answer fixture for the two-item scenario; the first item's slow
/// digest is the slower one.
struct ScenarioSuite;

impl DigestSuite for ScenarioSuite {
    fn fast_checksum(&self, s: &str) -> String {
        match s {
            "0" => "A",
            "X" => "B",
            "1" => "C",
            "Y" => "D",
            other => panic!("unexpected fast_checksum input: {other}"),
        }
        .to_string()
    }

    fn slow_digest(&self, s: &str) -> String {
        match s {
            "0" => {
                thread::sleep(Duration::from_millis(60));
                "X"
            }
            "1" => "Y",
            other => panic!("unexpected slow_digest input: {other}"),
        }
        .to_string()
    }
}

/// Stub whose fast checksum is slowest for the lowest batch index prefix, so
/// the sub-checksums inside one batch unit finish in reverse index order.
struct IndexDelaySuite;

impl DigestSuite for IndexDelaySuite {
    fn fast_checksum(&self, s: &str) -> String {
        let idx = s.bytes().next().map_or(0, |b| u64::from(b - b'0'));
        thread::sleep(Duration::from_millis((5 - idx.min(5)) * 12));
        format!("f({s})")
    }

    fn slow_digest(&self, s: &str) -> String {
        format!("s({s})")
    }
}

/// Stub that drags out every checksum over the first item's text.
struct FirstItemDragSuite;

impl DigestSuite for FirstItemDragSuite {
    fn fast_checksum(&self, s: &str) -> String {
        if s.ends_with("drag") {
            thread::sleep(Duration::from_millis(40));
        }
        format!("f({s})")
    }

    fn slow_digest(&self, s: &str) -> String {
        format!("s({s})")
    }
}

/// Expected per-item digest for the stub suites: fast(s) + fast(slow(s)).
fn item_digest_of(s: &str) -> String {
    format!("f({s})f(s({s}))")
}

/// Expected batch digest for the stub suites: fast("0"+s) .. fast("5"+s).
fn batch_digest_of(s: &str) -> String {
    (0..6).map(|i| format!("f({i}{s})")).collect()
}

fn int_seed(values: &[i64]) -> Vec<Payload> {
    values.iter().copied().map(Payload::Int).collect()
}

fn text_seed(values: &[&str]) -> Vec<Payload> {
    values.iter().map(|s| Payload::Text(s.to_string())).collect()
}

fn texts(drained: Vec<Payload>) -> Vec<String> {
    drained
        .into_iter()
        .map(|p| p.into_text("test drain"))
        .collect()
}

// --- turnstile ---

#[test]
fn test_turnstile_grants_turns_in_sequence_order() {
    let turnstile = Arc::new(Turnstile::new());
    let order = Arc::new(Mutex::new(Vec::new()));
    let total = 6_u64;

    let units: Vec<_> = (1..=total)
        .map(|seq| {
            let turnstile = Arc::clone(&turnstile);
            let order = Arc::clone(&order);
            thread::spawn(move || {
                // Later sequence numbers get ready sooner.
                thread::sleep(Duration::from_millis((total - seq) * 10));
                turnstile.wait_turn(seq);
                order.lock().unwrap().push(seq);
                turnstile.advance();
            })
        })
        .collect();
    for unit in units {
        unit.join().unwrap();
    }

    assert_eq!(*order.lock().unwrap(), (1..=total).collect::<Vec<_>>());
}

#[test]
fn test_turnstile_first_turn_is_immediate() {
    let turnstile = Turnstile::new();
    turnstile.wait_turn(1);
    turnstile.advance();
    turnstile.wait_turn(2);
}

// --- per-item digest stage ---

#[test]
fn test_item_digest_emits_in_input_order_under_inverted_delays() {
    let values: Vec<i64> = (0..6).collect();
    let suite = Arc::new(InvertedDelaySuite { step_ms: 15, max: 6 });

    let drained = run_pipeline(int_seed(&values), vec![item_digest_stage(suite)]);

    let expected: Vec<String> = values
        .iter()
        .map(|v| item_digest_of(&v.to_string()))
        .collect();
    assert_eq!(texts(drained), expected);
}

#[test]
fn test_item_digest_two_item_scenario_first_item_slower() {
    let drained = run_pipeline(
        int_seed(&[0, 1]),
        vec![item_digest_stage(Arc::new(ScenarioSuite))],
    );
    assert_eq!(texts(drained), vec!["AB".to_string(), "CD".to_string()]);
}

#[test]
fn test_item_digest_formats_values_in_decimal() {
    let drained = run_pipeline(
        int_seed(&[-3]),
        vec![item_digest_stage(Arc::new(StubSuite))],
    );
    assert_eq!(texts(drained), vec![item_digest_of("-3")]);
}

#[test]
fn test_item_digest_empty_input_emits_nothing() {
    let drained = run_pipeline(Vec::new(), vec![item_digest_stage(Arc::new(StubSuite))]);
    assert!(drained.is_empty());
}

// --- batch digest stage ---

#[test]
fn test_batch_digest_concatenates_in_index_order_under_inverted_delays() {
    let drained = run_pipeline(
        text_seed(&["x"]),
        vec![batch_digest_stage(Arc::new(IndexDelaySuite))],
    );
    assert_eq!(texts(drained), vec![batch_digest_of("x")]);
}

#[test]
fn test_batch_digest_preserves_cross_item_order() {
    let drained = run_pipeline(
        text_seed(&["drag", "quick"]),
        vec![batch_digest_stage(Arc::new(FirstItemDragSuite))],
    );
    assert_eq!(
        texts(drained),
        vec![batch_digest_of("drag"), batch_digest_of("quick")]
    );
}

// --- combine stage ---

#[test]
fn test_combine_sorts_joins_and_keeps_duplicates() {
    let drained = run_pipeline(text_seed(&["b", "a", "b"]), vec![combine_stage()]);
    assert_eq!(texts(drained), vec!["a_b_b".to_string()]);
}

#[test]
fn test_combine_is_invariant_under_arrival_permutation() {
    let forward = run_pipeline(text_seed(&["cc", "aa", "bb"]), vec![combine_stage()]);
    let shuffled = run_pipeline(text_seed(&["bb", "cc", "aa"]), vec![combine_stage()]);
    assert_eq!(forward, shuffled);
}

#[test]
fn test_combine_emits_exactly_once_for_empty_input() {
    let drained = run_pipeline(Vec::new(), vec![combine_stage()]);
    assert_eq!(texts(drained), vec![String::new()]);
}

// --- executor ---

#[test]
fn test_run_pipeline_zero_stages_drains_seed_unchanged() {
    let seed = vec![Payload::Int(1), Payload::Text("x".to_string())];
    assert_eq!(run_pipeline(seed.clone(), Vec::new()), seed);
}

#[test]
fn test_run_pipeline_chains_hand_written_stages() {
    let double: StageFn = Box::new(|input, output| {
        while let Ok(payload) = input.recv() {
            let _ = output.send(Payload::Int(payload.into_int("double") * 2));
        }
    });
    let render: StageFn = Box::new(|input, output| {
        while let Ok(payload) = input.recv() {
            let _ = output.send(Payload::Text(payload.into_int("render").to_string()));
        }
    });

    let drained = run_pipeline(int_seed(&[1, 2, 3]), vec![double, render]);
    assert_eq!(
        texts(drained),
        vec!["2".to_string(), "4".to_string(), "6".to_string()]
    );
}

// --- full chain ---

#[test]
fn test_full_chain_value_against_stub_expectation() {
    let combined = mill_with_suite(&[0, 1], Arc::new(StubSuite));

    let mut expected: Vec<String> = [0_i64, 1]
        .iter()
        .map(|v| batch_digest_of(&item_digest_of(&v.to_string())))
        .collect();
    expected.sort();
    assert_eq!(combined, expected.join("_"));
}

#[test]
fn test_full_chain_is_idempotent() {
    let first = mill_with_suite(&[9, -4, 9], Arc::new(StubSuite));
    let second = mill_with_suite(&[9, -4, 9], Arc::new(StubSuite));
    assert_eq!(first, second);
}

#[test]
fn test_full_chain_unchanged_by_slow_digest_throttle() {
    let plain = mill_with_suite(&[3, 1, 2], Arc::new(StubSuite));
    let throttled = mill_with_suite(
        &[3, 1, 2],
        Arc::new(ThrottledSuite::new(StubSuite, Duration::from_millis(25))),
    );
    assert_eq!(plain, throttled);
}

#[test]
fn test_full_chain_empty_input_yields_empty_string() {
    assert_eq!(mill(&[], &MillOpts::default()), "");
}

#[test]
fn test_full_chain_wide_input_keeps_one_digest_per_value() {
    let values: Vec<i64> = (0..40).collect();
    let combined = mill_with_suite(&values, Arc::new(StubSuite));

    let mut expected: Vec<String> = values
        .iter()
        .map(|v| batch_digest_of(&item_digest_of(&v.to_string())))
        .collect();
    expected.sort();
    assert_eq!(combined, expected.join("_"));
}

// --- contract violations ---

#[test]
#[should_panic(expected = "integer payload expected")]
fn test_item_digest_panics_on_text_payload() {
    run_pipeline(
        text_seed(&["rogue"]),
        vec![item_digest_stage(Arc::new(StubSuite))],
    );
}

#[test]
#[should_panic(expected = "text payload expected")]
fn test_batch_digest_panics_on_integer_payload() {
    run_pipeline(int_seed(&[7]), vec![batch_digest_stage(Arc::new(StubSuite))]);
}

#[test]
#[should_panic(expected = "text payload expected")]
fn test_combine_panics_on_integer_payload() {
    run_pipeline(int_seed(&[7]), vec![combine_stage()]);
}

#[test]
#[should_panic(expected = "integer payload expected")]
fn test_full_chain_terminates_on_rogue_payload_without_result() {
    run_pipeline(
        vec![Payload::Int(1), Payload::Text("rogue".to_string())],
        standard_stages(Arc::new(StubSuite)),
    );
}
