use super::*;

// -------------------- Hash --------------------

#[test]
fn deterministic_across_calls() {
    let a = hash64(b"hello world");
    let b = hash64(b"hello world");
    assert_eq!(a, b);
}

#[test]
fn distinct_inputs_usually_differ() {
    assert_ne!(hash64(b"a"), hash64(b"b"));
    assert_ne!(hash64(b""), hash64(b"\0"));
}

#[test]
fn empty_input_does_not_panic() {
    let _ = hash64(b"");
}

#[test]
fn all_tail_lengths_are_handled() {
    // Exercise every len % 8 remainder branch without panicking and
    // without colliding on the all-zero-bytes family.
    let mut seen = std::collections::HashSet::new();
    for len in 0..=16 {
        let data = vec![0x42u8; len];
        let h = hash64(&data);
        seen.insert(h);
    }
    // Different lengths should (almost always) produce different hashes.
    assert!(seen.len() > 10);
}

#[test]
fn split_roundtrips_halves() {
    let h = 0x1122_3344_5566_7788u64;
    let (a, b) = hash::split(h);
    assert_eq!(a, 0x5566_7788);
    assert_eq!(b, 0x1122_3344);
}

// -------------------- Partition --------------------

#[test]
fn starts_all_zero() {
    let p = Partition::new(64);
    for i in 0..64 {
        assert!(!p.get(i));
    }
}

#[test]
fn set_reports_previous_state() {
    let mut p = Partition::new(16);
    assert!(!p.set(3));
    assert!(p.set(3));
    assert!(p.get(3));
}

#[test]
fn setting_one_bit_does_not_affect_neighbors() {
    let mut p = Partition::new(32);
    p.set(9);
    for i in 0..32 {
        assert_eq!(p.get(i), i == 9, "bit {i} unexpectedly set");
    }
}

#[test]
fn byte_length_rounds_up() {
    assert_eq!(Partition::new(1).byte_len(), 1);
    assert_eq!(Partition::new(8).byte_len(), 1);
    assert_eq!(Partition::new(9).byte_len(), 2);
    assert_eq!(Partition::new(64).byte_len(), 8);
    assert_eq!(Partition::new(65).byte_len(), 9);
}

#[test]
fn len_reports_bit_count_not_byte_count() {
    let p = Partition::new(13);
    assert_eq!(p.len(), 13);
}

// -------------------- Filter: parameter derivation --------------------

#[test]
fn derived_params_are_self_consistent() {
    for &e in &[0.1, 0.01, 0.003, 0.001, 0.0001] {
        for i in 0..6u32 {
            let p = derive_params(e, i);
            assert!(p.k >= 1, "k must be >= 1 (e={e}, i={i})");
            assert!(p.s >= 1, "s must be >= 1 (e={e}, i={i})");
            assert_eq!(
                p.bmax,
                ((p.s as f64 * p.k as f64) * filter::P).floor() as u64,
                "bmax must equal floor(s*k*P) (e={e}, i={i})"
            );
        }
    }
}

#[test]
fn capacity_and_error_move_in_the_expected_direction_across_the_chain() {
    let e = 0.01;
    let p0 = derive_params(e, 0);
    let p1 = derive_params(e, 1);
    let p2 = derive_params(e, 2);

    // Each successive filter covers more bits...
    assert!(p1.s as u64 * p1.k as u64 > p0.s as u64 * p0.k as u64);
    assert!(p2.s as u64 * p2.k as u64 > p1.s as u64 * p1.k as u64);
    // ...and needs more hash functions as its target error tightens.
    assert!(p1.k >= p0.k);
    assert!(p2.k >= p1.k);
}

#[test]
fn tighter_target_error_yields_more_hash_functions() {
    let loose = derive_params(0.1, 0);
    let tight = derive_params(0.0001, 0);
    assert!(tight.k > loose.k);
}

// -------------------- Filter: add / contains / cardinality --------------------

#[test]
fn add_reports_novelty_then_stops_reporting_it() {
    let mut f = Filter::at(0.01, 0);
    let h = hash64(b"hello");
    assert!(f.add(h), "first insert of a key is always novel");
    assert!(!f.add(h), "re-inserting the same key sets no new bits");
}

#[test]
fn inserted_elements_are_always_found() {
    let mut f = Filter::at(0.01, 0);
    let keys: Vec<Vec<u8>> = (0..500u32).map(|i| i.to_le_bytes().to_vec()).collect();
    for k in &keys {
        f.add(hash64(k));
    }
    for k in &keys {
        assert!(f.contains(hash64(k)), "false negative on {k:?}");
    }
}

#[test]
fn b_never_exceeds_m() {
    let mut f = Filter::at(0.01, 0);
    for i in 0..10_000u32 {
        f.add(hash64(&i.to_le_bytes()));
        assert!(f.b() <= f.m());
    }
}

#[test]
fn cardinality_is_zero_when_empty() {
    let f = Filter::at(0.01, 0);
    assert_eq!(f.cardinality(), 0);
}

#[test]
fn cardinality_tracks_true_count_within_tolerance() {
    let mut f = Filter::at(0.01, 3);
    let n = 2000u32;
    for i in 0..n {
        f.add(hash64(&i.to_le_bytes()));
    }
    let estimate = f.cardinality() as f64;
    let drift = (estimate - n as f64).abs() / n as f64;
    assert!(drift < 0.05, "cardinality drifted too far: {estimate} vs {n}");
}

#[test]
fn is_full_once_bmax_reached() {
    let mut f = Filter::at(0.1, 0);
    let mut next = 0u64;
    while !f.is_full() {
        // Use an ever-growing key space so every insert is novel.
        f.add(hash64(&next.to_le_bytes()));
        next += 1;
    }
    assert!(f.b() >= f.bmax());
}

// -------------------- Chain error --------------------

#[test]
fn messages_match_the_wire_contract() {
    assert_eq!(ChainError::ErrorTooSmall.to_string(), "error too small");
    assert_eq!(
        ChainError::ErrorConflict.to_string(),
        "cannot change error on existing bloom filter"
    );
}

// -------------------- BloomChain --------------------

#[test]
fn starts_empty_with_default_error() {
    let c = BloomChain::new();
    assert_eq!(c.state(), ChainState::Empty);
    assert_eq!(c.numfilters(), 0);
    assert_eq!(c.error(), DEFAULT_ERROR);
}

#[test]
fn set_error_rejects_values_below_minimum() {
    let mut c = BloomChain::new();
    assert_eq!(c.set_error(1e-20), Err(ChainError::ErrorTooSmall));
}

#[test]
fn set_error_is_idempotent_for_the_same_value() {
    let mut c = BloomChain::new();
    c.set_error(0.1).unwrap();
    assert_eq!(c.set_error(0.1), Ok(()));
}

#[test]
fn set_error_is_frozen_once_growing() {
    let mut c = BloomChain::new();
    c.add(b"a");
    assert_eq!(c.state(), ChainState::Growing);
    assert_eq!(c.set_error(0.2), Err(ChainError::ErrorConflict));
}

#[test]
fn first_add_allocates_a_filter() {
    let mut c = BloomChain::new();
    assert_eq!(c.numfilters(), 0);
    c.add(b"a");
    assert_eq!(c.numfilters(), 1);
}

#[test]
fn no_false_negatives() {
    let mut c = BloomChain::new();
    c.set_error(0.01).unwrap();
    let elems: Vec<String> = (0..5000).map(|i| format!("elem-{i}")).collect();
    for e in &elems {
        c.add(e.as_bytes());
    }
    for e in &elems {
        assert!(c.exists(e.as_bytes()), "false negative on {e}");
    }
}

#[test]
fn exists_is_side_effect_free() {
    let mut c = BloomChain::new();
    c.add(b"a");
    let before = c.numfilters();
    for _ in 0..100 {
        c.exists(b"a");
        c.exists(b"not-present");
    }
    assert_eq!(c.numfilters(), before);
}

#[test]
fn chain_grows_past_a_single_filters_capacity() {
    let mut c = BloomChain::new();
    c.set_error(0.1).unwrap();
    for i in 0..200_000u32 {
        c.add(&i.to_le_bytes());
    }
    assert!(c.numfilters() > 1, "chain should have grown");
}

#[test]
fn novelty_semantics_match_double_insert() {
    let mut c = BloomChain::new();
    assert!(c.add(b"a"), "first insert is always novel");
    assert!(!c.add(b"a"), "re-insert into the same tail is not novel");
}

#[test]
fn cardinality_is_zero_for_an_empty_chain() {
    let c = BloomChain::new();
    assert_eq!(c.card(), 0);
}

#[test]
fn cardinality_tracks_true_count_across_growth() {
    let mut c = BloomChain::new();
    c.set_error(0.01).unwrap();
    let n = 50_000u32;
    for i in 0..n {
        c.add(&i.to_le_bytes());
    }
    let estimate = c.card() as f64;
    let drift = (estimate - n as f64).abs() / n as f64;
    assert!(drift < 0.01, "cardinality drifted too far: {estimate} vs {n}");
}

// S6/S7 at a scale a regular test run can afford; the 500,000-element,
// 5,000-probe version from the original specification belongs in the
// `cli` crate's criterion benchmarks, not the default test pass.
#[test]
fn random_elements_keep_cardinality_drift_and_false_positive_rate_bounded() {
    use rand::distributions::{Alphanumeric, DistString};
    use rand::{rngs::StdRng, SeedableRng};

    for &e in &[0.1, 0.01, 0.001] {
        let mut rng = StdRng::seed_from_u64(0x5eed ^ (e.to_bits()));
        let mut c = BloomChain::new();
        c.set_error(e).unwrap();

        let n = 20_000usize;
        let mut inserted: Vec<String> = Vec::with_capacity(n);
        for _ in 0..n {
            let s = Alphanumeric.sample_string(&mut rng, 16);
            c.add(s.as_bytes());
            inserted.push(s);
        }

        for s in &inserted {
            assert!(c.exists(s.as_bytes()), "false negative on {s}");
        }

        let estimate = c.card() as f64;
        let drift = (estimate - n as f64).abs() / n as f64;
        assert!(
            drift < 0.02,
            "cardinality drift too large at e={e}: {estimate} vs {n}"
        );

        let probes = 2_000;
        let mut false_positives = 0u32;
        for _ in 0..probes {
            let s = Alphanumeric.sample_string(&mut rng, 24);
            if c.exists(s.as_bytes()) {
                false_positives += 1;
            }
        }
        let observed_rate = f64::from(false_positives) / f64::from(probes);
        // Small-sample slack: at this probe count the binomial noise can
        // exceed the asymptotic bound the chain converges to.
        assert!(
            observed_rate < e * 5.0 + 0.01,
            "observed false-positive rate {observed_rate} far exceeds target {e}"
        );
    }
}
