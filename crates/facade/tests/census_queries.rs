use census_dp::{
    age_at_least, calibrate_epsilon, count_matching, earns_above_50k, synthetic_census,
    CensusRecord, IncomeBracket, PrivateQuerySession, SessionConfig, COUNTING_QUERY_SENSITIVITY,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn record() -> impl Strategy<Value = CensusRecord> {
    (17u32..91, any::<bool>()).prop_map(|(age, rich)| {
        let income = if rich {
            IncomeBracket::Above50K
        } else {
            IncomeBracket::AtMost50K
        };
        CensusRecord::new(age).with_income(income)
    })
}

fn neighbors() -> impl Strategy<Value = (Vec<CensusRecord>, Vec<CensusRecord>)> {
    (
        prop::collection::vec(record(), 1..50),
        record(),
        any::<prop::sample::Index>(),
        any::<bool>(),
    )
        .prop_map(|(data, extra, idx, replace)| {
            let mut neighbor = data.clone();
            let i = idx.index(data.len());
            if replace {
                neighbor[i] = extra;
            } else {
                neighbor.remove(i);
            }
            (data, neighbor)
        })
}

proptest! {
    #[test]
    fn counting_queries_have_unit_sensitivity(
        (data, neighbor) in neighbors(),
        min_age in 17u32..91,
    ) {
        let by_age = |d: &[CensusRecord]| count_matching(d, age_at_least(min_age)) as f64;
        let by_income = |d: &[CensusRecord]| count_matching(d, earns_above_50k) as f64;
        let (d, n) = (data.as_slice(), neighbor.as_slice());
        prop_assert!((by_age(d) - by_age(n)).abs() <= COUNTING_QUERY_SENSITIVITY);
        prop_assert!((by_income(d) - by_income(n)).abs() <= COUNTING_QUERY_SENSITIVITY);
    }
}

#[test]
fn session_answers_until_budget_runs_out() {
    let records = synthetic_census(5_000, &mut ChaCha8Rng::seed_from_u64(1));
    let true_count = count_matching(&records, age_at_least(40)) as f64;

    let epsilon = calibrate_epsilon(COUNTING_QUERY_SENSITIVITY, 25.0, 0.99).unwrap();
    let mut session =
        PrivateQuerySession::new(records, SessionConfig::new(3.0 * epsilon).with_seed(5)).unwrap();

    for _ in 0..3 {
        let noisy = session.noisy_count(age_at_least(40), epsilon).unwrap();
        assert!((noisy - true_count).abs() < 60.0);
    }
    assert!(session.noisy_count(age_at_least(40), epsilon).is_err());
    assert_eq!(session.budget().history().len(), 3);
}
