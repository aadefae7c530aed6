use census_dp::{
    age_at_least, age_decade, earns_above_50k, synthetic_census, PrivateQuerySession,
    SessionConfig, AGE_DECADES,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn main() -> census_dp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records = synthetic_census(10_000, &mut ChaCha8Rng::seed_from_u64(7));
    let mut session = PrivateQuerySession::new(records, SessionConfig::new(1.0))?;

    let over_40 = session.noisy_count(age_at_least(40), 0.25)?;
    let high_income = session.noisy_count(earns_above_50k, 0.25)?;
    let by_decade = session.noisy_histogram(age_decade, AGE_DECADES, 0.5)?;

    println!("aged 40+: {over_40:.1}");
    println!("income above 50K: {high_income:.1}");
    println!("by decade: {by_decade:.1}");

    match session.noisy_count(|_| true, 0.1) {
        Ok(_) => println!("unexpected: budget should be exhausted"),
        Err(err) => println!("further queries refused: {err}"),
    }
    Ok(())
}
