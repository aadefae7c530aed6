use census_dp::{age_at_least, count_matching, synthetic_census, QueryConfig};
use tracing_subscriber::EnvFilter;

fn main() -> census_dp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = QueryConfig::counting(0.1).with_seed(42);
    config.validate()?;
    let mut rng = config.rng();

    let records = synthetic_census(32_561, &mut rng);
    let true_count = count_matching(&records, age_at_least(40));
    let noisy = config.mechanism()?.apply_scalar(true_count as f64, &mut rng)?;

    println!("Respondents aged 40 or over: {true_count}");
    println!("Noisy answer (eps = {}): {noisy:.2}", config.epsilon);
    Ok(())
}
