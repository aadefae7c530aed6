use census_dp::{check_mechanism, neighboring_releases, Auditor, QueryConfig};

fn main() -> census_dp::Result<()> {
    let config = QueryConfig::counting(1.0).with_seed(3);
    let mechanism = config.mechanism()?;
    let mut rng = config.rng();

    let check = check_mechanism(&mechanism, 100.0, 100_000, &mut rng)?;
    println!(
        "mean error {:.4}, variance relative error {:.4}",
        check.mean_error(),
        check.variance_relative_error()
    );

    let (d, d_prime) = neighboring_releases(&mechanism, 100.0, 99.0, 50_000, &mut rng)?;
    let (threshold, result) = Auditor::default().find_optimal_threshold(&d, &d_prime);
    println!(
        "empirical epsilon >= {:.3} at threshold {threshold:.2} (configured {})",
        result.epsilon_lower,
        mechanism.epsilon()
    );
    Ok(())
}
