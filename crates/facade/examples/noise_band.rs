use census_dp::{apply_laplace_mechanism, fraction_within, noise_bound, SampleSummary};

fn main() -> census_dp::Result<()> {
    let true_value = 14_235.0;
    let sensitivity = 1.0;
    let draws = 10_000;

    for epsilon in [1.0, 0.1, 0.01] {
        let samples = (0..draws)
            .map(|_| apply_laplace_mechanism(true_value, sensitivity, epsilon))
            .collect::<census_dp::Result<Vec<_>>>()?;
        let summary = SampleSummary::from_samples(&samples)?;
        let band = noise_bound(sensitivity / epsilon, 0.95)?;
        println!(
            "eps={epsilon:<5} mean={:.2} var={:.2} 95% band=±{band:.1} observed={:.3}",
            summary.mean,
            summary.variance,
            fraction_within(&samples, true_value, band),
        );
    }
    Ok(())
}
