//! Full pipeline on the classic binomial example: 6 successes in 9 trials
//! with a flat prior over the success probability. The analytic posterior
//! is Beta(7, 4), which pins down the mean and the interquartile range.

use approx::assert_abs_diff_eq;
use grid_rs::{
    equal_tailed, highest_density, resample_seeded, GridAxis, GridSpace, LogPrior,
    PosteriorEvaluator,
};

const SUCCESSES: f64 = 6.;
const FAILURES: f64 = 3.;

fn binomial_pipeline() -> (GridSpace, grid_rs::Pmf) {
    let grid = GridSpace::new(vec![GridAxis::linspace(0., 1., 1000).unwrap()]).unwrap();
    let evaluator = PosteriorEvaluator::new(
        &grid,
        |point: &[f64]| SUCCESSES * point[0].ln() + FAILURES * (1. - point[0]).ln(),
        vec![Box::new(|_: f64| 0.) as Box<dyn LogPrior>],
    )
    .unwrap();
    let pmf = evaluator.pmf().unwrap();
    (grid, pmf)
}

#[test]
fn pmf_matches_analytic_posterior() {
    let (_, pmf) = binomial_pipeline();

    let sum: f64 = pmf.probs().iter().sum();
    assert_abs_diff_eq!(sum, 1., epsilon = 1e-9);

    // Mean of the grid pmf against the Beta(7, 4) mean.
    let grid_mean: f64 = pmf
        .probs()
        .iter()
        .enumerate()
        .map(|(i, p)| p * i as f64 / 999.)
        .sum();
    assert_abs_diff_eq!(grid_mean, 7. / 11., epsilon = 1e-3);
}

#[test]
fn resampled_draws_recover_posterior_mean() {
    let (grid, pmf) = binomial_pipeline();
    let samples = resample_seeded(&grid, &pmf, 200_000, 42).unwrap();
    let draws = samples.dimension(0);

    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    assert_abs_diff_eq!(mean, 7. / 11., epsilon = 0.01);
}

#[test]
fn equal_tailed_matches_beta_interquartile_range() {
    let (grid, pmf) = binomial_pipeline();
    let samples = resample_seeded(&grid, &pmf, 200_000, 42).unwrap();

    let interval = equal_tailed(&samples.dimension(0), 0.5).unwrap();
    // Beta(7, 4) quartiles.
    assert_abs_diff_eq!(interval.lower, 0.5423, epsilon = 0.01);
    assert_abs_diff_eq!(interval.upper, 0.7392, epsilon = 0.01);
}

#[test]
fn hdi_is_no_wider_than_equal_tailed() {
    let (grid, pmf) = binomial_pipeline();
    let samples = resample_seeded(&grid, &pmf, 50_000, 7).unwrap();
    let draws = samples.dimension(0);

    let hdi = highest_density(&draws, 0.89).unwrap();
    let eti = equal_tailed(&draws, 0.89).unwrap();
    // Allow for the interpolation at the equal-tailed endpoints.
    assert!(hdi.upper - hdi.lower <= eti.upper - eti.lower + 1e-6);
    assert!(hdi.lower <= hdi.upper);
    assert!(hdi.lower >= 0. && hdi.upper <= 1.);
}

#[test]
fn pipeline_is_reproducible() {
    let (grid, pmf) = binomial_pipeline();
    let a = resample_seeded(&grid, &pmf, 5_000, 123).unwrap();
    let b = resample_seeded(&grid, &pmf, 5_000, 123).unwrap();
    assert_eq!(a, b);
}
