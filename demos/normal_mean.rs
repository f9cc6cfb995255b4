//! Fit the mean and standard deviation of a Gaussian on a 2-D grid.
//!
//! Generates synthetic data, normalizes the joint posterior over a
//! (mu, sigma) grid, resamples a particle approximation and reports
//! credible intervals per parameter.

use anyhow::Result;
use grid_rs::{
    equal_tailed, highest_density, resample_seeded, GridAxis, GridSpace, LogPrior,
    PosteriorEvaluator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let truth = Normal::new(1.5, 0.8)?;
    let data: Vec<f64> = (0..200).map(|_| truth.sample(&mut rng)).collect();

    let grid = GridSpace::new(vec![
        GridAxis::linspace(0., 3., 200)?,
        GridAxis::linspace(0.1, 2., 200)?,
    ])?;

    let log_likelihood = move |point: &[f64]| {
        let (mu, sigma) = (point[0], point[1]);
        data.iter()
            .map(|x| {
                let z = (x - mu) / sigma;
                -0.5 * z * z - sigma.ln()
            })
            .sum::<f64>()
    };
    // Weakly informative normal prior on mu, flat prior on sigma.
    let mu_prior = |mu: f64| -0.5 * (mu / 10.) * (mu / 10.);
    let sigma_prior = |_: f64| 0.;

    let evaluator = PosteriorEvaluator::new(
        &grid,
        log_likelihood,
        vec![
            Box::new(mu_prior) as Box<dyn LogPrior>,
            Box::new(sigma_prior) as Box<dyn LogPrior>,
        ],
    )?;
    let pmf = evaluator.pmf()?;
    let samples = resample_seeded(&grid, &pmf, 50_000, 42)?;

    for (name, dim) in [("mu", 0), ("sigma", 1)] {
        let draws = samples.dimension(dim);
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let eti = equal_tailed(&draws, 0.89)?;
        let hdi = highest_density(&draws, 0.89)?;
        println!(
            "{name}: mean {mean:.3}, 89% equal-tailed [{:.3}, {:.3}], 89% hdi [{:.3}, {:.3}]",
            eti.lower, eti.upper, hdi.lower, hdi.upper
        );
    }
    Ok(())
}
