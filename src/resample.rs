//! Categorical resampling of grid points according to a posterior pmf.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GridError, Result};
use crate::grid::GridSpace;
use crate::posterior::Pmf;

/// Draws from the grid, with replacement, in draw order.
///
/// Duplicates are expected and meaningful: they encode posterior mass, not
/// the cardinality of the support. Coordinates are stored flat, row-major
/// (`num_draws * ndim`), so projecting a single dimension out for interval
/// estimation is a strided copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    values: Box<[f64]>,
    ndim: usize,
}

impl SampleSet {
    /// Number of draws.
    pub fn len(&self) -> usize {
        self.values.len() / self.ndim
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// The coordinates of draw `index`.
    pub fn point(&self, index: usize) -> &[f64] {
        &self.values[index * self.ndim..][..self.ndim]
    }

    /// All draws in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.ndim)
    }

    /// The scalar draws for parameter dimension `dim`, one per draw.
    pub fn dimension(&self, dim: usize) -> Vec<f64> {
        assert!(dim < self.ndim);
        self.values.iter().skip(dim).step_by(self.ndim).copied().collect()
    }
}

/// Draw `num_draws` grid points with replacement, each point drawn with the
/// probability its pmf entry assigns.
///
/// Inverse-transform sampling over the cumulative pmf: one uniform variate
/// per draw, located in the running sum by binary search. Zero-probability
/// points are never drawn.
pub fn resample<R: Rng + ?Sized>(
    grid: &GridSpace,
    pmf: &Pmf,
    num_draws: usize,
    rng: &mut R,
) -> Result<SampleSet> {
    if num_draws == 0 {
        return Err(GridError::InvalidSampleCount);
    }
    if pmf.len() != grid.num_points() {
        return Err(GridError::DimensionMismatch {
            expected: grid.num_points(),
            actual: pmf.len(),
        });
    }

    let cumulative: Vec<f64> = pmf
        .probs()
        .iter()
        .scan(0f64, |acc, &p| {
            *acc += p;
            Some(*acc)
        })
        .collect();
    // Scale uniforms by the achieved total instead of assuming an exact
    // sum of 1, so accumulated rounding cannot push a draw past the end.
    let total = cumulative[cumulative.len() - 1];

    let ndim = grid.ndim();
    let mut values = vec![0f64; num_draws * ndim];
    for draw in values.chunks_exact_mut(ndim) {
        let u = rng.random::<f64>() * total;
        let index = cumulative.partition_point(|&c| c <= u).min(pmf.len() - 1);
        grid.write_point(index, draw);
    }
    Ok(SampleSet {
        values: values.into(),
        ndim,
    })
}

/// [`resample`] with a rng seeded from `seed`.
///
/// Identical grid, pmf, draw count and seed give identical output, which is
/// what notebook-style reproducibility and the tests rely on.
pub fn resample_seeded(
    grid: &GridSpace,
    pmf: &Pmf,
    num_draws: usize,
    seed: u64,
) -> Result<SampleSet> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    resample(grid, pmf, num_draws, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridAxis;
    use pretty_assertions::assert_eq;
    use rand::rngs::SmallRng;

    fn three_point_grid() -> GridSpace {
        GridSpace::new(vec![GridAxis::from_coords(vec![1., 2., 3.]).unwrap()]).unwrap()
    }

    #[test]
    fn rejects_misuse() {
        let grid = three_point_grid();
        let pmf = Pmf::from_probs(vec![0.1, 0.7, 0.2]).unwrap();
        assert!(matches!(
            resample_seeded(&grid, &pmf, 0, 0),
            Err(GridError::InvalidSampleCount)
        ));
        let short = Pmf::from_probs(vec![0.5, 0.5]).unwrap();
        assert!(matches!(
            resample_seeded(&grid, &short, 10, 0),
            Err(GridError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn frequencies_converge_to_pmf() {
        let grid = three_point_grid();
        let pmf = Pmf::from_probs(vec![0.1, 0.7, 0.2]).unwrap();
        let samples = resample_seeded(&grid, &pmf, 200_000, 42).unwrap();
        assert_eq!(samples.len(), 200_000);
        assert_eq!(samples.ndim(), 1);

        let mut counts = [0usize; 3];
        for point in samples.iter() {
            counts[point[0] as usize - 1] += 1;
        }
        for (count, expected) in counts.iter().zip([0.1, 0.7, 0.2]) {
            let freq = *count as f64 / 200_000.;
            assert!((freq - expected).abs() < 0.01, "freq {freq} vs {expected}");
        }
    }

    #[test]
    fn zero_probability_points_are_never_drawn() {
        let grid = three_point_grid();
        let pmf = Pmf::from_probs(vec![0., 1., 0.]).unwrap();
        let samples = resample_seeded(&grid, &pmf, 1_000, 7).unwrap();
        assert!(samples.iter().all(|point| point[0] == 2.));
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let grid = three_point_grid();
        let pmf = Pmf::from_probs(vec![0.1, 0.7, 0.2]).unwrap();
        let a = resample_seeded(&grid, &pmf, 1_000, 42).unwrap();
        let b = resample_seeded(&grid, &pmf, 1_000, 42).unwrap();
        assert_eq!(a, b);

        let c = resample_seeded(&grid, &pmf, 1_000, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn works_with_any_rng() {
        let grid = three_point_grid();
        let pmf = Pmf::from_probs(vec![0.1, 0.7, 0.2]).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let samples = resample(&grid, &pmf, 100, &mut rng).unwrap();
        assert_eq!(samples.len(), 100);
    }

    #[test]
    fn projects_dimensions() {
        let grid = GridSpace::new(vec![
            GridAxis::from_coords(vec![0., 1.]).unwrap(),
            GridAxis::from_coords(vec![10., 20.]).unwrap(),
        ])
        .unwrap();
        let pmf = Pmf::from_probs(vec![0.25; 4]).unwrap();
        let samples = resample_seeded(&grid, &pmf, 500, 3).unwrap();
        let first = samples.dimension(0);
        let second = samples.dimension(1);
        assert_eq!(first.len(), 500);
        for (i, (a, b)) in first.iter().zip(&second).enumerate() {
            assert_eq!(&[*a, *b], samples.point(i));
        }
    }
}
