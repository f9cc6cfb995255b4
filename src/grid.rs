//! Discretization of a continuous parameter space into a finite grid.
//!
//! A [`GridSpace`] is the Cartesian product of one [`GridAxis`] per
//! parameter, flattened row-major (last axis varies fastest). Points are
//! never materialized as a dense N-dimensional structure; they are derived
//! on demand from a flat index, so memory stays linear in the number of
//! grid points.

use crate::error::{GridError, Result};

/// Default cap on the total number of grid points.
///
/// The Cartesian product grows multiplicatively with each axis, so a guard
/// against accidental combinatorial blow-up is part of the construction
/// contract. Use [`GridSpace::with_max_points`] to raise or lower it.
pub const DEFAULT_MAX_POINTS: usize = 10_000_000;

/// Ordered coordinates for a single parameter.
///
/// Invariant: strictly increasing, at least two coordinates, all finite.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    coords: Box<[f64]>,
}

impl GridAxis {
    /// A uniform partition of `[min, max]` into `count` coordinates,
    /// inclusive of both endpoints.
    pub fn linspace(min: f64, max: f64, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(GridError::InvalidGridSpec(format!(
                "axis needs at least 2 coordinates, got {count}"
            )));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(GridError::InvalidGridSpec(format!(
                "axis endpoints must be finite, got [{min}, {max}]"
            )));
        }
        if min >= max {
            return Err(GridError::InvalidGridSpec(format!(
                "axis endpoints must satisfy min < max, got [{min}, {max}]"
            )));
        }
        let step = (max - min) / (count - 1) as f64;
        let mut coords: Vec<f64> = (0..count).map(|i| min + step * i as f64).collect();
        // Keep the upper endpoint exact regardless of rounding in the steps.
        coords[count - 1] = max;
        Ok(Self {
            coords: coords.into(),
        })
    }

    /// An axis from explicit breakpoints.
    pub fn from_coords(coords: impl Into<Vec<f64>>) -> Result<Self> {
        let coords: Vec<f64> = coords.into();
        if coords.len() < 2 {
            return Err(GridError::InvalidGridSpec(format!(
                "axis needs at least 2 coordinates, got {}",
                coords.len()
            )));
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(GridError::InvalidGridSpec(
                "axis coordinates must be finite".into(),
            ));
        }
        if coords.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GridError::InvalidGridSpec(
                "axis coordinates must be strictly increasing".into(),
            ));
        }
        Ok(Self {
            coords: coords.into(),
        })
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }
}

/// The Cartesian product of one axis per parameter, indexed row-major.
///
/// The evaluator and resampler address points by flat index, so the
/// flattening order is part of this type's contract: the last axis varies
/// fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpace {
    axes: Box<[GridAxis]>,
    num_points: usize,
}

impl GridSpace {
    /// A grid capped at [`DEFAULT_MAX_POINTS`] total points.
    pub fn new(axes: Vec<GridAxis>) -> Result<Self> {
        Self::with_max_points(axes, DEFAULT_MAX_POINTS)
    }

    /// A grid with a caller-chosen cap on the total number of points.
    pub fn with_max_points(axes: Vec<GridAxis>, max_points: usize) -> Result<Self> {
        if axes.is_empty() {
            return Err(GridError::InvalidGridSpec(
                "grid needs at least one axis".into(),
            ));
        }
        let mut num_points = 1usize;
        for axis in &axes {
            num_points =
                num_points
                    .checked_mul(axis.num_points())
                    .ok_or(GridError::GridTooLarge {
                        size: usize::MAX,
                        max: max_points,
                    })?;
        }
        if num_points > max_points {
            return Err(GridError::GridTooLarge {
                size: num_points,
                max: max_points,
            });
        }
        Ok(Self {
            axes: axes.into(),
            num_points,
        })
    }

    /// Number of parameter dimensions.
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Total number of grid points, the product of the axis lengths.
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn axes(&self) -> &[GridAxis] {
        &self.axes
    }

    /// Write the coordinates of the point at `index` into `out`.
    pub fn write_point(&self, index: usize, out: &mut [f64]) {
        assert!(index < self.num_points);
        assert!(out.len() == self.ndim());
        let mut rem = index;
        for (axis, slot) in self.axes.iter().zip(out.iter_mut()).rev() {
            let len = axis.num_points();
            *slot = axis.coords[rem % len];
            rem /= len;
        }
    }

    /// The coordinates of the point at `index` as a fresh allocation.
    pub fn point(&self, index: usize) -> Box<[f64]> {
        let mut out = vec![0f64; self.ndim()];
        self.write_point(index, &mut out);
        out.into()
    }

    /// All grid points in flat-index order.
    pub fn points(&self) -> impl Iterator<Item = Box<[f64]>> + '_ {
        (0..self.num_points).map(|i| self.point(i))
    }
}
