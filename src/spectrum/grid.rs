use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GridProblem, Result};

/// Default emission window of the DBST probe.
pub const DEFAULT_START_NM: f64 = 400.0;
pub const DEFAULT_STOP_NM: f64 = 600.0;
pub const DEFAULT_SAMPLES: usize = 200;

// ---------------------------------------------------------------------------
// WavelengthGrid – immutable, strictly increasing wavelength axis
// ---------------------------------------------------------------------------

/// Evenly spaced wavelength samples in nm.
///
/// Cloning is cheap: the samples live behind an `Arc` so every curve
/// simulated on the same grid shares one allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    samples: Arc<[f64]>,
}

/// Build `count` evenly spaced samples from `start` to `stop` inclusive.
pub fn make_grid(start: f64, stop: f64, count: usize) -> Result<WavelengthGrid> {
    if count < 2 {
        return Err(GridProblem::TooFewSamples(count).into());
    }
    if !start.is_finite() || !stop.is_finite() || start >= stop {
        return Err(GridProblem::NotIncreasing { start, stop }.into());
    }
    Ok(WavelengthGrid {
        samples: linspace(start, stop, count).into(),
    })
}

fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = (stop - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                stop
            } else {
                start + step * i as f64
            }
        })
        .collect()
}

impl WavelengthGrid {
    /// First sample (nm).
    pub fn start(&self) -> f64 {
        self.samples[0]
    }

    /// Last sample (nm).
    pub fn stop(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }
}

impl Default for WavelengthGrid {
    fn default() -> Self {
        WavelengthGrid {
            samples: linspace(DEFAULT_START_NM, DEFAULT_STOP_NM, DEFAULT_SAMPLES).into(),
        }
    }
}

impl Deref for WavelengthGrid {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

// ---------------------------------------------------------------------------
// GridSpec – serialisable description of a grid (settings file)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub start_nm: f64,
    pub stop_nm: f64,
    pub count: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            start_nm: DEFAULT_START_NM,
            stop_nm: DEFAULT_STOP_NM,
            count: DEFAULT_SAMPLES,
        }
    }
}

impl GridSpec {
    pub fn build(&self) -> Result<WavelengthGrid> {
        make_grid(self.start_nm, self.stop_nm, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;
    use approx::assert_relative_eq;

    #[test]
    fn endpoints_are_inclusive() {
        let grid = make_grid(400.0, 600.0, 201).unwrap();
        assert_eq!(grid.len(), 201);
        assert_eq!(grid.start(), 400.0);
        assert_eq!(grid.stop(), 600.0);
        assert_relative_eq!(grid[1], 401.0, epsilon = 1e-12);
        assert_relative_eq!(grid[100], 500.0, epsilon = 1e-12);
    }

    #[test]
    fn strictly_increasing() {
        let grid = make_grid(400.0, 600.0, 200).unwrap();
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejects_degenerate_count() {
        assert_eq!(
            make_grid(400.0, 600.0, 1),
            Err(LabError::InvalidGrid(GridProblem::TooFewSamples(1)))
        );
        assert!(make_grid(400.0, 600.0, 0).is_err());
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            make_grid(600.0, 400.0, 10),
            Err(LabError::InvalidGrid(GridProblem::NotIncreasing { .. }))
        ));
        assert!(make_grid(f64::NAN, 400.0, 10).is_err());
    }

    #[test]
    fn default_grid_equals_built_default() {
        assert_eq!(GridSpec::default().build().unwrap(), WavelengthGrid::default());
    }
}
