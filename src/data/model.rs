use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetProblem, Result};

/// Number of columns a dataset must provide.
pub const REQUIRED_COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Series – the three intensity columns
// ---------------------------------------------------------------------------

/// Intensity series recorded for one probe experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Series {
    /// Free probe.
    Baseline,
    PlusH2PO4,
    PlusPb,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Baseline, Series::PlusH2PO4, Series::PlusPb];

    pub fn label(self) -> &'static str {
        match self {
            Series::Baseline => "DBST",
            Series::PlusH2PO4 => "DBST + H2PO4-",
            Series::PlusPb => "DBST + Pb2+",
        }
    }

    /// Column position in the source table (0 is wavelength).
    pub fn column(self) -> usize {
        match self {
            Series::Baseline => 1,
            Series::PlusH2PO4 => 2,
            Series::PlusPb => 3,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawDataset – wavelength plus three aligned intensity series
// ---------------------------------------------------------------------------

/// An uploaded spectral table.
///
/// Construction validates the shape, so every `RawDataset` has at least one
/// row, four equally long columns and only finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    wavelength: Vec<f64>,
    baseline: Vec<f64>,
    h2po4: Vec<f64>,
    pb: Vec<f64>,
}

impl RawDataset {
    pub fn new(wavelength: Vec<f64>, baseline: Vec<f64>, h2po4: Vec<f64>, pb: Vec<f64>) -> Result<Self> {
        Self::from_columns(vec![wavelength, baseline, h2po4, pb])
    }

    /// Build from columns in file order. Columns past the fourth are ignored.
    pub fn from_columns(mut columns: Vec<Vec<f64>>) -> Result<Self> {
        if columns.len() < REQUIRED_COLUMNS {
            return Err(DatasetProblem::TooFewColumns {
                found: columns.len(),
            }
            .into());
        }
        columns.truncate(REQUIRED_COLUMNS);

        let expected = columns[0].len();
        if expected == 0 {
            return Err(DatasetProblem::Empty.into());
        }
        for (column, values) in columns.iter().enumerate() {
            if values.len() != expected {
                return Err(DatasetProblem::LengthMismatch {
                    column,
                    expected,
                    found: values.len(),
                }
                .into());
            }
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(DatasetProblem::NonNumeric {
                    row,
                    column,
                    text: values[row].to_string(),
                }
                .into());
            }
        }

        let [wavelength, baseline, h2po4, pb]: [Vec<f64>; REQUIRED_COLUMNS] =
            columns.try_into().map_err(|cols: Vec<Vec<f64>>| {
                DatasetProblem::TooFewColumns { found: cols.len() }
            })?;
        Ok(RawDataset {
            wavelength,
            baseline,
            h2po4,
            pb,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the dataset has no rows. Never true once validated.
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    pub fn series(&self, series: Series) -> &[f64] {
        match series {
            Series::Baseline => &self.baseline,
            Series::PlusH2PO4 => &self.h2po4,
            Series::PlusPb => &self.pb,
        }
    }

    /// `(wavelength, intensity)` pairs of one series, for plotting.
    pub fn points(&self, series: Series) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelength
            .iter()
            .copied()
            .zip(self.series(series).iter().copied())
    }

    /// First `n` rows as `[wavelength, DBST, +H2PO4-, +Pb2+]`.
    pub fn head(&self, n: usize) -> impl Iterator<Item = [f64; REQUIRED_COLUMNS]> + '_ {
        (0..self.len().min(n)).map(move |i| {
            [self.wavelength[i], self.baseline[i], self.h2po4[i], self.pb[i]]
        })
    }
}
