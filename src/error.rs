use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// LabError – every failure the computational core can report
// ---------------------------------------------------------------------------

/// Errors raised by the simulation and analysis core.
///
/// Each pipeline stage reports its own variant; a failure in one stage never
/// touches state owned by another.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    #[error("invalid wavelength grid: {0}")]
    InvalidGrid(GridProblem),

    #[error("invalid spectrum model: {0}")]
    InvalidModel(String),

    #[error("concentration must be a finite value >= 0, got {value}")]
    InvalidConcentration { value: f64 },

    #[error("invalid dataset: {0}")]
    InvalidDataset(DatasetProblem),

    #[error("{metric} is undefined: baseline intensity at λmax is zero")]
    UndefinedMetric { metric: &'static str },

    #[error("LOD not computable: slope must be > 0, got {slope}")]
    LodNotComputable { slope: f64 },
}

pub type Result<T, E = LabError> = std::result::Result<T, E>;

/// Why a wavelength grid was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum GridProblem {
    TooFewSamples(usize),
    NotIncreasing { start: f64, stop: f64 },
}

impl fmt::Display for GridProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridProblem::TooFewSamples(n) => {
                write!(f, "need at least 2 samples, got {n}")
            }
            GridProblem::NotIncreasing { start, stop } => {
                write!(f, "range {start} → {stop} is not strictly increasing")
            }
        }
    }
}

/// Why a tabular dataset was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetProblem {
    /// Fewer than the four required columns.
    TooFewColumns { found: usize },
    /// A series has a different number of rows than the wavelength column.
    LengthMismatch {
        column: usize,
        expected: usize,
        found: usize,
    },
    /// A cell could not be read as a finite number.
    NonNumeric {
        row: usize,
        column: usize,
        text: String,
    },
    Empty,
}

impl fmt::Display for DatasetProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetProblem::TooFewColumns { found } => write!(
                f,
                "expected four columns (Wavelength, DBST, DBST+H2PO4-, DBST+Pb2+), found {found}"
            ),
            DatasetProblem::LengthMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "column {column} has {found} rows but the wavelength column has {expected}"
            ),
            DatasetProblem::NonNumeric { row, column, text } => {
                write!(f, "row {row}, column {column}: '{text}' is not a number")
            }
            DatasetProblem::Empty => write!(f, "dataset contains no rows"),
        }
    }
}

impl From<DatasetProblem> for LabError {
    fn from(problem: DatasetProblem) -> Self {
        LabError::InvalidDataset(problem)
    }
}

impl From<GridProblem> for LabError {
    fn from(problem: GridProblem) -> Self {
        LabError::InvalidGrid(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_problem_reads_well() {
        let err = LabError::from(DatasetProblem::TooFewColumns { found: 3 });
        assert_eq!(
            err.to_string(),
            "invalid dataset: expected four columns (Wavelength, DBST, DBST+H2PO4-, DBST+Pb2+), found 3"
        );
    }

    #[test]
    fn lod_error_names_slope() {
        let err = LabError::LodNotComputable { slope: 0.0 };
        assert_eq!(err.to_string(), "LOD not computable: slope must be > 0, got 0");
    }
}
