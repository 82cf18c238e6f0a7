use serde::Serialize;

use super::peak::PeakAnalysis;
use crate::error::{LabError, Result};

/// Enhancement and quenching at λmax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// `I(H2PO4-) / I(DBST)`
    pub enhancement_factor: f64,
    /// `(I(DBST) - I(Pb2+)) / I(DBST)`
    pub quenching_efficiency: f64,
}

impl DerivedMetrics {
    /// Both ratios, or [`LabError::UndefinedMetric`] when the baseline is zero.
    pub fn from_analysis(analysis: &PeakAnalysis) -> Result<Self> {
        Ok(DerivedMetrics {
            enhancement_factor: enhancement_factor(analysis)?,
            quenching_efficiency: quenching_efficiency(analysis)?,
        })
    }
}

fn nonzero_baseline(analysis: &PeakAnalysis, metric: &'static str) -> Result<f64> {
    if analysis.baseline == 0.0 {
        log::warn!("{metric} undefined at λmax = {} nm", analysis.lambda_max);
        return Err(LabError::UndefinedMetric { metric });
    }
    Ok(analysis.baseline)
}

pub fn enhancement_factor(analysis: &PeakAnalysis) -> Result<f64> {
    let base = nonzero_baseline(analysis, "enhancement factor")?;
    Ok(analysis.h2po4 / base)
}

pub fn quenching_efficiency(analysis: &PeakAnalysis) -> Result<f64> {
    let base = nonzero_baseline(analysis, "quenching efficiency")?;
    Ok((base - analysis.pb) / base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn peak(baseline: f64, h2po4: f64, pb: f64) -> PeakAnalysis {
        PeakAnalysis {
            index: 0,
            lambda_max: 450.0,
            baseline,
            h2po4,
            pb,
        }
    }

    #[test]
    fn ratios_at_lambda_max() {
        let m = DerivedMetrics::from_analysis(&peak(50.0, 60.0, 40.0)).unwrap();
        assert_relative_eq!(m.enhancement_factor, 1.2, epsilon = 1e-12);
        assert_relative_eq!(m.quenching_efficiency, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn enhancement_below_one_and_negative_quenching() {
        let pa = peak(100.0, 50.0, 150.0);
        assert_relative_eq!(enhancement_factor(&pa).unwrap(), 0.5);
        assert_relative_eq!(quenching_efficiency(&pa).unwrap(), -0.5);
    }

    #[test]
    fn zero_baseline_is_undefined() {
        let pa = peak(0.0, 60.0, 40.0);
        assert_eq!(
            DerivedMetrics::from_analysis(&pa),
            Err(LabError::UndefinedMetric {
                metric: "enhancement factor"
            })
        );
        assert_eq!(
            quenching_efficiency(&pa),
            Err(LabError::UndefinedMetric {
                metric: "quenching efficiency"
            })
        );
    }
}
