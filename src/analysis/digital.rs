use serde::Serialize;

use super::peak::PeakAnalysis;
use crate::data::Series;

/// Analog-to-digital conversion: `true` iff `intensity` is strictly above
/// `threshold`.
pub fn digitize(intensity: f64, threshold: f64) -> bool {
    intensity > threshold
}

// ---------------------------------------------------------------------------
// Threshold range
// ---------------------------------------------------------------------------

/// Meaningful thresholds for one analysis: `0 ..= max intensity at λmax`.
///
/// The core digitizes against any threshold; this only bounds the UI slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdRange {
    pub min: f64,
    pub max: f64,
}

impl ThresholdRange {
    pub fn for_analysis(analysis: &PeakAnalysis) -> Self {
        ThresholdRange {
            min: 0.0,
            max: analysis.max_intensity().max(0.0),
        }
    }
}

/// Starting threshold: half the baseline intensity at λmax.
pub fn default_threshold(analysis: &PeakAnalysis) -> f64 {
    analysis.baseline / 2.0
}

// ---------------------------------------------------------------------------
// DigitalOutput
// ---------------------------------------------------------------------------

/// One line of the digital conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigitalRow {
    pub series: Series,
    pub intensity: f64,
    pub bit: bool,
}

/// Digitized intensity of every series at λmax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigitalOutput {
    pub baseline: bool,
    pub h2po4: bool,
    pub pb: bool,
}

impl DigitalOutput {
    pub fn from_analysis(analysis: &PeakAnalysis, threshold: f64) -> Self {
        DigitalOutput {
            baseline: digitize(analysis.baseline, threshold),
            h2po4: digitize(analysis.h2po4, threshold),
            pb: digitize(analysis.pb, threshold),
        }
    }

    pub fn bit(&self, series: Series) -> bool {
        match series {
            Series::Baseline => self.baseline,
            Series::PlusH2PO4 => self.h2po4,
            Series::PlusPb => self.pb,
        }
    }

    /// Table rows in DBST, +H2PO4-, +Pb2+ order.
    pub fn rows(&self, analysis: &PeakAnalysis) -> [DigitalRow; 3] {
        Series::ALL.map(|series| DigitalRow {
            series,
            intensity: analysis.intensity(series),
            bit: self.bit(series),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak() -> PeakAnalysis {
        PeakAnalysis {
            index: 1,
            lambda_max: 450.0,
            baseline: 50.0,
            h2po4: 60.0,
            pb: 40.0,
        }
    }

    #[test]
    fn strict_inequality_at_boundary() {
        assert!(!digitize(50.0, 50.0));
        assert!(digitize(50.0001, 50.0));
        assert!(!digitize(0.0, 0.0));
    }

    #[test]
    fn table_at_half_baseline() {
        let pa = peak();
        let threshold = default_threshold(&pa);
        assert_eq!(threshold, 25.0);
        let out = DigitalOutput::from_analysis(&pa, threshold);
        assert_eq!(
            out,
            DigitalOutput {
                baseline: true,
                h2po4: true,
                pb: true
            }
        );

        let out = DigitalOutput::from_analysis(&pa, 50.0);
        let rows = out.rows(&pa);
        assert_eq!(rows[0].series, Series::Baseline);
        assert!(!rows[0].bit);
        assert!(rows[1].bit);
        assert_eq!(rows[2].intensity, 40.0);
        assert!(!rows[2].bit);
    }

    #[test]
    fn out_of_range_thresholds_still_digitize() {
        let pa = peak();
        let all_off = DigitalOutput::from_analysis(&pa, 1e9);
        assert!(!all_off.baseline && !all_off.h2po4 && !all_off.pb);
        let all_on = DigitalOutput::from_analysis(&pa, -1.0);
        assert!(all_on.baseline && all_on.h2po4 && all_on.pb);
    }

    #[test]
    fn range_spans_zero_to_max() {
        let range = ThresholdRange::for_analysis(&peak());
        assert_eq!(range, ThresholdRange { min: 0.0, max: 60.0 });
    }
}
