use serde::Serialize;

use crate::data::{RawDataset, Series};

/// Intensities of every series at the baseline emission maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakAnalysis {
    /// Row of the maximum.
    pub index: usize,
    pub lambda_max: f64,
    pub baseline: f64,
    pub h2po4: f64,
    pub pb: f64,
}

impl PeakAnalysis {
    pub fn intensity(&self, series: Series) -> f64 {
        match series {
            Series::Baseline => self.baseline,
            Series::PlusH2PO4 => self.h2po4,
            Series::PlusPb => self.pb,
        }
    }

    /// Largest of the three intensities at λmax.
    pub fn max_intensity(&self) -> f64 {
        self.baseline.max(self.h2po4).max(self.pb)
    }
}

/// Locate λmax on the baseline series and read every series there.
///
/// Ties go to the lowest row. The dataset's shape was validated when it was
/// built, so this cannot fail.
pub fn analyze(dataset: &RawDataset) -> PeakAnalysis {
    let baseline = dataset.series(Series::Baseline);
    let index = baseline
        .iter()
        .enumerate()
        .fold(0, |best, (i, &v)| if v > baseline[best] { i } else { best });

    let analysis = PeakAnalysis {
        index,
        lambda_max: dataset.wavelength()[index],
        baseline: baseline[index],
        h2po4: dataset.series(Series::PlusH2PO4)[index],
        pb: dataset.series(Series::PlusPb)[index],
    };
    log::info!(
        "λmax = {:.2} nm (row {index}), I = {:.2} / {:.2} / {:.2}",
        analysis.lambda_max,
        analysis.baseline,
        analysis.h2po4,
        analysis.pb
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> RawDataset {
        RawDataset::new(
            vec![400.0, 450.0, 500.0],
            vec![10.0, 50.0, 30.0],
            vec![5.0, 60.0, 20.0],
            vec![8.0, 40.0, 25.0],
        )
        .unwrap()
    }

    #[test]
    fn finds_baseline_maximum() {
        let pa = analyze(&scenario());
        assert_eq!(pa.index, 1);
        assert_eq!(pa.lambda_max, 450.0);
        assert_eq!(pa.baseline, 50.0);
        assert_eq!(pa.h2po4, 60.0);
        assert_eq!(pa.pb, 40.0);
        assert_eq!(pa.max_intensity(), 60.0);
        assert_eq!(pa.intensity(Series::PlusPb), 40.0);
    }

    #[test]
    fn ties_take_first_row() {
        let ds = RawDataset::new(
            vec![400.0, 410.0, 420.0, 430.0],
            vec![7.0, 9.0, 3.0, 9.0],
            vec![1.0, 2.0, 3.0, 4.0],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        assert_eq!(analyze(&ds).lambda_max, 410.0);
    }

    #[test]
    fn single_row() {
        let ds = RawDataset::new(vec![480.0], vec![0.0], vec![1.0], vec![2.0]).unwrap();
        let pa = analyze(&ds);
        assert_eq!((pa.index, pa.lambda_max), (0, 480.0));
    }

    #[test]
    fn maximum_ignores_other_series() {
        let ds = RawDataset::new(
            vec![400.0, 450.0],
            vec![5.0, 4.0],
            vec![1.0, 100.0],
            vec![1.0, 100.0],
        )
        .unwrap();
        assert_eq!(analyze(&ds).index, 0);
    }
}
