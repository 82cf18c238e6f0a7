use super::metrics::DerivedMetrics;
use super::peak::PeakAnalysis;
use crate::error::Result;

/// Plain-text scientific summary of one analysed dataset.
///
/// Ratios are printed with three decimals, or as "undefined" when the
/// baseline intensity at λmax is zero.
pub fn interpretation(analysis: &PeakAnalysis, metrics: &Result<DerivedMetrics>) -> String {
    let (ef, qe) = match metrics {
        Ok(m) => (
            format!("{:.3}", m.enhancement_factor),
            format!("{:.3}", m.quenching_efficiency),
        ),
        Err(_) => ("undefined".to_string(), "undefined".to_string()),
    };

    format!(
        "λmax detected at {:.2} nm.\n\n\
         The presence of H2PO4- enhances fluorescence (EF = {ef}).\n\n\
         Pb2+ significantly quenches emission (QE = {qe}).\n\n\
         The system functions as a molecular INHIBIT logic gate where fluorescence \
         is observed only when H2PO4- is present and Pb2+ is absent.",
        analysis.lambda_max
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    fn peak(baseline: f64) -> PeakAnalysis {
        PeakAnalysis {
            index: 1,
            lambda_max: 450.0,
            baseline,
            h2po4: 60.0,
            pb: 40.0,
        }
    }

    #[test]
    fn reports_formatted_metrics() {
        let pa = peak(50.0);
        let text = interpretation(&pa, &DerivedMetrics::from_analysis(&pa));
        assert!(text.starts_with("λmax detected at 450.00 nm."));
        assert!(text.contains("(EF = 1.200)"));
        assert!(text.contains("(QE = 0.200)"));
        assert!(text.ends_with("Pb2+ is absent."));
    }

    #[test]
    fn undefined_metrics_are_named() {
        let pa = peak(0.0);
        let metrics = DerivedMetrics::from_analysis(&pa);
        assert!(matches!(metrics, Err(LabError::UndefinedMetric { .. })));
        let text = interpretation(&pa, &metrics);
        assert!(text.contains("(EF = undefined)"));
        assert!(text.contains("(QE = undefined)"));
    }
}
