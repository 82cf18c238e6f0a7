/// Dataset analyzer: λmax lookup → ratios → digital bits → logic gate.
///
/// ```text
///   RawDataset
///        │
///        ▼
///   ┌──────────┐
///   │  peak     │  λmax on the DBST series, all intensities there
///   └──────────┘
///        │
///        ├──────────────► metrics   EF, QE
///        │
///        ▼
///   ┌──────────┐   threshold
///   │ digital   │ ◄─────────
///   └──────────┘
///        │   GateInputs
///        ▼
///   ┌──────────┐
///   │  gate     │  active intensity → output bit
///   └──────────┘
///
///   TRUTH_TABLE is fixed reference data beside this chain; the measured
///   table runs the gate over all four inputs for comparison.
/// ```

pub mod digital;
pub mod gate;
pub mod metrics;
pub mod peak;
pub mod report;

pub use digital::{default_threshold, digitize, DigitalOutput, DigitalRow, ThresholdRange};
pub use gate::{
    evaluate_gate, measured_truth_table, GateInputs, LogicGateState, TruthRow, GATE_DESCRIPTION,
    TRUTH_TABLE,
};
pub use metrics::DerivedMetrics;
pub use peak::{analyze, PeakAnalysis};
pub use report::interpretation;

use crate::data::RawDataset;
use crate::error::Result;

/// Everything derived from one dataset that does not depend on user input.
///
/// Rebuilt from scratch whenever a new dataset is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetAnalysis {
    pub peak: PeakAnalysis,
    pub metrics: Result<DerivedMetrics>,
    pub threshold_range: ThresholdRange,
}

impl DatasetAnalysis {
    pub fn new(dataset: &RawDataset) -> Self {
        let peak = analyze(dataset);
        DatasetAnalysis {
            metrics: DerivedMetrics::from_analysis(&peak),
            threshold_range: ThresholdRange::for_analysis(&peak),
            peak,
        }
    }

    pub fn default_threshold(&self) -> f64 {
        default_threshold(&self.peak)
    }

    pub fn digital(&self, threshold: f64) -> DigitalOutput {
        DigitalOutput::from_analysis(&self.peak, threshold)
    }

    pub fn gate(&self, inputs: GateInputs, threshold: f64) -> LogicGateState {
        evaluate_gate(inputs, &self.peak, threshold)
    }

    /// Gate output for every input combination, in [`TRUTH_TABLE`] order.
    pub fn measured_truth_table(&self, threshold: f64) -> [LogicGateState; 4] {
        measured_truth_table(&self.peak, threshold)
    }

    pub fn interpretation(&self) -> String {
        interpretation(&self.peak, &self.metrics)
    }
}
