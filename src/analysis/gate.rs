use serde::Serialize;

use super::digital::digitize;
use super::peak::PeakAnalysis;
use crate::data::Series;

/// Boolean expression the DBST probe is described as implementing.
pub const GATE_DESCRIPTION: &str = "INHIBIT Gate Model: Output = H2PO4- AND NOT(Pb2+)";

/// Gate inputs: which analytes are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GateInputs {
    pub h2po4: bool,
    pub pb: bool,
}

impl GateInputs {
    pub const ALL: [GateInputs; 4] = [
        GateInputs { h2po4: false, pb: false },
        GateInputs { h2po4: false, pb: true },
        GateInputs { h2po4: true, pb: false },
        GateInputs { h2po4: true, pb: true },
    ];

    /// Measured series that stands in for this input combination.
    ///
    /// Pb2+ wins whenever its bit is set, including when H2PO4- is also
    /// present.
    pub fn active_series(self) -> Series {
        if self.h2po4 && !self.pb {
            Series::PlusH2PO4
        } else if self.pb {
            Series::PlusPb
        } else {
            Series::Baseline
        }
    }
}

/// Result of running the gate on measured data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogicGateState {
    pub inputs: GateInputs,
    pub active_series: Series,
    pub active_intensity: f64,
    pub output: bool,
}

/// Pick the measured intensity for `inputs` and digitize it.
pub fn evaluate_gate(inputs: GateInputs, analysis: &PeakAnalysis, threshold: f64) -> LogicGateState {
    let active_series = inputs.active_series();
    let active_intensity = analysis.intensity(active_series);
    let output = digitize(active_intensity, threshold);
    log::debug!("gate {inputs:?} → {active_series} ({active_intensity:.2}) → {output}");
    LogicGateState {
        inputs,
        active_series,
        active_intensity,
        output,
    }
}

// ---------------------------------------------------------------------------
// Reference truth table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    pub inputs: GateInputs,
    pub output: bool,
}

/// Published truth table of the probe.
///
/// Fixed reference data, independent of any dataset and not derived from
/// [`evaluate_gate`].
pub const TRUTH_TABLE: [TruthRow; 4] = [
    TruthRow {
        inputs: GateInputs { h2po4: false, pb: false },
        output: true,
    },
    TruthRow {
        inputs: GateInputs { h2po4: false, pb: true },
        output: false,
    },
    TruthRow {
        inputs: GateInputs { h2po4: true, pb: false },
        output: true,
    },
    TruthRow {
        inputs: GateInputs { h2po4: true, pb: true },
        output: false,
    },
];

/// Run [`evaluate_gate`] for all four input combinations, in
/// [`TRUTH_TABLE`] order.
pub fn measured_truth_table(analysis: &PeakAnalysis, threshold: f64) -> [LogicGateState; 4] {
    GateInputs::ALL.map(|inputs| evaluate_gate(inputs, analysis, threshold))
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
    fn lead_dominates_when_both_present() {
        let state = evaluate_gate(GateInputs { h2po4: true, pb: true }, &peak(), 45.0);
        assert_eq!(state.active_series, Series::PlusPb);
        assert_eq!(state.active_intensity, 40.0);
        assert!(!state.output);
    }

    #[test]
    fn no_inputs_reads_baseline() {
        let state = evaluate_gate(GateInputs::default(), &peak(), 45.0);
        assert_eq!(state.active_series, Series::Baseline);
        assert_eq!(state.active_intensity, 50.0);
        assert!(state.output);
    }

    #[test]
    fn phosphate_alone_reads_enhanced() {
        let state = evaluate_gate(GateInputs { h2po4: true, pb: false }, &peak(), 60.0);
        assert_eq!(state.active_intensity, 60.0);
        assert!(!state.output, "equal to threshold digitizes low");
    }

    #[test]
    fn every_input_combination_selects_its_series() {
        let expected = [
            (Series::Baseline, 50.0),
            (Series::PlusPb, 40.0),
            (Series::PlusH2PO4, 60.0),
            (Series::PlusPb, 40.0),
        ];
        for (inputs, (series, intensity)) in GateInputs::ALL.into_iter().zip(expected) {
            assert_eq!(inputs.active_series(), series, "{inputs:?}");
            let state = evaluate_gate(inputs, &peak(), 45.0);
            assert_eq!(state.active_series, series, "{inputs:?}");
            assert_eq!(state.active_intensity, intensity, "{inputs:?}");
            assert_eq!(state.output, intensity > 45.0, "{inputs:?}");
        }
    }

    #[test]
    fn reference_table_is_fixed() {
        let outputs: Vec<(bool, bool, bool)> = TRUTH_TABLE
            .iter()
            .map(|r| (r.inputs.h2po4, r.inputs.pb, r.output))
            .collect();
        assert_eq!(
            outputs,
            [
                (false, false, true),
                (false, true, false),
                (true, false, true),
                (true, true, false)
            ]
        );
    }

    #[test]
    fn measured_table_can_disagree_with_reference() {
        // Threshold below every intensity: the measured gate outputs 1 for
        // every input while the reference table has two zeros.
        let measured = measured_truth_table(&peak(), 10.0);
        assert!(measured.iter().all(|s| s.output));
        for (state, row) in measured.iter().zip(TRUTH_TABLE.iter()) {
            assert_eq!(state.inputs, row.inputs);
        }
        assert_ne!(
            measured.map(|s| s.output),
            TRUTH_TABLE.map(|r| r.output)
        );
    }
}
