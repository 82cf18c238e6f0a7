use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use dbst_lab::analysis::{DatasetAnalysis, DigitalOutput, LogicGateState, TRUTH_TABLE};
use dbst_lab::data::{RawDataset, Series};

use crate::color::bit_color;
use crate::state::AnalyzerState;
use crate::ui::plot::dataset_plot;

const PREVIEW_ROWS: usize = 5;

fn bit(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Label above a large value, like a dashboard tile.
fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Analyzer central panel
// ---------------------------------------------------------------------------

pub fn analyzer_view(ui: &mut Ui, state: &AnalyzerState) {
    let (Some(dataset), Some(analysis)) = (&state.dataset, &state.analysis) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to analyse  (File → Open dataset…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            peak_section(ui, dataset, analysis);
            ui.separator();
            metrics_section(ui, analysis);
            ui.separator();

            let digital = analysis.digital(state.threshold);
            digital_section(ui, analysis, &digital, state.threshold);
            ui.separator();

            let gate = analysis.gate(state.inputs, state.threshold);
            gate_section(ui, &gate);
            ui.separator();

            truth_table_section(ui, analysis, state.threshold);
            ui.separator();

            ui.heading("8. Scientific Interpretation");
            ui.label(analysis.interpretation());
        });
}

fn peak_section(ui: &mut Ui, dataset: &RawDataset, analysis: &DatasetAnalysis) {
    let peak = &analysis.peak;
    ui.heading("1. Data Preview");
    ui.label(format!("{} rows", dataset.len()));
    egui::Grid::new("data_preview")
        .striped(true)
        .num_columns(4)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Wavelength (nm)");
            for series in Series::ALL {
                ui.strong(series.label());
            }
            ui.end_row();
            for row in dataset.head(PREVIEW_ROWS) {
                for value in row {
                    ui.label(format!("{value:.2}"));
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.heading("2. Peak Analysis");
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "λmax (nm)", format!("{:.2}", peak.lambda_max));
        metric(&mut cols[1], "DBST Intensity", format!("{:.2}", peak.baseline));
        metric(&mut cols[2], "H2PO4- Intensity", format!("{:.2}", peak.h2po4));
    });

    ui.add_space(8.0);
    ui.heading("3. Spectral Visualization");
    dataset_plot(ui, dataset, peak);
}

fn metrics_section(ui: &mut Ui, analysis: &DatasetAnalysis) {
    ui.heading("4. Analytical Parameters");
    match &analysis.metrics {
        Ok(m) => {
            ui.columns(2, |cols: &mut [Ui]| {
                metric(
                    &mut cols[0],
                    "Enhancement Factor (EF)",
                    format!("{:.3}", m.enhancement_factor),
                );
                metric(
                    &mut cols[1],
                    "Quenching Efficiency (QE)",
                    format!("{:.3}", m.quenching_efficiency),
                );
            });
        }
        Err(e) => {
            ui.colored_label(egui::Color32::YELLOW, e.to_string());
        }
    }
}

fn digital_section(ui: &mut Ui, analysis: &DatasetAnalysis, digital: &DigitalOutput, threshold: f64) {
    ui.heading("5. Digital Fluorescence Conversion");
    ui.label(format!("Threshold: {threshold:.2}"));

    ui.push_id("digital_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("System");
                });
                header.col(|ui| {
                    ui.strong("Intensity at λmax");
                });
                header.col(|ui| {
                    ui.strong("Digital Output");
                });
            })
            .body(|mut body| {
                for row in digital.rows(&analysis.peak) {
                    body.row(18.0, |mut tr| {
                        tr.col(|ui| {
                            ui.label(row.series.label());
                        });
                        tr.col(|ui| {
                            ui.label(format!("{:.2}", row.intensity));
                        });
                        tr.col(|ui| {
                            ui.colored_label(bit_color(row.bit), bit(row.bit));
                        });
                    });
                }
            });
    });
}

fn gate_section(ui: &mut Ui, gate: &LogicGateState) {
    ui.heading("6. Molecular Logic Gate Simulation");
    ui.label(format!(
        "Inputs: H2PO4- = {}, Pb2+ = {}  →  {}",
        bit(gate.inputs.h2po4),
        bit(gate.inputs.pb),
        gate.active_series.label()
    ));
    ui.label(format!("Output Intensity: {:.2}", gate.active_intensity));
    ui.label(
        RichText::new(format!("Digital Output: {}", bit(gate.output)))
            .color(bit_color(gate.output))
            .strong(),
    );
}

/// Reference table next to what the loaded data gives at `threshold`.
fn truth_table_section(ui: &mut Ui, analysis: &DatasetAnalysis, threshold: f64) {
    ui.heading("7. Truth Table");
    let measured = analysis.measured_truth_table(threshold);
    egui::Grid::new("truth_table")
        .striped(true)
        .num_columns(4)
        .show(ui, |ui: &mut Ui| {
            ui.strong("H2PO4-");
            ui.strong("Pb2+");
            ui.strong("Fluorescence Output");
            ui.strong("Measured Output");
            ui.end_row();
            for (row, state) in TRUTH_TABLE.iter().zip(measured.iter()) {
                ui.label(bit(row.inputs.h2po4));
                ui.label(bit(row.inputs.pb));
                ui.label(bit(row.output));
                ui.colored_label(bit_color(state.output), bit(state.output));
                ui.end_row();
            }
        });
}
