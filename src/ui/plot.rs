use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, VLine};

use dbst_lab::analysis::PeakAnalysis;
use dbst_lab::data::{RawDataset, Series};

use crate::color::{generate_palette, series_color};
use crate::state::SimulatorState;

// ---------------------------------------------------------------------------
// Simulated spectra (central panel of the simulator tab)
// ---------------------------------------------------------------------------

/// One line per sample, y-axis anchored at zero.
pub fn simulator_plot(ui: &mut Ui, sim: &SimulatorState) {
    let colors = generate_palette(sim.curves.len());
    // Leave headroom for enhanced curves.
    let y_top = sim.config.base_amplitude * 4.0 / 3.0;

    Plot::new("simulator_plot")
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Fluorescence Intensity")
        .include_y(0.0)
        .include_y(y_top)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (curve, color) in sim.curves.iter().zip(colors) {
                let points: PlotPoints = curve.points().map(|(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(points).name(&curve.label).color(color).width(1.5));
            }
        });
}

// ---------------------------------------------------------------------------
// Measured spectra with λmax marker
// ---------------------------------------------------------------------------

pub fn dataset_plot(ui: &mut Ui, dataset: &RawDataset, peak: &PeakAnalysis) {
    Plot::new("dataset_plot")
        .legend(Legend::default())
        .height(360.0)
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Fluorescence Intensity")
        .show(ui, |plot_ui| {
            for series in Series::ALL {
                let points: PlotPoints = dataset.points(series).map(|(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(points)
                        .name(series.label())
                        .color(series_color(series))
                        .width(2.0),
                );
            }
            plot_ui.vline(
                VLine::new(peak.lambda_max)
                    .name("λmax")
                    .style(LineStyle::dashed_loose())
                    .width(1.0),
            );
        });
}
