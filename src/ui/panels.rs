use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use dbst_lab::analysis::GATE_DESCRIPTION;
use dbst_lab::lod::format_lod;
use dbst_lab::spectrum::{Ion, ModelPreset};

use crate::state::{AppState, LodState, SimulatorState, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }

        ui.separator();

        if let Some(source) = &state.analyzer.source {
            ui.label(source.as_str());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Simulator side panel
// ---------------------------------------------------------------------------

/// Ion, model and one concentration slider per sample.
pub fn simulator_panel(ui: &mut Ui, sim: &mut SimulatorState) {
    ui.heading("Fluorescence Spectral Simulator");
    ui.separator();

    let mut changed = false;

    ui.strong("Select Ion");
    egui::ComboBox::from_id_salt("ion")
        .selected_text(sim.ion.formula())
        .show_ui(ui, |ui: &mut Ui| {
            for ion in Ion::ALL {
                changed |= ui.selectable_value(&mut sim.ion, ion, ion.formula()).changed();
            }
        });

    ui.strong("Response model");
    let preset_text = sim.preset.map_or("custom (settings file)", ModelPreset::name);
    let mut picked = None;
    egui::ComboBox::from_id_salt("preset")
        .selected_text(preset_text)
        .show_ui(ui, |ui: &mut Ui| {
            for preset in ModelPreset::ALL {
                if ui
                    .selectable_label(sim.preset == Some(preset), preset.name())
                    .clicked()
                {
                    picked = Some(preset);
                }
            }
        });
    if let Some(preset) = picked {
        sim.set_preset(preset);
    }

    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Add Sample").clicked() {
            sim.add_sample();
        }
        if ui
            .add_enabled(sim.concentrations.len() > 1, egui::Button::new("Remove"))
            .clicked()
        {
            sim.remove_sample();
        }
    });

    let max = sim.max_concentration;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, conc) in sim.concentrations.iter_mut().enumerate() {
                ui.label(format!("Concentration for Sample {} (µM)", i + 1));
                changed |= ui
                    .add(egui::Slider::new(conc, 0.0..=max).step_by(1.0))
                    .changed();
            }
        });

    if changed {
        sim.recompute();
    }

    if let Some(err) = &sim.error {
        ui.label(RichText::new(err).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Analyzer side panel
// ---------------------------------------------------------------------------

/// Data upload, digital threshold and gate inputs.
pub fn analyzer_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("1. Data Upload");
    ui.label("CSV: Wavelength, DBST, DBST+H2PO4-, DBST+Pb2+");
    if ui.button("Open dataset…").clicked() {
        open_file_dialog(state);
    }
    ui.separator();

    let analyzer = &mut state.analyzer;
    let Some(analysis) = &analyzer.analysis else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Digital Threshold");
    let range = analysis.threshold_range;
    ui.add(egui::Slider::new(&mut analyzer.threshold, range.min..=range.max));
    ui.separator();

    ui.strong("Molecular Logic Gate");
    ui.label(GATE_DESCRIPTION);
    ui.checkbox(&mut analyzer.inputs.h2po4, "H2PO4- Present");
    ui.checkbox(&mut analyzer.inputs.pb, "Pb2+ Present");
}

// ---------------------------------------------------------------------------
// LOD calculator
// ---------------------------------------------------------------------------

pub fn lod_panel(ui: &mut Ui, lod: &mut LodState) {
    ui.heading("Limit of Detection Calculator");
    ui.separator();

    egui::Grid::new("lod_inputs").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Standard deviation (σ)");
        ui.add(egui::DragValue::new(&mut lod.sigma).speed(0.001).range(0.0..=f64::MAX));
        ui.end_row();

        ui.label("Slope (k)");
        ui.add(egui::DragValue::new(&mut lod.slope).speed(0.01).range(0.0..=f64::MAX));
        ui.end_row();
    });

    ui.add_space(8.0);
    match lod.result() {
        Ok(value) => {
            ui.label(RichText::new(format_lod(value)).color(Color32::LIGHT_GREEN).strong());
        }
        Err(_) => {
            ui.label("Enter a slope greater than zero.");
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open fluorescence dataset")
        .add_filter("Supported files", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        state.apply_load(dbst_lab::data::loader::load_file(&path), source);
    }
}
