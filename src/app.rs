use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{analyzer, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DbstLabApp {
    pub state: AppState,
}

impl DbstLabApp {
    pub fn new(settings: &dbst_lab::settings::LabSettings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for DbstLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        match self.state.tab {
            Tab::Simulator => {
                egui::SidePanel::left("simulator_panel")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::simulator_panel(ui, &mut self.state.simulator);
                    });
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot::simulator_plot(ui, &self.state.simulator);
                });
            }
            Tab::Analyzer => {
                egui::SidePanel::left("analyzer_panel")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::analyzer_panel(ui, &mut self.state);
                    });
                egui::CentralPanel::default().show(ctx, |ui| {
                    analyzer::analyzer_view(ui, &self.state.analyzer);
                });
            }
            Tab::Lod => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::lod_panel(ui, &mut self.state.lod);
                });
            }
        }
    }
}
