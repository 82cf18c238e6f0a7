mod app;
mod color;
mod state;
mod ui;

use app::DbstLabApp;
use dbst_lab::settings::LabSettings;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = LabSettings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DBST Lab – Molecular Logic Gate Analyzer",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DbstLabApp::new(&settings)))
        }),
    )
}
