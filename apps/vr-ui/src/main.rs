#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::RegulatorApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let scenario_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Voltage Regulator"),
        ..Default::default()
    };

    eframe::run_native(
        "Voltage Regulator",
        options,
        Box::new(|cc| Ok(Box::new(RegulatorApp::new(cc, scenario_path)))),
    )
}
