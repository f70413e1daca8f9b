// GUI-subsystem binary: no console window is allocated on Windows.
#![windows_subsystem = "windows"]

mod app;

use app::ObscuraApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Initialize session log (overwrites previous session log)
    obscura::logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Obscura"),
        ..Default::default()
    };

    eframe::run_native(
        "Obscura",
        options,
        Box::new(|cc| Box::new(ObscuraApp::new(cc))),
    )
}
