mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::LoanscopeApp;
use eframe::egui;
use state::DEFAULT_DATA_PATH;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Loanscope – Loan Applicant Dashboard",
        options,
        Box::new(|_cc| {
            let mut app = LoanscopeApp::default();
            // Fixed-path dataset; failure surfaces in the status line and the
            // dashboard stays empty until a file loads.
            app.state.load_from(Path::new(DEFAULT_DATA_PATH));
            Ok(Box::new(app))
        }),
    )
}
