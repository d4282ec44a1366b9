use eframe::egui;

use crate::ui::chart::Figure;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// A window showing one figure until it is closed.
pub struct ChartApp {
    pub figure: Figure,
}

impl ChartApp {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: figure title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.figure.title);
                ui.separator();
                ui.label("Close the window to return to the menu");
            });
        });

        // ---- Central panel: plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_plot(ui, &self.figure);
        });
    }
}
