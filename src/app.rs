use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{panels, plot};

const PIE_HEIGHT: f32 = 280.0;
const SCATTER_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: heading ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if let Some(pie) = self.state.pie_chart() {
                        plot::pie_chart(ui, pie, PIE_HEIGHT);
                    }
                    ui.separator();
                    if let Some(scatter) = self.state.scatter_chart() {
                        plot::scatter_plot(ui, scatter, &self.state.color_map, SCATTER_HEIGHT);
                    }
                });
        });
    }
}
