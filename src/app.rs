use eframe::egui;

use crate::config::Config;
use crate::state::{AppState, Page};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("navigation")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::navigation(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.dataset_loaded() {
                panels::not_loaded(ui, &self.state);
                return;
            }
            match self.state.page {
                Page::Introduction => panels::introduction(ui, &self.state),
                Page::TestsOverTime => panels::tests_over_time(ui, &mut self.state),
                Page::TestLocations => panels::test_locations(ui, &mut self.state),
                Page::TestsByPurpose => panels::tests_by_purpose(ui, &mut self.state),
            }
        });
    }
}
