use eframe::egui;

use crate::chart::ChartKind;
use crate::config::{APP_DESCRIPTION, APP_TITLE};
use crate::data::model::ExpressionDataset;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GeneDashApp {
    pub state: AppState,
}

impl GeneDashApp {
    /// Start with a dataset already loaded and the given chart kind.
    pub fn new(dataset: ExpressionDataset, kind: ChartKind) -> Self {
        let mut state = AppState::default();
        state.selection.kind = kind;
        state.set_dataset(dataset);
        Self { state }
    }
}

impl eframe::App for GeneDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection controls ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: plotted values ----
        if self.state.show_table {
            if let Some(chart) = &self.state.chart {
                egui::TopBottomPanel::bottom("data_table")
                    .resizable(true)
                    .default_height(220.0)
                    .show(ctx, |ui| {
                        table::chart_table(ui, chart);
                    });
            }
        }

        // ---- Central panel: header and chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(APP_TITLE);
                ui.label(APP_DESCRIPTION);
            });
            ui.separator();
            plot::chart_view(ui, self.state.chart.as_ref(), &self.state.color_map);
        });
    }
}
