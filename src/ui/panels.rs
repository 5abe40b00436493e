use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartKind;
use crate::data::model::ExpressionDataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Chart type ----
    ui.strong("Select Graph Type:");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for kind in ChartKind::ALL {
            if ui.radio(state.selection.kind == kind, kind.label()).clicked() {
                state.set_kind(kind);
            }
        }
    });
    ui.separator();

    // ---- Genes ----
    let n_genes = state.selection.genes.len();
    ui.strong(format!("Select Genes:  ({n_genes}/{})", dataset.genes.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_genes();
        }
        if ui.small_button("First").clicked() {
            state.select_first_gene();
        }
        ui.add(
            egui::TextEdit::singleline(&mut state.gene_query)
                .hint_text("Search…")
                .desired_width(f32::INFINITY),
        );
    });

    let query = state.gene_query.trim().to_lowercase();
    ScrollArea::vertical()
        .id_salt("gene_list")
        .max_height(ui.available_height() * 0.5)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for gene in &dataset.genes {
                if !query.is_empty() && !gene.to_lowercase().contains(&query) {
                    continue;
                }
                let label = match dataset.row_count(gene) {
                    n if n > 1 => format!("{gene}  (×{n})"),
                    _ => gene.clone(),
                };
                let mut checked = state.selection.genes.contains(gene);
                let response = ui.checkbox(&mut checked, label);
                if response.changed() {
                    state.toggle_gene(gene);
                }
                response.on_hover_ui(|ui: &mut Ui| gene_values(ui, &dataset, gene));
            }
        });
    ui.separator();

    // ---- Conditions ----
    let n_conditions = state.selection.conditions.len();
    ui.strong(format!(
        "Select Conditions:  ({n_conditions}/{})",
        dataset.conditions.len()
    ));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_conditions();
        }
        if ui.small_button("First").clicked() {
            state.select_first_condition();
        }
    });

    ScrollArea::vertical()
        .id_salt("condition_list")
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for condition in &dataset.conditions {
                let position = state
                    .selection
                    .conditions
                    .iter()
                    .position(|c| c == condition);

                // Selection order is display order, so show it.
                let label = match position {
                    Some(pos) => format!("{condition}  #{}", pos + 1),
                    None => condition.clone(),
                };
                let text = RichText::new(label).color(state.color_map.color_for(condition));

                let mut checked = position.is_some();
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_condition(condition);
                }
            }
        });
}

/// Hover card listing every row of one gene under every condition.
fn gene_values(ui: &mut Ui, dataset: &ExpressionDataset, gene: &str) {
    for row in dataset.rows_for(gene) {
        ui.strong(&row.gene);
        for condition in &dataset.conditions {
            let value = dataset.value(row, condition).unwrap_or(f64::NAN);
            ui.monospace(format!("{condition}: {value:.2}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.chart.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export chart spec…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let plotted = state.chart.as_ref().map_or(0, |c| c.point_count());
            ui.label(format!(
                "{} genes × {} conditions loaded, {plotted} values plotted",
                ds.genes.len(),
                ds.conditions.len(),
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Data Table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open expression table")
        .add_filter("Supported files", &["csv", "tsv", "tab"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows ({} genes) with conditions {:?}",
                    dataset.len(),
                    dataset.genes.len(),
                    dataset.conditions
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let Some(chart) = &state.chart else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export chart spec")
        .add_filter("JSON", &["json"])
        .set_file_name(format!("{}_chart.json", chart.kind()))
        .save_file();

    if let Some(path) = file {
        match crate::export::export_to_path(chart, &path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export chart: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
