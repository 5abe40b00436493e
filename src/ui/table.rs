use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::chart::{ChartSpec, HeatmapChart, SeriesChart};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data table (bottom panel)
// ---------------------------------------------------------------------------

/// Tabular view of exactly what the chart plots.
pub fn chart_table(ui: &mut Ui, chart: &ChartSpec) {
    match chart {
        ChartSpec::Bar(series) | ChartSpec::Scatter(series) => long_table(ui, series),
        ChartSpec::Heatmap(heatmap) => matrix_table(ui, heatmap),
    }
}

fn long_table(ui: &mut Ui, series: &SeriesChart) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for name in [&series.x_field, &series.color_field, &series.y_field] {
                header.col(|ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, series.rows.len(), |mut row| {
                let record = &series.rows[row.index()];
                row.col(|ui| {
                    ui.label(&record.gene);
                });
                row.col(|ui| {
                    ui.label(&record.condition);
                });
                row.col(|ui| {
                    ui.monospace(format!("{:.4}", record.expression));
                });
            });
        });
}

fn matrix_table(ui: &mut Ui, heatmap: &HeatmapChart) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(60.0), heatmap.column_labels.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui| {
                ui.strong(heatmap.y_label.as_str());
            });
            for condition in &heatmap.column_labels {
                header.col(|ui| {
                    ui.strong(condition.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, heatmap.row_labels.len(), |mut row| {
                let idx = row.index();
                row.col(|ui| {
                    ui.label(&heatmap.row_labels[idx]);
                });
                for value in &heatmap.values[idx] {
                    row.col(|ui| {
                        ui.monospace(format!("{value:.4}"));
                    });
                }
            });
        });
}
