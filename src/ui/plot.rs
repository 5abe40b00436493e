use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use crate::chart::{ChartSpec, HeatmapChart, SeriesChart};
use crate::color::{normalise, sequential, value_range, ColorMap};
use crate::data::reshape::LongRow;

/// Horizontal space shared by all bars of one gene.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Chart view (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn chart_view(ui: &mut Ui, chart: Option<&ChartSpec>, color_map: &ColorMap) {
    let Some(chart) = chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view expression data  (File → Open…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(chart.title());
        if chart.is_empty() {
            ui.weak("No data for the current selection.");
        }
    });

    match chart {
        ChartSpec::Bar(series) => bar_plot(ui, series, color_map),
        ChartSpec::Scatter(series) => scatter_plot(ui, series, color_map),
        ChartSpec::Heatmap(heatmap) => heatmap_plot(ui, heatmap),
    }
}

// ---------------------------------------------------------------------------
// Bar / scatter
// ---------------------------------------------------------------------------

/// Category axis over long rows.  Every source row gets its own x slot, so
/// repeated identifiers sit side by side under the same label instead of
/// stacking on one position.
#[derive(Debug, Clone, PartialEq)]
struct GeneAxis {
    /// Gene name per slot; repeats once per duplicate row.
    labels: Vec<String>,
    /// Slot of each long row, aligned with the input rows.
    slots: Vec<usize>,
}

/// The n-th long row for a (gene, condition) pair belongs to the n-th source
/// row of that gene.  Slots are numbered by first appearance.
fn gene_axis(rows: &[LongRow]) -> GeneAxis {
    let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
    let mut slot_of: HashMap<(&str, usize), usize> = HashMap::new();
    let mut labels: Vec<String> = Vec::new();
    let mut slots = Vec::with_capacity(rows.len());

    for row in rows {
        let occurrence = seen
            .entry((row.gene.as_str(), row.condition.as_str()))
            .or_insert(0);
        let key = (row.gene.as_str(), *occurrence);
        *occurrence += 1;

        let slot = *slot_of.entry(key).or_insert_with(|| {
            labels.push(row.gene.clone());
            labels.len() - 1
        });
        slots.push(slot);
    }

    GeneAxis { labels, slots }
}

/// Distinct conditions in the order they appear in `rows`.
fn condition_groups(rows: &[LongRow]) -> Vec<String> {
    let mut conditions: Vec<String> = Vec::new();
    for row in rows {
        if !conditions.contains(&row.condition) {
            conditions.push(row.condition.clone());
        }
    }
    conditions
}

/// Centre of bar `slot` out of `slots` siblings around x = 0.
fn bar_offset(slot: usize, slots: usize) -> f64 {
    let width = GROUP_WIDTH / slots.max(1) as f64;
    -GROUP_WIDTH / 2.0 + width * (slot as f64 + 0.5)
}

/// x of the bar for condition `group` (out of `groups`) in category `x_slot`.
fn bar_x(x_slot: usize, group: usize, groups: usize) -> f64 {
    x_slot as f64 + bar_offset(group, groups)
}

/// Label integer grid marks with the gene at that position.
fn gene_label(genes: &[String], mark: GridMark) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    genes.get(rounded as usize).cloned().unwrap_or_default()
}

/// Grouped bars: one bar per (gene, condition), siblings side by side.
fn bar_plot(ui: &mut Ui, series: &SeriesChart, color_map: &ColorMap) {
    let axis = gene_axis(&series.rows);
    let groups = condition_groups(&series.rows);
    let width = GROUP_WIDTH / groups.len().max(1) as f64;

    let charts: Vec<BarChart> = groups
        .iter()
        .enumerate()
        .map(|(slot, condition)| {
            let bars: Vec<Bar> = series
                .rows
                .iter()
                .zip(&axis.slots)
                .filter(|(row, _)| &row.condition == condition)
                .map(|(row, &x_slot)| {
                    let x = bar_x(x_slot, slot, groups.len());
                    Bar::new(x, row.expression)
                        .width(width)
                        .name(format!("{} / {}", row.gene, row.condition))
                })
                .collect();
            BarChart::new(bars)
                .name(condition)
                .color(color_map.color_for(condition))
        })
        .collect();

    Plot::new("bar_plot")
        .legend(Legend::default())
        .x_axis_label(series.x_field.clone())
        .y_axis_label(series.y_field.clone())
        .x_axis_formatter(move |mark, _range| gene_label(&axis.labels, mark))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn scatter_plot(ui: &mut Ui, series: &SeriesChart, color_map: &ColorMap) {
    let axis = gene_axis(&series.rows);
    let groups = condition_groups(&series.rows);

    let layers: Vec<Points> = groups
        .iter()
        .map(|condition| {
            let points: PlotPoints = series
                .rows
                .iter()
                .zip(&axis.slots)
                .filter(|(row, _)| &row.condition == condition)
                .map(|(row, &x_slot)| [x_slot as f64, row.expression])
                .collect();
            Points::new(points)
                .name(condition)
                .color(color_map.color_for(condition))
                .radius(5.0)
        })
        .collect();

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(series.x_field.clone())
        .y_axis_label(series.y_field.clone())
        .x_axis_formatter(move |mark, _range| gene_label(&axis.labels, mark))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for points in layers {
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

const ROW_LABEL_WIDTH: f32 = 90.0;
const COLUMN_LABEL_HEIGHT: f32 = 36.0;
const LEGEND_WIDTH: f32 = 90.0;
const LEGEND_STEPS: usize = 48;

fn heatmap_plot(ui: &mut Ui, heatmap: &HeatmapChart) {
    let n_rows = heatmap.row_labels.len();
    let n_cols = heatmap.column_labels.len();
    if n_rows == 0 || n_cols == 0 {
        return;
    }

    let range = value_range(&heatmap.values);
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(12.0);

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let frame = response.rect;

    let grid_width = (frame.width() - ROW_LABEL_WIDTH - LEGEND_WIDTH).max(n_cols as f32);
    let grid_height = (frame.height() - COLUMN_LABEL_HEIGHT).max(n_rows as f32);
    let cell_w = grid_width / n_cols as f32;
    let cell_h = grid_height / n_rows as f32;
    let grid_origin = frame.min + egui::vec2(ROW_LABEL_WIDTH, 0.0);

    // --- Cells ---
    let mut hovered: Option<String> = None;
    for (row, (gene, values)) in heatmap.row_labels.iter().zip(&heatmap.values).enumerate() {
        for (col, (condition, &value)) in heatmap.column_labels.iter().zip(values).enumerate() {
            let cell = Rect::from_min_size(
                grid_origin + egui::vec2(col as f32 * cell_w, row as f32 * cell_h),
                egui::vec2(cell_w, cell_h),
            );
            let color = match range {
                Some(r) if value.is_finite() => sequential(normalise(value, r)),
                _ => Color32::DARK_GRAY,
            };
            painter.rect_filled(cell.shrink(0.5), 0.0, color);

            if response.hover_pos().is_some_and(|p| cell.contains(p)) {
                hovered = Some(format!(
                    "{}: {gene}\n{}: {condition}\n{}: {value:.4}",
                    heatmap.y_label, heatmap.x_label, heatmap.color_label
                ));
            }
        }
    }

    // --- Row labels (genes) ---
    for (row, gene) in heatmap.row_labels.iter().enumerate() {
        let y = grid_origin.y + (row as f32 + 0.5) * cell_h;
        painter.text(
            egui::pos2(grid_origin.x - 6.0, y),
            Align2::RIGHT_CENTER,
            gene,
            font.clone(),
            text_color,
        );
    }

    // --- Column labels (conditions) and axis titles ---
    let label_y = grid_origin.y + grid_height + 4.0;
    for (col, condition) in heatmap.column_labels.iter().enumerate() {
        let x = grid_origin.x + (col as f32 + 0.5) * cell_w;
        painter.text(
            egui::pos2(x, label_y),
            Align2::CENTER_TOP,
            condition,
            font.clone(),
            text_color,
        );
    }
    painter.text(
        egui::pos2(grid_origin.x + grid_width / 2.0, frame.max.y),
        Align2::CENTER_BOTTOM,
        &heatmap.x_label,
        font.clone(),
        text_color,
    );
    painter.text(
        frame.min,
        Align2::LEFT_TOP,
        &heatmap.y_label,
        font.clone(),
        text_color,
    );

    // --- Colour scale ---
    let legend_x = grid_origin.x + grid_width + 16.0;
    let bar_w = 18.0;
    let step_h = grid_height / LEGEND_STEPS as f32;
    for step in 0..LEGEND_STEPS {
        let t = 1.0 - step as f64 / (LEGEND_STEPS - 1) as f64;
        let rect = Rect::from_min_size(
            egui::pos2(legend_x, grid_origin.y + step as f32 * step_h),
            egui::vec2(bar_w, step_h + 0.5),
        );
        painter.rect_filled(rect, 0.0, sequential(t));
    }
    if let Some((lo, hi)) = range {
        painter.text(
            egui::pos2(legend_x + bar_w + 4.0, grid_origin.y),
            Align2::LEFT_TOP,
            format!("{hi:.2}"),
            font.clone(),
            text_color,
        );
        painter.text(
            egui::pos2(legend_x + bar_w + 4.0, grid_origin.y + grid_height),
            Align2::LEFT_BOTTOM,
            format!("{lo:.2}"),
            font.clone(),
            text_color,
        );
    }
    painter.text(
        egui::pos2(legend_x, label_y),
        Align2::LEFT_TOP,
        &heatmap.color_label,
        font,
        text_color,
    );

    if let Some(text) = hovered {
        response.on_hover_text_at_pointer(text);
    }
}
