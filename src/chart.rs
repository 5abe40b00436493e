use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::filter::filtered_rows;
use crate::data::model::ExpressionDataset;
use crate::data::reshape::{matrix, melt, resolve_columns, LongRow};

pub const BAR_TITLE: &str = "Expression of Selected Genes under Selected Conditions";
pub const SCATTER_TITLE: &str = "Scatter Plot of Selected Genes under Selected Conditions";
pub const HEATMAP_TITLE: &str = "Heatmap of Gene Expression Levels";

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Scatter,
    Heatmap,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown chart kind '{0}' (expected bar, scatter or heatmap)")]
pub struct UnknownChartKind(pub String);

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Scatter, ChartKind::Heatmap];

    /// Label shown next to the radio button.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Heatmap => "Heatmap",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownChartKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Selection – the three user controls
// ---------------------------------------------------------------------------

/// Snapshot of the user's choices.  `conditions` keeps display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub genes: BTreeSet<String>,
    pub conditions: Vec<String>,
    pub kind: ChartKind,
}

impl Selection {
    /// First gene, first condition, bar chart.
    pub fn initial(dataset: &ExpressionDataset) -> Self {
        Selection {
            genes: dataset.genes.first().cloned().into_iter().collect(),
            conditions: dataset.conditions.first().cloned().into_iter().collect(),
            kind: ChartKind::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChartSpec – framework-agnostic chart description
// ---------------------------------------------------------------------------

/// Bar and scatter charts share one field mapping over long rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChart {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub color_field: String,
    pub rows: Vec<LongRow>,
}

/// `values[i][j]` is row `row_labels[i]` under condition `column_labels[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    #[serde(with = "crate::data::reshape::missing::matrix")]
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Bar(SeriesChart),
    Scatter(SeriesChart),
    Heatmap(HeatmapChart),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Bar(_) => ChartKind::Bar,
            ChartSpec::Scatter(_) => ChartKind::Scatter,
            ChartSpec::Heatmap(_) => ChartKind::Heatmap,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(c) | ChartSpec::Scatter(c) => &c.title,
            ChartSpec::Heatmap(h) => &h.title,
        }
    }

    /// Number of plotted (gene, condition) values.
    pub fn point_count(&self) -> usize {
        match self {
            ChartSpec::Bar(c) | ChartSpec::Scatter(c) => c.rows.len(),
            ChartSpec::Heatmap(h) => h.values.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

// ---------------------------------------------------------------------------
// build_chart – selection → chart description
// ---------------------------------------------------------------------------

/// Turn the current selection into a chart description.
///
/// Pure: reads the dataset, never mutates it, never fails.  An unknown or
/// absent gene produces an empty chart rather than an error.
pub fn build_chart(selection: &Selection, dataset: &ExpressionDataset) -> ChartSpec {
    build_chart_from(
        &selection.genes,
        &selection.conditions,
        selection.kind,
        dataset,
    )
}

pub fn build_chart_from(
    genes: &BTreeSet<String>,
    conditions: &[String],
    kind: ChartKind,
    dataset: &ExpressionDataset,
) -> ChartSpec {
    let rows = filtered_rows(dataset, genes);

    match kind {
        ChartKind::Bar => ChartSpec::Bar(series(BAR_TITLE, melt(&rows, conditions, dataset))),
        ChartKind::Scatter => {
            ChartSpec::Scatter(series(SCATTER_TITLE, melt(&rows, conditions, dataset)))
        }
        ChartKind::Heatmap => ChartSpec::Heatmap(HeatmapChart {
            title: HEATMAP_TITLE.to_string(),
            x_label: "Conditions".to_string(),
            y_label: "Genes".to_string(),
            color_label: "Expression Level".to_string(),
            row_labels: rows.iter().map(|row| row.gene.clone()).collect(),
            column_labels: resolve_columns(conditions, dataset)
                .into_iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            values: matrix(&rows, conditions, dataset),
        }),
    }
}

fn series(title: &str, rows: Vec<LongRow>) -> SeriesChart {
    SeriesChart {
        title: title.to_string(),
        x_field: "Gene".to_string(),
        y_field: "Expression".to_string(),
        color_field: "Condition".to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    fn dataset() -> ExpressionDataset {
        load_reader("Gene,C1,C2\nA,1.0,2.0\nB,3.0,4.0\n".as_bytes(), b',').unwrap()
    }

    fn selection(genes: &[&str], conditions: &[&str], kind: ChartKind) -> Selection {
        Selection {
            genes: genes.iter().map(|s| s.to_string()).collect(),
            conditions: conditions.iter().map(|s| s.to_string()).collect(),
            kind,
        }
    }

    fn long_rows(spec: &ChartSpec) -> &[LongRow] {
        match spec {
            ChartSpec::Bar(c) | ChartSpec::Scatter(c) => &c.rows,
            ChartSpec::Heatmap(_) => panic!("heatmap has no long rows"),
        }
    }

    fn heatmap(spec: &ChartSpec) -> &HeatmapChart {
        match spec {
            ChartSpec::Heatmap(h) => h,
            other => panic!("expected heatmap, got {:?}", other.kind()),
        }
    }

    #[test]
    fn bar_for_one_gene_two_conditions() {
        let spec = build_chart(&selection(&["A"], &["C1", "C2"], ChartKind::Bar), &dataset());
        assert_eq!(spec.kind(), ChartKind::Bar);
        assert_eq!(
            long_rows(&spec),
            &[
                LongRow {
                    gene: "A".into(),
                    condition: "C1".into(),
                    expression: 1.0
                },
                LongRow {
                    gene: "A".into(),
                    condition: "C2".into(),
                    expression: 2.0
                },
            ]
        );
        assert_eq!(spec.title(), BAR_TITLE);
    }

    #[test]
    fn heatmap_for_two_genes_one_condition() {
        let spec = build_chart(
            &selection(&["A", "B"], &["C1"], ChartKind::Heatmap),
            &dataset(),
        );
        let h = heatmap(&spec);
        assert_eq!(h.values, vec![vec![1.0], vec![3.0]]);
        assert_eq!(h.row_labels, vec!["A", "B"]);
        assert_eq!(h.column_labels, vec!["C1"]);
        assert_eq!(h.x_label, "Conditions");
        assert_eq!(h.y_label, "Genes");
        assert_eq!(h.color_label, "Expression Level");
        assert_eq!(h.title, HEATMAP_TITLE);
    }

    #[test]
    fn absent_gene_gives_empty_chart() {
        for kind in ChartKind::ALL {
            let spec = build_chart(&selection(&["Z"], &["C1", "C2"], kind), &dataset());
            assert!(spec.is_empty(), "{kind} should be empty");
            assert_eq!(spec.kind(), kind);
        }
    }

    #[test]
    fn series_size_is_rows_times_conditions() {
        let ds =
            load_reader("Gene,C1,C2,C3\nA,1,2,3\nB,4,5,6\nA,7,8,9\n".as_bytes(), b',').unwrap();
        let spec = build_chart(
            &selection(&["A", "B"], &["C1", "C3"], ChartKind::Scatter),
            &ds,
        );
        assert_eq!(spec.point_count(), 3 * 2);
        assert_eq!(spec.title(), SCATTER_TITLE);
        match &spec {
            ChartSpec::Scatter(c) => {
                assert_eq!(c.x_field, "Gene");
                assert_eq!(c.y_field, "Expression");
                assert_eq!(c.color_field, "Condition");
            }
            other => panic!("expected scatter, got {:?}", other.kind()),
        }
    }

    #[test]
    fn heatmap_repeats_duplicate_genes() {
        let ds = load_reader("Gene,C1\nA,1\nB,2\nA,3\n".as_bytes(), b',').unwrap();
        let spec = build_chart(&selection(&["A"], &["C1"], ChartKind::Heatmap), &ds);
        let h = heatmap(&spec);
        assert_eq!(h.row_labels, vec!["A", "A"]);
        assert_eq!(h.values, vec![vec![1.0], vec![3.0]]);
    }

    #[test]
    fn condition_order_drives_columns_and_groups() {
        let ds = dataset();
        let forward = selection(&["A", "B"], &["C1", "C2"], ChartKind::Heatmap);
        let reverse = selection(&["A", "B"], &["C2", "C1"], ChartKind::Heatmap);

        let f = build_chart(&forward, &ds);
        let r = build_chart(&reverse, &ds);
        let (f, r) = (heatmap(&f), heatmap(&r));
        assert_eq!(r.column_labels, vec!["C2", "C1"]);
        for (frow, rrow) in f.values.iter().zip(&r.values) {
            assert_eq!(frow[0], rrow[1]);
            assert_eq!(frow[1], rrow[0]);
        }

        let bar = build_chart(
            &Selection {
                kind: ChartKind::Bar,
                ..reverse
            },
            &ds,
        );
        let order: Vec<&str> = long_rows(&bar)
            .iter()
            .filter(|r| r.gene == "A")
            .map(|r| r.condition.as_str())
            .collect();
        assert_eq!(order, vec!["C2", "C1"]);
    }

    #[test]
    fn building_twice_is_identical() {
        let ds = dataset();
        for kind in ChartKind::ALL {
            let sel = selection(&["A", "B"], &["C2", "C1"], kind);
            assert_eq!(build_chart(&sel, &ds), build_chart(&sel, &ds));
        }
    }

    #[test]
    fn initial_selection_uses_first_gene_and_condition() {
        let sel = Selection::initial(&dataset());
        assert_eq!(sel.genes.iter().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(sel.conditions, vec!["C1"]);
        assert_eq!(sel.kind, ChartKind::Bar);
    }

    #[test]
    fn chart_kind_parses_case_insensitively() {
        assert_eq!("Heatmap".parse::<ChartKind>(), Ok(ChartKind::Heatmap));
        assert_eq!(" bar ".parse::<ChartKind>(), Ok(ChartKind::Bar));
        assert_eq!(
            "pie".parse::<ChartKind>(),
            Err(UnknownChartKind("pie".to_string()))
        );
    }

    #[test]
    fn spec_serializes_with_kind_tag() {
        let spec = build_chart(&selection(&["A"], &["C1"], ChartKind::Bar), &dataset());
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["rows"][0]["expression"], 1.0);
    }
}
