use std::sync::Arc;

use crate::chart::{build_chart, ChartKind, ChartSpec, Selection};
use crate::color::ColorMap;
use crate::data::model::ExpressionDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset, read-only once installed.
    pub dataset: Option<Arc<ExpressionDataset>>,

    /// Current gene / condition / chart-kind choices.
    pub selection: Selection,

    /// Chart built from the current selection (cached).
    pub chart: Option<ChartSpec>,

    /// One colour per condition of the dataset.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the data table below the chart is visible.
    pub show_table: bool,

    /// Text typed into the gene search box.
    pub gene_query: String,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the selection to its defaults.
    /// The chart kind survives a reload.
    pub fn set_dataset(&mut self, dataset: ExpressionDataset) {
        let kind = self.selection.kind;
        self.selection = Selection {
            kind,
            ..Selection::initial(&dataset)
        };
        self.color_map = ColorMap::new(&dataset.conditions);
        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
        self.rebuild_chart();
    }

    /// Recompute `chart` after a selection change.
    pub fn rebuild_chart(&mut self) {
        self.chart = self
            .dataset
            .as_deref()
            .map(|ds| build_chart(&self.selection, ds));
    }

    /// Toggle one gene.  The last selected gene cannot be removed.
    /// Returns whether the selection changed.
    pub fn toggle_gene(&mut self, gene: &str) -> bool {
        let genes = &mut self.selection.genes;
        if genes.contains(gene) {
            if genes.len() == 1 {
                return false;
            }
            genes.remove(gene);
        } else {
            genes.insert(gene.to_string());
        }
        log::debug!("Selected genes: {:?}", self.selection.genes);
        self.rebuild_chart();
        true
    }

    /// Toggle one condition.  Newly selected conditions go to the end, so the
    /// order is the order the user picked them in.  The last selected
    /// condition cannot be removed.
    pub fn toggle_condition(&mut self, condition: &str) -> bool {
        let conditions = &mut self.selection.conditions;
        match conditions.iter().position(|c| c == condition) {
            Some(_) if conditions.len() == 1 => return false,
            Some(idx) => {
                conditions.remove(idx);
            }
            None => conditions.push(condition.to_string()),
        }
        log::debug!("Selected conditions: {:?}", self.selection.conditions);
        self.rebuild_chart();
        true
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        if self.selection.kind != kind {
            self.selection.kind = kind;
            log::debug!("Chart kind: {kind}");
            self.rebuild_chart();
        }
    }

    /// Select every gene of the dataset.
    pub fn select_all_genes(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.genes = ds.genes.iter().cloned().collect();
            log::debug!("Selected all {} genes", self.selection.genes.len());
            self.rebuild_chart();
        }
    }

    /// Keep only the first gene of the dataset.
    pub fn select_first_gene(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.genes = ds.genes.first().cloned().into_iter().collect();
            log::debug!("Selected genes: {:?}", self.selection.genes);
            self.rebuild_chart();
        }
    }

    /// Select every condition, keeping already chosen ones in front.
    pub fn select_all_conditions(&mut self) {
        if let Some(ds) = &self.dataset {
            let missing: Vec<String> = ds
                .conditions
                .iter()
                .filter(|c| !self.selection.conditions.contains(c))
                .cloned()
                .collect();
            self.selection.conditions.extend(missing);
            log::debug!("Selected conditions: {:?}", self.selection.conditions);
            self.rebuild_chart();
        }
    }

    /// Keep only the first condition of the dataset.
    pub fn select_first_condition(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.conditions = ds.conditions.first().cloned().into_iter().collect();
            log::debug!("Selected conditions: {:?}", self.selection.conditions);
            self.rebuild_chart();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    fn state() -> AppState {
        let ds = load_reader("Gene,C1,C2,C3\nA,1,2,3\nB,4,5,6\nC,7,8,9\n".as_bytes(), b',')
            .unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds);
        state
    }

    #[test]
    fn loading_applies_defaults_and_builds_chart() {
        let state = state();
        assert_eq!(state.selection.genes.len(), 1);
        assert!(state.selection.genes.contains("A"));
        assert_eq!(state.selection.conditions, vec!["C1"]);
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.kind(), ChartKind::Bar);
        assert_eq!(chart.point_count(), 1);
    }

    #[test]
    fn last_gene_cannot_be_deselected() {
        let mut state = state();
        assert!(!state.toggle_gene("A"));
        assert!(state.selection.genes.contains("A"));

        assert!(state.toggle_gene("B"));
        assert!(state.toggle_gene("A"));
        assert_eq!(state.selection.genes.iter().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn conditions_keep_pick_order() {
        let mut state = state();
        state.toggle_condition("C3");
        state.toggle_condition("C2");
        assert_eq!(state.selection.conditions, vec!["C1", "C3", "C2"]);

        state.toggle_condition("C1");
        assert_eq!(state.selection.conditions, vec!["C3", "C2"]);
    }

    #[test]
    fn last_condition_cannot_be_deselected() {
        let mut state = state();
        assert!(!state.toggle_condition("C1"));
        assert_eq!(state.selection.conditions, vec!["C1"]);
    }

    #[test]
    fn every_change_rebuilds_the_chart() {
        let mut state = state();
        state.select_all_genes();
        state.select_all_conditions();
        assert_eq!(state.chart.as_ref().unwrap().point_count(), 9);

        state.set_kind(ChartKind::Heatmap);
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.kind(), ChartKind::Heatmap);
        assert_eq!(chart.point_count(), 9);

        state.select_first_gene();
        state.select_first_condition();
        assert_eq!(state.chart.as_ref().unwrap().point_count(), 1);
    }

    #[test]
    fn select_all_conditions_keeps_existing_order_first() {
        let mut state = state();
        state.toggle_condition("C3");
        state.select_all_conditions();
        assert_eq!(state.selection.conditions, vec!["C1", "C3", "C2"]);
    }

    #[test]
    fn repeated_condition_header_stays_plottable() {
        let ds = load_reader("Gene,C1,C1\nA,1,2\n".as_bytes(), b',').unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds);
        state.select_all_conditions();
        assert_eq!(state.selection.conditions, vec!["C1", "C1.1"]);

        state.set_kind(ChartKind::Heatmap);
        match state.chart.as_ref().unwrap() {
            ChartSpec::Heatmap(h) => assert_eq!(h.values, vec![vec![1.0, 2.0]]),
            other => panic!("expected heatmap, got {:?}", other.kind()),
        }
    }

    #[test]
    fn reload_keeps_chart_kind() {
        let mut state = state();
        state.set_kind(ChartKind::Scatter);
        let ds = load_reader("Gene,X\nQ,1\n".as_bytes(), b',').unwrap();
        state.set_dataset(ds);
        assert_eq!(state.selection.kind, ChartKind::Scatter);
        assert_eq!(state.selection.conditions, vec!["X"]);
        assert_eq!(state.chart.as_ref().unwrap().kind(), ChartKind::Scatter);
    }
}
