use std::collections::HashMap;

// ---------------------------------------------------------------------------
// GeneRow – one row of the expression table
// ---------------------------------------------------------------------------

/// A single gene (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRow {
    /// Identifier from the `Gene` column.
    pub gene: String,
    /// Expression values, aligned with [`ExpressionDataset::conditions`].
    pub values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// ExpressionDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionDataset {
    /// All rows in file order. Identifiers may repeat.
    pub rows: Vec<GeneRow>,
    /// Condition column names in header order.
    pub conditions: Vec<String>,
    /// Distinct identifiers in order of first appearance.
    pub genes: Vec<String>,
    /// Number of rows per identifier.
    row_counts: HashMap<String, usize>,
}

impl ExpressionDataset {
    /// Build the distinct-gene index and per-gene row counts.
    pub fn from_rows(conditions: Vec<String>, rows: Vec<GeneRow>) -> Self {
        let mut genes: Vec<String> = Vec::new();
        let mut row_counts: HashMap<String, usize> = HashMap::new();
        for row in &rows {
            let count = row_counts.entry(row.gene.clone()).or_insert(0);
            if *count == 0 {
                genes.push(row.gene.clone());
            }
            *count += 1;
        }

        ExpressionDataset {
            rows,
            conditions,
            genes,
            row_counts,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position of a condition, if the dataset has it.
    pub fn condition_index(&self, condition: &str) -> Option<usize> {
        self.conditions.iter().position(|c| c == condition)
    }

    /// Value of `row` under `condition`.
    pub fn value(&self, row: &GeneRow, condition: &str) -> Option<f64> {
        self.condition_index(condition)
            .and_then(|idx| row.values.get(idx).copied())
    }

    /// How many rows carry the given identifier.
    pub fn row_count(&self, gene: &str) -> usize {
        self.row_counts.get(gene).copied().unwrap_or(0)
    }

    /// All rows carrying the given identifier, in file order.
    pub fn rows_for<'a>(&'a self, gene: &'a str) -> impl Iterator<Item = &'a GeneRow> + 'a {
        self.rows.iter().filter(move |row| row.gene == gene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gene: &str, values: &[f64]) -> GeneRow {
        GeneRow {
            gene: gene.to_string(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn distinct_genes_keep_first_appearance_order() {
        let ds = ExpressionDataset::from_rows(
            vec!["C1".into()],
            vec![row("B", &[1.0]), row("A", &[2.0]), row("B", &[3.0])],
        );
        assert_eq!(ds.genes, vec!["B".to_string(), "A".to_string()]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn rows_for_returns_every_duplicate() {
        let ds = ExpressionDataset::from_rows(
            vec!["C1".into()],
            vec![row("B", &[1.0]), row("A", &[2.0]), row("B", &[3.0])],
        );
        let values: Vec<f64> = ds.rows_for("B").map(|r| r.values[0]).collect();
        assert_eq!(values, vec![1.0, 3.0]);
        assert_eq!(ds.rows_for("Z").count(), 0);
    }

    #[test]
    fn row_counts_are_indexed_at_build_time() {
        let ds = ExpressionDataset::from_rows(
            vec!["C1".into()],
            vec![row("B", &[1.0]), row("A", &[2.0]), row("B", &[3.0])],
        );
        assert_eq!(ds.row_count("B"), 2);
        assert_eq!(ds.row_count("A"), 1);
        assert_eq!(ds.row_count("Z"), 0);
        assert!(!ds.is_empty());
        assert!(ExpressionDataset::from_rows(vec!["C1".into()], Vec::new()).is_empty());
    }

    #[test]
    fn value_lookup_by_condition_name() {
        let ds = ExpressionDataset::from_rows(
            vec!["C1".into(), "C2".into()],
            vec![row("A", &[1.0, 2.0])],
        );
        assert_eq!(ds.value(&ds.rows[0], "C2"), Some(2.0));
        assert_eq!(ds.value(&ds.rows[0], "C9"), None);
    }
}
