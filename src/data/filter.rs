use std::collections::BTreeSet;

use super::model::{ExpressionDataset, GeneRow};

// ---------------------------------------------------------------------------
// Gene filter: which rows take part in the chart
// ---------------------------------------------------------------------------

/// Return the rows whose identifier is in `selected_genes`, in file order.
///
/// * Duplicate identifiers in the file yield one entry per row.
/// * Identifiers absent from the dataset match nothing; the result may be
///   empty, which downstream renders as an empty chart.
pub fn filtered_rows<'a>(
    dataset: &'a ExpressionDataset,
    selected_genes: &BTreeSet<String>,
) -> Vec<&'a GeneRow> {
    dataset
        .rows
        .iter()
        .filter(|row| selected_genes.contains(&row.gene))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    fn genes(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_file_order_not_selection_order() {
        let ds = load_reader("Gene,C1\nB,1\nA,2\nC,3\n".as_bytes(), b',').unwrap();
        let rows = filtered_rows(&ds, &genes(&["C", "B"]));
        let ids: Vec<&str> = rows.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[test]
    fn duplicates_are_all_returned() {
        let ds = load_reader("Gene,C1\nA,1\nB,2\nA,3\n".as_bytes(), b',').unwrap();
        assert_eq!(filtered_rows(&ds, &genes(&["A"])).len(), 2);
    }

    #[test]
    fn unknown_gene_matches_nothing() {
        let ds = load_reader("Gene,C1\nA,1\n".as_bytes(), b',').unwrap();
        assert!(filtered_rows(&ds, &genes(&["Z"])).is_empty());
    }
}
