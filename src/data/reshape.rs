use serde::{Deserialize, Serialize};

use super::model::{ExpressionDataset, GeneRow};

// ---------------------------------------------------------------------------
// LongRow – one (gene, condition) observation
// ---------------------------------------------------------------------------

/// One observation of the long-form table used by bar and scatter charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    pub gene: String,
    pub condition: String,
    #[serde(with = "missing")]
    pub expression: f64,
}

/// JSON has no `NaN`: missing measurements are written as `null` and read
/// back as `NaN`.
pub mod missing {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    fn to_option(v: f64) -> Option<f64> {
        v.is_finite().then_some(v)
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        to_option(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }

    /// Same mapping for every cell of a matrix.
    pub mod matrix {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            values: &[Vec<f64>],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let cells: Vec<Vec<Option<f64>>> = values
                .iter()
                .map(|row| row.iter().map(|&v| super::to_option(v)).collect())
                .collect();
            cells.serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Vec<f64>>, D::Error> {
            let cells = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
            Ok(cells
                .into_iter()
                .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
                .collect())
        }
    }
}

/// Reshape wide rows into long form.
///
/// Emits `rows.len() × conditions.len()` entries: for each row in order,
/// one entry per condition in the given order.  Conditions the dataset does
/// not know are skipped.
pub fn melt(
    rows: &[&GeneRow],
    conditions: &[String],
    dataset: &ExpressionDataset,
) -> Vec<LongRow> {
    let columns = resolve_columns(conditions, dataset);

    rows.iter()
        .flat_map(|row| {
            columns.iter().map(move |&(name, idx)| LongRow {
                gene: row.gene.clone(),
                condition: name.to_string(),
                expression: cell(row, idx),
            })
        })
        .collect()
}

/// Cell matrix for a heatmap: one line per row, one column per condition.
pub fn matrix(
    rows: &[&GeneRow],
    conditions: &[String],
    dataset: &ExpressionDataset,
) -> Vec<Vec<f64>> {
    let columns = resolve_columns(conditions, dataset);

    rows.iter()
        .map(|row| columns.iter().map(|&(_, idx)| cell(row, idx)).collect())
        .collect()
}

/// Condition names that exist in the dataset, paired with their column index.
pub fn resolve_columns<'a>(
    conditions: &'a [String],
    dataset: &ExpressionDataset,
) -> Vec<(&'a str, usize)> {
    conditions
        .iter()
        .filter_map(|name| {
            dataset
                .condition_index(name)
                .map(|idx| (name.as_str(), idx))
        })
        .collect()
}

/// Short rows read as missing measurements.
fn cell(row: &GeneRow, idx: usize) -> f64 {
    row.values.get(idx).copied().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    fn dataset() -> ExpressionDataset {
        load_reader("Gene,C1,C2,C3\nA,1,2,3\nB,4,5,6\n".as_bytes(), b',').unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn melt_is_gene_major_in_selection_order() {
        let ds = dataset();
        let rows: Vec<&GeneRow> = ds.rows.iter().collect();
        let long = melt(&rows, &names(&["C3", "C1"]), &ds);

        let flat: Vec<(&str, &str, f64)> = long
            .iter()
            .map(|r| (r.gene.as_str(), r.condition.as_str(), r.expression))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("A", "C3", 3.0),
                ("A", "C1", 1.0),
                ("B", "C3", 6.0),
                ("B", "C1", 4.0),
            ]
        );
    }

    #[test]
    fn matrix_copies_raw_values() {
        let ds = dataset();
        let rows: Vec<&GeneRow> = ds.rows.iter().collect();
        let cells = matrix(&rows, &names(&["C2", "C3"]), &ds);
        assert_eq!(cells, vec![vec![2.0, 3.0], vec![5.0, 6.0]]);
    }

    #[test]
    fn unknown_conditions_are_skipped() {
        let ds = dataset();
        let rows: Vec<&GeneRow> = ds.rows.iter().take(1).collect();
        let long = melt(&rows, &names(&["C1", "nope"]), &ds);
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].condition, "C1");
    }
}
