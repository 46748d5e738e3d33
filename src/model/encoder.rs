//! Column-wise encoding: one-hot categoricals, pass-through numerics and flags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{CategoricalColumn, FeatureRecord};

/// One-hot encoder fitted over the category values observed during training.
///
/// A schema-valid value that was never observed encodes to an all-zero block
/// instead of failing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CategoricalEncoder {
    columns: Vec<FittedColumn>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct FittedColumn {
    column: CategoricalColumn,
    categories: Vec<String>,
}

impl CategoricalEncoder {
    pub fn fit<'a>(records: impl IntoIterator<Item = &'a FeatureRecord>) -> Self {
        let mut observed = vec![BTreeSet::new(); CategoricalColumn::ALL.len()];
        for record in records {
            for (column, categories) in CategoricalColumn::ALL.into_iter().zip(&mut observed) {
                categories.insert(record.categorical(column));
            }
        }
        let columns = CategoricalColumn::ALL
            .into_iter()
            .zip(observed)
            .map(|(column, categories)| FittedColumn {
                column,
                categories: categories.into_iter().map(String::from).collect(),
            })
            .collect();
        Self { columns }
    }

    /// Encodes the record into the dense feature vector expected by the
    /// regression: one-hot blocks first, then numerics, then flags.
    #[must_use]
    pub fn transform(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.n_features());
        for fitted in &self.columns {
            let value = record.categorical(fitted.column);
            for category in &fitted.categories {
                features.push(if category == value { 1.0 } else { 0.0 });
            }
        }
        features.extend(record.numerics());
        features.extend(record.flags().map(|flag| f64::from(u8::from(flag))));
        features
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        let n_categories: usize = self
            .columns
            .iter()
            .map(|column| column.categories.len())
            .sum();
        n_categories + FeatureRecord::N_NUMERIC + FeatureRecord::N_FLAGS
    }
}
