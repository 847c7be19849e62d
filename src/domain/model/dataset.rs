//! Dataset Processor - labeled records to training vectors.
//!
//! Records are string-keyed rows as produced by any tabular reader. Fitting
//! walks the rows twice:
//!
//! 1. Collect valid rows and accumulate sums and sums of squares of every
//!    continuous field.
//! 2. Re-apply the same validity filter, normalize continuous fields with the
//!    pass-1 statistics and encode categorical fields through the shared
//!    vocabulary.
//!
//! A row is valid when every continuous field of the layout parses as a
//! positive finite number and every categorical column plus the label column
//! is present and non-empty. Invalid rows are dropped; only their count is
//! reported.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;

use super::encoder::{FeatureEncoder, FeatureLayout, FeatureSource, FieldStats, NormalizationStats};
use super::vocabulary::{CategoricalField, ContinuousField};

/// Column holding the diagnosis label (`Yes` = 1, anything else = 0).
pub const LABEL_COLUMN: &str = "Diabetes";

/// One raw dataset row keyed by column name.
pub type RawRecord = BTreeMap<String, String>;

/// Errors reading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dataset must be a JSON array of objects (record {index} is not an object)")]
    InvalidRecord { index: usize },
}

/// Aggregate counts from a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub positive_rows: usize,
    /// Share of valid rows labeled positive.
    pub prevalence: f64,
}

/// Output of [`DatasetProcessor::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedDataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
    pub stats: NormalizationStats,
    pub summary: DatasetSummary,
}

/// A row that passed the validity filter.
struct ValidRow<'a> {
    record: &'a RawRecord,
    continuous: BTreeMap<ContinuousField, f64>,
    label: f64,
}

impl FeatureSource for ValidRow<'_> {
    fn continuous(&self, field: ContinuousField) -> Option<f64> {
        self.continuous.get(&field).copied()
    }

    fn categorical(&self, field: CategoricalField) -> Option<&str> {
        self.record.get(field.column()).map(|v| v.trim())
    }
}

#[derive(Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    sum_squares: f64,
}

/// Turns raw records into classifier inputs for one layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetProcessor {
    layout: FeatureLayout,
}

impl DatasetProcessor {
    pub fn new(layout: FeatureLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    /// Two-pass fit: statistics, then normalized encoding.
    pub fn fit(&self, rows: &[RawRecord]) -> FittedDataset {
        // Pass 1: statistics over valid rows.
        let mut accumulators: BTreeMap<ContinuousField, Accumulator> = BTreeMap::new();
        let mut valid_rows = 0usize;
        for row in rows.iter().filter_map(|r| self.validate(r)) {
            valid_rows += 1;
            for (field, value) in &row.continuous {
                let acc = accumulators.entry(*field).or_default();
                acc.sum += value;
                acc.sum_squares += value * value;
            }
        }

        let mut stats = NormalizationStats::new();
        for field in self.layout.continuous_fields() {
            let acc = accumulators.get(&field).copied().unwrap_or_default();
            stats.insert(field, field_stats(acc, valid_rows));
        }

        // Pass 2: same filter, normalized encoding.
        let encoder = FeatureEncoder::with_stats(self.layout, stats.clone());
        let mut features = Vec::with_capacity(valid_rows);
        let mut labels = Vec::with_capacity(valid_rows);
        for row in rows.iter().filter_map(|r| self.validate(r)) {
            features.push(encoder.encode(&row).into_inner());
            labels.push(row.label);
        }

        let positive_rows = labels.iter().filter(|&&y| y == 1.0).count();
        let summary = DatasetSummary {
            valid_rows: features.len(),
            invalid_rows: rows.len() - features.len(),
            positive_rows,
            prevalence: if features.is_empty() {
                0.0
            } else {
                positive_rows as f64 / features.len() as f64
            },
        };

        info!(
            valid_rows = summary.valid_rows,
            invalid_rows = summary.invalid_rows,
            prevalence = summary.prevalence,
            layout = ?self.layout,
            "Dataset fitted"
        );

        FittedDataset {
            features,
            labels,
            stats,
            summary,
        }
    }

    fn validate<'a>(&self, record: &'a RawRecord) -> Option<ValidRow<'a>> {
        let mut continuous = BTreeMap::new();
        for field in self.layout.continuous_fields() {
            let value = record
                .get(field.column())
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)?;
            continuous.insert(field, value);
        }

        let all_present = CategoricalField::ALL
            .iter()
            .map(|f| f.column())
            .chain(std::iter::once(LABEL_COLUMN))
            .all(|column| record.get(column).is_some_and(|v| !v.trim().is_empty()));
        if !all_present {
            return None;
        }

        let label = record.get(LABEL_COLUMN).map(|v| parse_label(v))?;
        Some(ValidRow {
            record,
            continuous,
            label,
        })
    }
}

fn parse_label(value: &str) -> f64 {
    let value = value.trim();
    if value.eq_ignore_ascii_case("yes") || value == "1" {
        1.0
    } else {
        0.0
    }
}

/// Population mean and standard deviation from running sums.
fn field_stats(acc: Accumulator, count: usize) -> FieldStats {
    if count == 0 {
        return FieldStats::new(0.0, 1.0);
    }
    let n = count as f64;
    let mean = acc.sum / n;
    let variance = (acc.sum_squares / n - mean * mean).max(0.0);
    FieldStats::new(mean, variance.sqrt())
}

/// Parses a JSON array of flat objects into records.
///
/// String, number and boolean values are kept as text; `null` leaves the
/// column absent.
pub fn parse_records(json: &str) -> Result<Vec<RawRecord>, DatasetError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(column, v)| {
                    let text = match v {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => n.to_string(),
                        serde_json::Value::Bool(b) => b.to_string(),
                        _ => return None,
                    };
                    Some((column, text))
                })
                .collect()),
            _ => Err(DatasetError::InvalidRecord { index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn row(age: &str, bmi: &str, diabetes: &str) -> RawRecord {
        record(&[
            ("Age", age),
            ("Gender", "Male"),
            ("BMI", bmi),
            ("Family_History", "Yes"),
            ("Physical_Activity", "Low"),
            ("Diet_Type", "Non-Vegetarian"),
            ("Smoking_Status", "Current"),
            ("Alcohol_Intake", "High"),
            ("Stress_Level", "High"),
            ("Hypertension", "No"),
            ("Diabetes", diabetes),
        ])
    }

    #[test]
    fn fit_drops_invalid_rows_and_counts_them() {
        let mut missing_gender = row("50", "30", "Yes");
        missing_gender.remove("Gender");
        let rows = vec![
            row("40", "20", "Yes"),
            row("60", "30", "No"),
            row("abc", "25", "Yes"),
            row("0", "25", "Yes"),
            row("45", "", "No"),
            missing_gender,
        ];

        let fitted = DatasetProcessor::new(FeatureLayout::Basic).fit(&rows);

        assert_eq!(fitted.summary.valid_rows, 2);
        assert_eq!(fitted.summary.invalid_rows, 4);
        assert_eq!(fitted.features.len(), 2);
        assert_eq!(fitted.labels, vec![1.0, 0.0]);
        assert_eq!(fitted.summary.prevalence, 0.5);
    }

    #[test]
    fn fit_normalizes_with_population_statistics() {
        let rows = vec![row("40", "20", "Yes"), row("60", "30", "No")];
        let fitted = DatasetProcessor::new(FeatureLayout::Basic).fit(&rows);

        let age = fitted.stats.get(ContinuousField::Age).unwrap();
        assert_eq!(age.mean, 50.0);
        assert_eq!(age.std, 10.0);
        assert_eq!(fitted.features[0][0], -1.0);
        assert_eq!(fitted.features[1][0], 1.0);
        assert_eq!(fitted.features[0][2], -1.0);
    }

    #[test]
    fn fit_encodes_categoricals_through_vocabulary() {
        let fitted = DatasetProcessor::new(FeatureLayout::Basic).fit(&[row("40", "20", "Yes")]);
        // Gender, BMI (constant, so 0), family, activity, diet, smoking, alcohol, stress, hypertension
        assert_eq!(
            &fitted.features[0][1..],
            &[1.0, 0.0, 1.0, 0.0, 2.0, 2.0, 2.0, 2.0, 0.0][..]
        );
    }

    #[test]
    fn constant_field_keeps_values_finite() {
        let rows = vec![row("40", "25", "Yes"), row("40", "25", "No")];
        let fitted = DatasetProcessor::new(FeatureLayout::Basic).fit(&rows);

        assert_eq!(fitted.stats.get(ContinuousField::Age).unwrap().std, 0.0);
        assert_eq!(fitted.features[0][0], 0.0);
        assert!(fitted.features.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn clinical_layout_requires_clinical_columns() {
        let mut complete = row("40", "20", "Yes");
        for (column, value) in [
            ("Cholesterol_Level", "210"),
            ("Fasting_Blood_Sugar", "105"),
            ("HbA1c", "6.1"),
            ("Heart_Rate", "72"),
            ("Waist_Hip_Ratio", "0.9"),
        ] {
            complete.insert(column.to_string(), value.to_string());
        }
        let rows = vec![complete, row("45", "22", "No")];

        let fitted = DatasetProcessor::new(FeatureLayout::Clinical).fit(&rows);
        assert_eq!(fitted.summary.valid_rows, 1);
        assert_eq!(fitted.features[0].len(), 15);
    }

    #[test]
    fn empty_input_yields_empty_fit() {
        let fitted = DatasetProcessor::default().fit(&[]);
        assert!(fitted.features.is_empty());
        assert_eq!(fitted.summary.prevalence, 0.0);
    }

    #[test]
    fn labels_other_than_yes_are_negative() {
        assert_eq!(parse_label("yes"), 1.0);
        assert_eq!(parse_label("1"), 1.0);
        assert_eq!(parse_label("No"), 0.0);
        assert_eq!(parse_label("Maybe"), 0.0);
    }

    #[test]
    fn parses_mixed_json_values() {
        let records = parse_records(
            r#"[{"Age": 45, "Gender": "Female", "Hypertension": null, "Flag": true}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Age"), Some(&"45".to_string()));
        assert_eq!(records[0].get("Flag"), Some(&"true".to_string()));
        assert!(records[0].get("Hypertension").is_none());
    }

    #[test]
    fn rejects_non_object_records() {
        let err = parse_records(r#"[{"Age": 1}, 5]"#).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { index: 1 }));
    }
}
