//! Feature Encoder - profile or dataset row to a fixed-order numeric vector.
//!
//! The vector layout is:
//!
//! | Index | Field              | Kind        |
//! |-------|--------------------|-------------|
//! | 0     | age                | continuous  |
//! | 1     | gender             | categorical |
//! | 2     | bmi                | continuous  |
//! | 3     | family history     | categorical |
//! | 4     | physical activity  | categorical |
//! | 5     | diet type          | categorical |
//! | 6     | smoking status     | categorical |
//! | 7     | alcohol intake     | categorical |
//! | 8     | stress level       | categorical |
//! | 9     | hypertension       | categorical |
//! | 10-14 | cholesterol, fasting sugar, HbA1c, heart rate, waist-hip ratio (clinical layout only) |
//!
//! # Lossy encoding
//!
//! A categorical term missing from the vocabulary encodes as 0, the lowest
//! rank. This is a known precision loss, not an error: the row is still
//! encoded and the substitution is logged at debug level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::vocabulary::{CategoricalField, ContinuousField, DatasetTerm};
use crate::domain::assessment::HealthProfile;

/// Which fields the classifier consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureLayout {
    /// Ten profile fields.
    #[default]
    Basic,
    /// Profile fields plus five clinical measurements.
    Clinical,
}

/// One position in the encoded vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSlot {
    Continuous(ContinuousField),
    Categorical(CategoricalField),
}

const BASIC_SLOTS: [FeatureSlot; 10] = [
    FeatureSlot::Continuous(ContinuousField::Age),
    FeatureSlot::Categorical(CategoricalField::Gender),
    FeatureSlot::Continuous(ContinuousField::Bmi),
    FeatureSlot::Categorical(CategoricalField::FamilyHistory),
    FeatureSlot::Categorical(CategoricalField::PhysicalActivity),
    FeatureSlot::Categorical(CategoricalField::DietType),
    FeatureSlot::Categorical(CategoricalField::SmokingStatus),
    FeatureSlot::Categorical(CategoricalField::AlcoholIntake),
    FeatureSlot::Categorical(CategoricalField::StressLevel),
    FeatureSlot::Categorical(CategoricalField::Hypertension),
];

const CLINICAL_SLOTS: [FeatureSlot; 15] = [
    BASIC_SLOTS[0],
    BASIC_SLOTS[1],
    BASIC_SLOTS[2],
    BASIC_SLOTS[3],
    BASIC_SLOTS[4],
    BASIC_SLOTS[5],
    BASIC_SLOTS[6],
    BASIC_SLOTS[7],
    BASIC_SLOTS[8],
    BASIC_SLOTS[9],
    FeatureSlot::Continuous(ContinuousField::Cholesterol),
    FeatureSlot::Continuous(ContinuousField::FastingBloodSugar),
    FeatureSlot::Continuous(ContinuousField::HbA1c),
    FeatureSlot::Continuous(ContinuousField::HeartRate),
    FeatureSlot::Continuous(ContinuousField::WaistHipRatio),
];

impl FeatureLayout {
    /// Slots in vector order.
    pub fn slots(&self) -> &'static [FeatureSlot] {
        match self {
            FeatureLayout::Basic => &BASIC_SLOTS,
            FeatureLayout::Clinical => &CLINICAL_SLOTS,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.slots().len()
    }

    /// Continuous fields in vector order.
    pub fn continuous_fields(&self) -> impl Iterator<Item = ContinuousField> {
        self.slots().iter().filter_map(|slot| match slot {
            FeatureSlot::Continuous(field) => Some(*field),
            FeatureSlot::Categorical(_) => None,
        })
    }
}

/// Mean and standard deviation of one continuous field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub mean: f64,
    pub std: f64,
}

impl FieldStats {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// `(value - mean) / std`, with a zero std replaced by 1.
    pub fn normalize(&self, value: f64) -> f64 {
        let std = if self.std == 0.0 { 1.0 } else { self.std };
        (value - self.mean) / std
    }
}

/// Normalization statistics for the continuous fields of a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationStats {
    fields: BTreeMap<ContinuousField, FieldStats>,
}

impl NormalizationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: ContinuousField, stats: FieldStats) -> Self {
        self.insert(field, stats);
        self
    }

    pub fn insert(&mut self, field: ContinuousField, stats: FieldStats) {
        self.fields.insert(field, stats);
    }

    pub fn get(&self, field: ContinuousField) -> Option<&FieldStats> {
        self.fields.get(&field)
    }
}

/// Anything the encoder can read features from.
///
/// Categorical values are returned in the dataset vocabulary.
pub trait FeatureSource {
    fn continuous(&self, field: ContinuousField) -> Option<f64>;
    fn categorical(&self, field: CategoricalField) -> Option<&str>;
}

impl FeatureSource for HealthProfile {
    fn continuous(&self, field: ContinuousField) -> Option<f64> {
        let clinical = self.clinical();
        match field {
            ContinuousField::Age => Some(f64::from(self.age())),
            ContinuousField::Bmi => Some(self.bmi()),
            ContinuousField::Cholesterol => clinical.cholesterol,
            ContinuousField::FastingBloodSugar => clinical.fasting_blood_sugar,
            ContinuousField::HbA1c => clinical.hba1c,
            ContinuousField::HeartRate => clinical.heart_rate,
            ContinuousField::WaistHipRatio => clinical.waist_hip_ratio,
        }
    }

    fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let term = match field {
            CategoricalField::Gender => self.gender().dataset_term(),
            CategoricalField::FamilyHistory => self.family_history().dataset_term(),
            CategoricalField::PhysicalActivity => self.physical_activity().dataset_term(),
            CategoricalField::DietType => self.diet_type().dataset_term(),
            CategoricalField::SmokingStatus => self.smoking_status().dataset_term(),
            CategoricalField::AlcoholIntake => self.alcohol_intake().dataset_term(),
            CategoricalField::StressLevel => self.stress_level().dataset_term(),
            CategoricalField::Hypertension => self.hypertension().dataset_term(),
        };
        Some(term)
    }
}

/// Encoded classifier input.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureVector(Vec<f64>);

impl EncodedFeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Encodes sources into vectors for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    layout: FeatureLayout,
    stats: Option<NormalizationStats>,
}

impl FeatureEncoder {
    /// Encoder that leaves continuous values unnormalized.
    pub fn new(layout: FeatureLayout) -> Self {
        Self {
            layout,
            stats: None,
        }
    }

    /// Encoder that normalizes continuous values with the given statistics.
    pub fn with_stats(layout: FeatureLayout, stats: NormalizationStats) -> Self {
        Self {
            layout,
            stats: Some(stats),
        }
    }

    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    pub fn stats(&self) -> Option<&NormalizationStats> {
        self.stats.as_ref()
    }

    /// Encodes a source. Total: never fails.
    ///
    /// A missing continuous value is imputed with the field mean (normalized
    /// value 0), or with 0 when no statistics are available.
    pub fn encode<S: FeatureSource + ?Sized>(&self, source: &S) -> EncodedFeatureVector {
        let values = self
            .layout
            .slots()
            .iter()
            .map(|slot| match slot {
                FeatureSlot::Continuous(field) => {
                    self.encode_continuous(*field, source.continuous(*field))
                }
                FeatureSlot::Categorical(field) => {
                    f64::from(encode_categorical(*field, source.categorical(*field)))
                }
            })
            .collect();
        EncodedFeatureVector(values)
    }

    fn encode_continuous(&self, field: ContinuousField, value: Option<f64>) -> f64 {
        let field_stats = self.stats.as_ref().and_then(|s| s.get(field));
        match (value, field_stats) {
            (Some(v), Some(stats)) => stats.normalize(v),
            (Some(v), None) => v,
            (None, _) => 0.0,
        }
    }
}

fn encode_categorical(field: CategoricalField, term: Option<&str>) -> u8 {
    match term.and_then(|t| field.code(t)) {
        Some(code) => code,
        None => {
            debug!(
                column = field.column(),
                term = term.unwrap_or("<missing>"),
                "Unknown category encoded as 0"
            );
            0
        }
    }
}
