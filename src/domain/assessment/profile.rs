//! Health profile - the validated input to every risk evaluation.
//!
//! A profile is built from a [`HealthProfileInput`] (the JSON shape sent by
//! forms and by the scoring client). Construction range-checks every field and
//! derives the BMI from height and weight; BMI is never accepted from outside.

use serde::{Deserialize, Serialize};

use super::RiskError;
use crate::domain::foundation::ValidationError;

/// Inclusive bounds for the numeric profile fields.
pub const AGE_RANGE: (u32, u32) = (1, 120);
pub const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 250.0);
pub const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 300.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Yes/No answer used by family history and hypertension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietType {
    #[serde(alias = "Very Healthy")]
    VeryHealthy,
    Balanced,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingStatus {
    Smoker,
    #[serde(alias = "Non-Smoker")]
    NonSmoker,
    #[serde(alias = "Former Smoker")]
    FormerSmoker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlcoholIntake {
    Yes,
    No,
    Occasional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

/// Optional laboratory and body measurements.
///
/// Only the trained model's clinical feature layout reads these; the rule
/// engine ignores them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalMeasurements {
    /// Total cholesterol (mg/dL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    /// Fasting blood sugar (mg/dL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fasting_blood_sugar: Option<f64>,
    /// Glycated haemoglobin (%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
    /// Resting heart rate (bpm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_hip_ratio: Option<f64>,
}

impl ClinicalMeasurements {
    fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("cholesterol", self.cholesterol),
            ("fastingBloodSugar", self.fasting_blood_sugar),
            ("hba1c", self.hba1c),
            ("heartRate", self.heart_rate),
            ("waistHipRatio", self.waist_hip_ratio),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(ValidationError::invalid_format(
                        name,
                        "must be a positive number",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Wire shape of a health profile, as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfileInput {
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres.
    pub height: Option<f64>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    pub family_history: YesNo,
    pub physical_activity: ActivityLevel,
    pub diet_type: DietType,
    pub smoking_status: SmokingStatus,
    pub alcohol_intake: AlcoholIntake,
    pub stress_level: StressLevel,
    pub hypertension: YesNo,
    #[serde(flatten)]
    pub clinical: ClinicalMeasurements,
}

/// A validated health profile with its derived BMI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HealthProfileInput", into = "HealthProfileInput")]
pub struct HealthProfile {
    age: u8,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    bmi: f64,
    family_history: YesNo,
    physical_activity: ActivityLevel,
    diet_type: DietType,
    smoking_status: SmokingStatus,
    alcohol_intake: AlcoholIntake,
    stress_level: StressLevel,
    hypertension: YesNo,
    clinical: ClinicalMeasurements,
}

/// Derives BMI rounded to one decimal place.
pub fn derive_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 10.0).round() / 10.0
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<f64, ValidationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::out_of_range(field, min, max, value))
    }
}

impl HealthProfile {
    /// Validates the input and derives BMI.
    ///
    /// # Errors
    ///
    /// - `RiskError::MissingBmi` when height or weight is absent or not finite
    /// - `RiskError::InvalidProfile` when a field is outside its range
    pub fn new(input: HealthProfileInput) -> Result<Self, RiskError> {
        let (height, weight) = match (input.height, input.weight) {
            (Some(h), Some(w)) if h.is_finite() && w.is_finite() => (h, w),
            _ => return Err(RiskError::MissingBmi),
        };

        let (min_age, max_age) = AGE_RANGE;
        if !(min_age..=max_age).contains(&input.age) {
            return Err(ValidationError::out_of_range(
                "age",
                f64::from(min_age),
                f64::from(max_age),
                f64::from(input.age),
            )
            .into());
        }
        let height_cm = check_range("height", height, HEIGHT_RANGE_CM)?;
        let weight_kg = check_range("weight", weight, WEIGHT_RANGE_KG)?;
        input.clinical.validate()?;

        Ok(Self {
            // Range-checked above, always fits.
            age: input.age as u8,
            gender: input.gender,
            height_cm,
            weight_kg,
            bmi: derive_bmi(height_cm, weight_kg),
            family_history: input.family_history,
            physical_activity: input.physical_activity,
            diet_type: input.diet_type,
            smoking_status: input.smoking_status,
            alcohol_intake: input.alcohol_intake,
            stress_level: input.stress_level,
            hypertension: input.hypertension,
            clinical: input.clinical,
        })
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn family_history(&self) -> YesNo {
        self.family_history
    }

    pub fn physical_activity(&self) -> ActivityLevel {
        self.physical_activity
    }

    pub fn diet_type(&self) -> DietType {
        self.diet_type
    }

    pub fn smoking_status(&self) -> SmokingStatus {
        self.smoking_status
    }

    pub fn alcohol_intake(&self) -> AlcoholIntake {
        self.alcohol_intake
    }

    pub fn stress_level(&self) -> StressLevel {
        self.stress_level
    }

    pub fn hypertension(&self) -> YesNo {
        self.hypertension
    }

    pub fn clinical(&self) -> &ClinicalMeasurements {
        &self.clinical
    }
}

impl TryFrom<HealthProfileInput> for HealthProfile {
    type Error = RiskError;

    fn try_from(input: HealthProfileInput) -> Result<Self, Self::Error> {
        HealthProfile::new(input)
    }
}

impl From<HealthProfile> for HealthProfileInput {
    fn from(profile: HealthProfile) -> Self {
        Self {
            age: u32::from(profile.age),
            gender: profile.gender,
            height: Some(profile.height_cm),
            weight: Some(profile.weight_kg),
            family_history: profile.family_history,
            physical_activity: profile.physical_activity,
            diet_type: profile.diet_type,
            smoking_status: profile.smoking_status,
            alcohol_intake: profile.alcohol_intake,
            stress_level: profile.stress_level,
            hypertension: profile.hypertension,
            clinical: profile.clinical,
        }
    }
}
