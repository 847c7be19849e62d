//! Vocabulary - the single, versioned set of category tables.
//!
//! Profiles speak the form vocabulary (`VeryHealthy`, `FormerSmoker`, ...);
//! training datasets speak the dataset vocabulary (`Vegan`, `Former`, ...).
//! Every categorical value is first mapped to its dataset term and then to an
//! ordinal code. Encoder, dataset processor and scoring service all read these
//! tables, so training and inference cannot drift apart.
//!
//! Codes are rank positions: the lowest rank of each field is 0.

use serde::Serialize;

use crate::domain::assessment::{
    ActivityLevel, AlcoholIntake, DietType, Gender, SmokingStatus, StressLevel, YesNo,
};

/// Identifies the table set. Bump whenever a term or code changes.
pub const VOCABULARY_VERSION: &str = "1";

/// Categorical inputs of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CategoricalField {
    Gender,
    FamilyHistory,
    PhysicalActivity,
    DietType,
    SmokingStatus,
    AlcoholIntake,
    StressLevel,
    Hypertension,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 8] = [
        CategoricalField::Gender,
        CategoricalField::FamilyHistory,
        CategoricalField::PhysicalActivity,
        CategoricalField::DietType,
        CategoricalField::SmokingStatus,
        CategoricalField::AlcoholIntake,
        CategoricalField::StressLevel,
        CategoricalField::Hypertension,
    ];

    /// Dataset column holding this field.
    pub fn column(&self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::FamilyHistory => "Family_History",
            CategoricalField::PhysicalActivity => "Physical_Activity",
            CategoricalField::DietType => "Diet_Type",
            CategoricalField::SmokingStatus => "Smoking_Status",
            CategoricalField::AlcoholIntake => "Alcohol_Intake",
            CategoricalField::StressLevel => "Stress_Level",
            CategoricalField::Hypertension => "Hypertension",
        }
    }

    /// Dataset terms in code order (index = code).
    pub fn terms(&self) -> &'static [&'static str] {
        match self {
            CategoricalField::Gender => &["Female", "Male"],
            CategoricalField::FamilyHistory | CategoricalField::Hypertension => &["No", "Yes"],
            CategoricalField::PhysicalActivity => &["Low", "Moderate", "High"],
            CategoricalField::DietType => &["Vegan", "Vegetarian", "NonVegetarian"],
            CategoricalField::SmokingStatus => &["Never", "Former", "Current"],
            CategoricalField::AlcoholIntake => &["None", "Moderate", "High"],
            CategoricalField::StressLevel => &["Low", "Medium", "High"],
        }
    }

    /// Code for a dataset term, or `None` if the term is not in the table.
    ///
    /// Matching ignores case, spaces, `-` and `_`, so `Non-Vegetarian` and
    /// `nonvegetarian` both resolve.
    pub fn code(&self, term: &str) -> Option<u8> {
        let wanted = fold(term);
        self.terms()
            .iter()
            .position(|t| fold(t) == wanted)
            .map(|idx| idx as u8)
    }

    /// Reverse lookup of [`CategoricalField::code`].
    pub fn term(&self, code: u8) -> Option<&'static str> {
        self.terms().get(usize::from(code)).copied()
    }
}

fn fold(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Continuous inputs of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ContinuousField {
    Age,
    Bmi,
    Cholesterol,
    FastingBloodSugar,
    HbA1c,
    HeartRate,
    WaistHipRatio,
}

impl ContinuousField {
    /// Dataset column holding this field.
    pub fn column(&self) -> &'static str {
        match self {
            ContinuousField::Age => "Age",
            ContinuousField::Bmi => "BMI",
            ContinuousField::Cholesterol => "Cholesterol_Level",
            ContinuousField::FastingBloodSugar => "Fasting_Blood_Sugar",
            ContinuousField::HbA1c => "HbA1c",
            ContinuousField::HeartRate => "Heart_Rate",
            ContinuousField::WaistHipRatio => "Waist_Hip_Ratio",
        }
    }
}

/// Maps a form value to its dataset term.
pub trait DatasetTerm {
    const FIELD: CategoricalField;

    fn dataset_term(&self) -> &'static str;

    /// Ordinal code through the shared tables.
    fn code(&self) -> u8 {
        // Every form value maps to a listed term; 0 is the documented default.
        Self::FIELD.code(self.dataset_term()).unwrap_or(0)
    }
}

impl DatasetTerm for Gender {
    const FIELD: CategoricalField = CategoricalField::Gender;

    fn dataset_term(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl DatasetTerm for ActivityLevel {
    const FIELD: CategoricalField = CategoricalField::PhysicalActivity;

    fn dataset_term(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
        }
    }
}

impl DatasetTerm for DietType {
    const FIELD: CategoricalField = CategoricalField::DietType;

    fn dataset_term(&self) -> &'static str {
        match self {
            DietType::VeryHealthy => "Vegan",
            DietType::Balanced => "Vegetarian",
            DietType::Unhealthy => "NonVegetarian",
        }
    }
}

impl DatasetTerm for SmokingStatus {
    const FIELD: CategoricalField = CategoricalField::SmokingStatus;

    fn dataset_term(&self) -> &'static str {
        match self {
            SmokingStatus::NonSmoker => "Never",
            SmokingStatus::FormerSmoker => "Former",
            SmokingStatus::Smoker => "Current",
        }
    }
}

impl DatasetTerm for AlcoholIntake {
    const FIELD: CategoricalField = CategoricalField::AlcoholIntake;

    fn dataset_term(&self) -> &'static str {
        match self {
            AlcoholIntake::No => "None",
            AlcoholIntake::Occasional => "Moderate",
            AlcoholIntake::Yes => "High",
        }
    }
}

impl DatasetTerm for StressLevel {
    const FIELD: CategoricalField = CategoricalField::StressLevel;

    fn dataset_term(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
        }
    }
}

/// Yes/No fields share one table; the field is fixed to family history.
/// Hypertension uses the identical terms and codes.
impl DatasetTerm for YesNo {
    const FIELD: CategoricalField = CategoricalField::FamilyHistory;

    fn dataset_term(&self) -> &'static str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Yes",
        }
    }
}
