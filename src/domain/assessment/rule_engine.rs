//! Rule Engine - Deterministic additive scoring of a health profile.
//!
//! Ten independent factors are evaluated once each, in a fixed order. Every
//! factor contributes a point value, exactly one [`RiskFactor`] and zero or
//! more recommendations. The point total decides the tier; the factor list and
//! recommendations double as the explanation for trained-model results.
//!
//! | Factor              | Points                                      |
//! |---------------------|---------------------------------------------|
//! | Age                 | >=45: 15, >=35: 8                           |
//! | BMI                 | >=30: 25, >=25: 15                          |
//! | Family history      | Yes: 20                                     |
//! | Physical activity   | Low: 15, Moderate: 5                        |
//! | Diet                | Unhealthy: 15, Balanced: 3                  |
//! | Smoking             | Smoker: 12, FormerSmoker: 3                 |
//! | Alcohol             | Yes: 8, Occasional: 2                       |
//! | Stress              | High: 10, Medium: 4                         |
//! | Hypertension        | Yes: 15                                     |
//! | Gender              | Male: 2                                     |

use super::{
    ActivityLevel, AlcoholIntake, DietType, Gender, HealthProfile, Impact, RiskError, RiskFactor,
    RiskLevel, SmokingStatus, StressLevel,
};
use crate::domain::foundation::Percentage;

/// Score at which the percentage scale reaches 100. Totals above it saturate.
pub const MAX_RULE_SCORE: u32 = 120;

/// Rule-based percentages never exceed this, so no result implies certainty.
pub const MAX_RULE_PERCENTAGE: u8 = 95;

/// Complete rule-based assessment of one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleAssessment {
    pub raw_score: u32,
    pub risk_level: RiskLevel,
    pub risk_percentage: Percentage,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

/// Factors and recommendations for a tier decided elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

/// Outcome of evaluating a single factor.
struct FactorOutcome {
    points: u32,
    factor: RiskFactor,
    recommendations: Vec<&'static str>,
}

impl FactorOutcome {
    fn raises(points: u32, name: &str, description: String) -> Self {
        Self {
            points,
            factor: RiskFactor::new(name, Impact::Positive, description),
            recommendations: Vec::new(),
        }
    }

    fn lowers(name: &str, description: String) -> Self {
        Self {
            points: 0,
            factor: RiskFactor::new(name, Impact::Negative, description),
            recommendations: Vec::new(),
        }
    }

    fn neutral(name: &str, description: String) -> Self {
        Self {
            points: 0,
            factor: RiskFactor::new(name, Impact::Neutral, description),
            recommendations: Vec::new(),
        }
    }

    fn recommend(mut self, recommendation: &'static str) -> Self {
        self.recommendations.push(recommendation);
        self
    }
}

/// Stateless rule-based scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scores the profile and explains the result.
    ///
    /// # Errors
    ///
    /// `RiskError::MissingBmi` if the profile carries no usable BMI.
    pub fn score(&self, profile: &HealthProfile) -> Result<RuleAssessment, RiskError> {
        let outcomes = evaluate_factors(profile)?;
        let raw_score = outcomes
            .iter()
            .map(|o| o.points)
            .sum::<u32>()
            .min(MAX_RULE_SCORE);
        let risk_level = RiskLevel::from_rule_score(raw_score);
        let Explanation {
            factors,
            recommendations,
        } = assemble(outcomes, risk_level);

        Ok(RuleAssessment {
            raw_score,
            risk_level,
            risk_percentage: Self::percentage_for(raw_score),
            factors,
            recommendations,
        })
    }

    /// Derives factors and recommendations for an externally chosen tier.
    ///
    /// Used when the trained model sets the tier; the explanation still comes
    /// from the raw profile, never from model internals.
    pub fn explain(
        &self,
        profile: &HealthProfile,
        risk_level: RiskLevel,
    ) -> Result<Explanation, RiskError> {
        Ok(assemble(evaluate_factors(profile)?, risk_level))
    }

    /// `min(round(raw / 120 * 100), 95)`.
    pub fn percentage_for(raw_score: u32) -> Percentage {
        let fraction = f64::from(raw_score) / f64::from(MAX_RULE_SCORE);
        Percentage::new(Percentage::from_fraction(fraction).value().min(MAX_RULE_PERCENTAGE))
    }
}

fn assemble(outcomes: Vec<FactorOutcome>, risk_level: RiskLevel) -> Explanation {
    let mut factors = Vec::with_capacity(outcomes.len());
    let mut recommendations = vec![opening_recommendation(risk_level).to_string()];

    for outcome in outcomes {
        factors.push(outcome.factor);
        recommendations.extend(outcome.recommendations.into_iter().map(String::from));
    }
    recommendations.push(closing_recommendation(risk_level).to_string());

    Explanation {
        factors,
        recommendations,
    }
}

fn opening_recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Your risk is low. Keep up your current healthy habits.",
        RiskLevel::Medium => {
            "Your risk is moderate. Targeted lifestyle changes can bring it down."
        }
        RiskLevel::High => {
            "Your risk is high. Please consult a healthcare provider for a diabetes screening soon."
        }
    }
}

fn closing_recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Re-check your risk every few years or whenever your health changes.",
        RiskLevel::Medium => "Re-assess your risk in 6 to 12 months after making changes.",
        RiskLevel::High => "Ask your doctor about an HbA1c or fasting glucose test.",
    }
}

fn evaluate_factors(profile: &HealthProfile) -> Result<Vec<FactorOutcome>, RiskError> {
    let bmi = profile.bmi();
    if !bmi.is_finite() || bmi <= 0.0 {
        return Err(RiskError::MissingBmi);
    }

    Ok(vec![
        age_factor(profile.age()),
        bmi_factor(bmi),
        family_history_factor(profile.family_history().is_yes()),
        activity_factor(profile.physical_activity()),
        diet_factor(profile.diet_type()),
        smoking_factor(profile.smoking_status()),
        alcohol_factor(profile.alcohol_intake()),
        stress_factor(profile.stress_level()),
        hypertension_factor(profile.hypertension().is_yes()),
        gender_factor(profile.gender()),
    ])
}

fn age_factor(age: u8) -> FactorOutcome {
    if age >= 45 {
        FactorOutcome::raises(15, "Age", format!("Age {} is 45 or older, when risk rises markedly", age))
            .recommend("Schedule a yearly fasting glucose or HbA1c screening.")
    } else if age >= 35 {
        FactorOutcome::raises(8, "Age", format!("Age {} is in the moderately elevated 35-44 range", age))
            .recommend("Ask your doctor about diabetes screening every three years.")
    } else {
        FactorOutcome::lowers("Age", format!("Age {} is below the main risk threshold", age))
    }
}

fn bmi_factor(bmi: f64) -> FactorOutcome {
    if bmi >= 30.0 {
        FactorOutcome::raises(25, "BMI", format!("BMI {:.1} is in the obese range", bmi)).recommend(
            "Work with a healthcare provider on a weight-loss plan; losing 5-7% of body weight substantially lowers risk.",
        )
    } else if bmi >= 25.0 {
        FactorOutcome::raises(15, "BMI", format!("BMI {:.1} is in the overweight range", bmi))
            .recommend("Aim for gradual weight loss through portion control and regular exercise.")
    } else if bmi >= 18.5 {
        FactorOutcome::lowers("BMI", format!("BMI {:.1} is in the healthy range", bmi))
    } else {
        FactorOutcome::neutral("BMI", format!("BMI {:.1} is below the healthy range", bmi))
            .recommend("Talk to a healthcare provider about reaching a healthy weight.")
    }
}

fn family_history_factor(has_history: bool) -> FactorOutcome {
    if has_history {
        FactorOutcome::raises(20, "Family History", "A close relative has diabetes".to_string())
            .recommend("Share your family history with your doctor so screening can start earlier.")
    } else {
        FactorOutcome::lowers("Family History", "No family history of diabetes".to_string())
    }
}

fn activity_factor(activity: ActivityLevel) -> FactorOutcome {
    match activity {
        ActivityLevel::Low => FactorOutcome::raises(
            15,
            "Physical Activity",
            "Low physical activity reduces insulin sensitivity".to_string(),
        )
        .recommend("Build up to at least 150 minutes of moderate activity per week."),
        ActivityLevel::Moderate => FactorOutcome::raises(
            5,
            "Physical Activity",
            "Moderate activity gives partial protection".to_string(),
        )
        .recommend("Add strength training twice a week on top of your current routine."),
        ActivityLevel::High => FactorOutcome::lowers(
            "Physical Activity",
            "High physical activity improves blood sugar control".to_string(),
        ),
    }
}

fn diet_factor(diet: DietType) -> FactorOutcome {
    match diet {
        DietType::Unhealthy => FactorOutcome::raises(
            15,
            "Diet",
            "An unhealthy diet high in sugar and processed food raises risk".to_string(),
        )
        .recommend("Cut back on sugary drinks, refined carbohydrates and processed foods."),
        DietType::Balanced => {
            FactorOutcome::raises(3, "Diet", "A balanced diet with room to improve".to_string())
                .recommend("Increase fibre with more vegetables, legumes and whole grains.")
        }
        DietType::VeryHealthy => {
            FactorOutcome::lowers("Diet", "A very healthy diet lowers risk".to_string())
        }
    }
}

fn smoking_factor(status: SmokingStatus) -> FactorOutcome {
    match status {
        SmokingStatus::Smoker => FactorOutcome::raises(
            12,
            "Smoking",
            "Smoking impairs insulin sensitivity".to_string(),
        )
        .recommend("Quitting smoking improves insulin sensitivity; ask about cessation support."),
        SmokingStatus::FormerSmoker => FactorOutcome::raises(
            3,
            "Smoking",
            "Former smokers carry a small residual risk".to_string(),
        ),
        SmokingStatus::NonSmoker => {
            FactorOutcome::lowers("Smoking", "Non-smoker".to_string())
        }
    }
}

fn alcohol_factor(intake: AlcoholIntake) -> FactorOutcome {
    match intake {
        AlcoholIntake::Yes => FactorOutcome::raises(
            8,
            "Alcohol",
            "Regular alcohol intake raises risk".to_string(),
        )
        .recommend("Limit alcohol to no more than one drink a day."),
        AlcoholIntake::Occasional => FactorOutcome::raises(
            2,
            "Alcohol",
            "Occasional alcohol intake slightly raises risk".to_string(),
        ),
        AlcoholIntake::No => FactorOutcome::lowers("Alcohol", "No alcohol intake".to_string()),
    }
}

fn stress_factor(level: StressLevel) -> FactorOutcome {
    match level {
        StressLevel::High => FactorOutcome::raises(
            10,
            "Stress",
            "High stress can raise blood sugar levels".to_string(),
        )
        .recommend("Try stress-reduction techniques such as mindfulness, regular sleep and exercise."),
        StressLevel::Medium => FactorOutcome::raises(
            4,
            "Stress",
            "Moderate stress slightly raises risk".to_string(),
        )
        .recommend("Set aside regular time to unwind; ongoing stress affects blood sugar."),
        StressLevel::Low => FactorOutcome::lowers("Stress", "Low stress level".to_string()),
    }
}

fn hypertension_factor(has_hypertension: bool) -> FactorOutcome {
    if has_hypertension {
        FactorOutcome::raises(
            15,
            "Hypertension",
            "High blood pressure often accompanies insulin resistance".to_string(),
        )
        .recommend("Keep blood pressure under control with your doctor's guidance and a low-sodium diet.")
    } else {
        FactorOutcome::lowers("Hypertension", "Normal blood pressure".to_string())
    }
}

fn gender_factor(gender: Gender) -> FactorOutcome {
    match gender {
        Gender::Male => FactorOutcome::raises(
            2,
            "Gender",
            "Men develop type 2 diabetes at a slightly higher rate".to_string(),
        ),
        Gender::Female => FactorOutcome::neutral("Gender", "No additional risk from gender".to_string()),
    }
}
