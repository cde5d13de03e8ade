//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - filled in by any front-end (CLI flags, CSV rows, the TUI form)
//! - encoded and scored by the core
//! - exported to JSON/CSV alongside the prediction

use serde::{Deserialize, Serialize};

/// Census sampling weight fed to the model in place of a user-supplied value.
pub const FNLWGT: i64 = 180_000;

/// Number of features the model was trained on.
pub const FEATURE_COUNT: usize = 13;

/// One of the seven label-valued input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Workclass,
    MaritalStatus,
    Occupation,
    Relationship,
    Race,
    Gender,
    NativeCountry,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 7] = [
        CategoricalField::Workclass,
        CategoricalField::MaritalStatus,
        CategoricalField::Occupation,
        CategoricalField::Relationship,
        CategoricalField::Race,
        CategoricalField::Gender,
        CategoricalField::NativeCountry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::Workclass => "workclass",
            CategoricalField::MaritalStatus => "marital_status",
            CategoricalField::Occupation => "occupation",
            CategoricalField::Relationship => "relationship",
            CategoricalField::Race => "race",
            CategoricalField::Gender => "gender",
            CategoricalField::NativeCountry => "native_country",
        }
    }

    /// Labels offered by input surfaces, in display order.
    ///
    /// The first label is the default selection.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            CategoricalField::Workclass => &[
                "Private",
                "Self-emp-not-inc",
                "Self-emp-inc",
                "Federal-gov",
                "Local-gov",
                "State-gov",
                "Others",
            ],
            CategoricalField::MaritalStatus => &[
                "Married-civ-spouse",
                "Never-married",
                "Divorced",
                "Separated",
                "Widowed",
                "Married-spouse-absent",
            ],
            CategoricalField::Occupation => &[
                "Prof-specialty",
                "Exec-managerial",
                "Craft-repair",
                "Sales",
                "Tech-support",
                "Other-service",
                "Handlers-cleaners",
                "Machine-op-inspct",
                "Adm-clerical",
                "Farming-fishing",
                "Transport-moving",
                "Priv-house-serv",
                "Protective-serv",
                "Armed-Forces",
                "Others",
            ],
            CategoricalField::Relationship => &[
                "Husband",
                "Wife",
                "Not-in-family",
                "Own-child",
                "Unmarried",
                "Other-relative",
            ],
            CategoricalField::Race => &[
                "White",
                "Black",
                "Asian-Pac-Islander",
                "Amer-Indian-Eskimo",
                "Other",
            ],
            CategoricalField::Gender => &["Male", "Female"],
            CategoricalField::NativeCountry => &[
                "United-States",
                "Mexico",
                "Philippines",
                "Germany",
                "Canada",
                "India",
                "Others",
            ],
        }
    }

    /// Whether an unknown label falls back to a default code instead of failing.
    ///
    /// Only `native_country` is open-ended.
    pub fn is_open(self) -> bool {
        self == CategoricalField::NativeCountry
    }
}

/// One of the five integer-valued input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    EducationNum,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Age,
        NumericField::EducationNum,
        NumericField::CapitalGain,
        NumericField::CapitalLoss,
        NumericField::HoursPerWeek,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumericField::Age => "age",
            NumericField::EducationNum => "education_num",
            NumericField::CapitalGain => "capital_gain",
            NumericField::CapitalLoss => "capital_loss",
            NumericField::HoursPerWeek => "hours_per_week",
        }
    }

    /// Inclusive domain accepted by input surfaces.
    pub fn range(self) -> (i64, i64) {
        match self {
            NumericField::Age => (17, 75),
            NumericField::EducationNum => (1, 16),
            NumericField::CapitalGain => (0, 100_000),
            NumericField::CapitalLoss => (0, 5_000),
            NumericField::HoursPerWeek => (1, 100),
        }
    }

    pub fn default_value(self) -> i64 {
        match self {
            NumericField::Age => 30,
            NumericField::EducationNum => 10,
            NumericField::CapitalGain => 0,
            NumericField::CapitalLoss => 0,
            NumericField::HoursPerWeek => 40,
        }
    }

    /// Increment used by interactive widgets.
    pub fn step(self) -> i64 {
        match self {
            NumericField::CapitalGain => 100,
            NumericField::CapitalLoss => 50,
            _ => 1,
        }
    }

    pub fn contains(self, value: i64) -> bool {
        let (lo, hi) = self.range();
        (lo..=hi).contains(&value)
    }
}

/// The unencoded record a caller supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub age: i64,
    pub workclass: String,
    pub education_num: i64,
    pub marital_status: String,
    pub occupation: String,
    pub relationship: String,
    pub race: String,
    pub gender: String,
    pub capital_gain: i64,
    pub capital_loss: i64,
    pub hours_per_week: i64,
    pub native_country: String,
}

impl Default for RawInput {
    /// The profile an input form starts from.
    fn default() -> Self {
        let first = |field: CategoricalField| field.options()[0].to_string();
        Self {
            age: NumericField::Age.default_value(),
            workclass: first(CategoricalField::Workclass),
            education_num: NumericField::EducationNum.default_value(),
            marital_status: first(CategoricalField::MaritalStatus),
            occupation: first(CategoricalField::Occupation),
            relationship: first(CategoricalField::Relationship),
            race: first(CategoricalField::Race),
            gender: first(CategoricalField::Gender),
            capital_gain: NumericField::CapitalGain.default_value(),
            capital_loss: NumericField::CapitalLoss.default_value(),
            hours_per_week: NumericField::HoursPerWeek.default_value(),
            native_country: first(CategoricalField::NativeCountry),
        }
    }
}

impl RawInput {
    pub fn label(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Workclass => &self.workclass,
            CategoricalField::MaritalStatus => &self.marital_status,
            CategoricalField::Occupation => &self.occupation,
            CategoricalField::Relationship => &self.relationship,
            CategoricalField::Race => &self.race,
            CategoricalField::Gender => &self.gender,
            CategoricalField::NativeCountry => &self.native_country,
        }
    }

    pub fn set_label(&mut self, field: CategoricalField, label: impl Into<String>) {
        let label = label.into();
        match field {
            CategoricalField::Workclass => self.workclass = label,
            CategoricalField::MaritalStatus => self.marital_status = label,
            CategoricalField::Occupation => self.occupation = label,
            CategoricalField::Relationship => self.relationship = label,
            CategoricalField::Race => self.race = label,
            CategoricalField::Gender => self.gender = label,
            CategoricalField::NativeCountry => self.native_country = label,
        }
    }

    pub fn value(&self, field: NumericField) -> i64 {
        match field {
            NumericField::Age => self.age,
            NumericField::EducationNum => self.education_num,
            NumericField::CapitalGain => self.capital_gain,
            NumericField::CapitalLoss => self.capital_loss,
            NumericField::HoursPerWeek => self.hours_per_week,
        }
    }

    pub fn set_value(&mut self, field: NumericField, value: i64) {
        match field {
            NumericField::Age => self.age = value,
            NumericField::EducationNum => self.education_num = value,
            NumericField::CapitalGain => self.capital_gain = value,
            NumericField::CapitalLoss => self.capital_loss = value,
            NumericField::HoursPerWeek => self.hours_per_week = value,
        }
    }

    /// First numeric field whose value lies outside its declared domain.
    pub fn out_of_range(&self) -> Option<(NumericField, i64)> {
        NumericField::ALL
            .into_iter()
            .map(|f| (f, self.value(f)))
            .find(|&(f, v)| !f.contains(v))
    }
}

/// A position in the feature vector.
///
/// Declaration order is the column order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    Workclass,
    Fnlwgt,
    EducationNum,
    MaritalStatus,
    Occupation,
    Relationship,
    Race,
    Gender,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
    NativeCountry,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Age,
        Feature::Workclass,
        Feature::Fnlwgt,
        Feature::EducationNum,
        Feature::MaritalStatus,
        Feature::Occupation,
        Feature::Relationship,
        Feature::Race,
        Feature::Gender,
        Feature::CapitalGain,
        Feature::CapitalLoss,
        Feature::HoursPerWeek,
        Feature::NativeCountry,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the training data.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::Workclass => "workclass",
            Feature::Fnlwgt => "fnlwgt",
            Feature::EducationNum => "educational-num",
            Feature::MaritalStatus => "marital-status",
            Feature::Occupation => "occupation",
            Feature::Relationship => "relationship",
            Feature::Race => "race",
            Feature::Gender => "gender",
            Feature::CapitalGain => "capital-gain",
            Feature::CapitalLoss => "capital-loss",
            Feature::HoursPerWeek => "hours-per-week",
            Feature::NativeCountry => "native-country",
        }
    }
}

/// Encoded model input, in training column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector([i64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [i64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[i64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, feature: Feature) -> i64 {
        self.0[feature.index()]
    }

    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.0.map(|v| v as f64)
    }

    /// `(name, value)` pairs in column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        Feature::ALL.iter().map(|&f| (f.name(), self.get(f)))
    }
}

/// Binary income decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionResult {
    /// More than $50K.
    HighIncome,
    /// $50K or less.
    StandardIncome,
}

impl PredictionResult {
    pub fn short_label(self) -> &'static str {
        match self {
            PredictionResult::HighIncome => ">50K",
            PredictionResult::StandardIncome => "<=50K",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            PredictionResult::HighIncome => "Predicted Salary: >$50K",
            PredictionResult::StandardIncome => "Predicted Salary: <=$50K",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            PredictionResult::HighIncome => {
                "This individual is likely to have a higher income bracket."
            }
            PredictionResult::StandardIncome => {
                "This individual is likely to have a standard income bracket."
            }
        }
    }
}
