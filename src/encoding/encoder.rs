//! RawInput → FeatureVector.
//!
//! Numeric fields pass through unchanged, `fnlwgt` is the fixed `FNLWGT`
//! constant, and each categorical label is replaced by its table code.
//!
//! Unknown labels are handled asymmetrically:
//! - `native_country` maps to `FALLBACK_CODE`
//! - every other field is a closed set, so an unknown label is rejected

use crate::domain::{CategoricalField, FNLWGT, FeatureVector, RawInput};
use crate::encoding::tables::{FALLBACK_CODE, tables};
use crate::error::PredictError;

/// Code for a single categorical label.
pub fn encode_label(field: CategoricalField, label: &str) -> Result<i64, PredictError> {
    match tables().get(field).code(label) {
        Some(code) => Ok(code),
        None if field.is_open() => {
            tracing::debug!(field = field.name(), label, "unknown label, using fallback code");
            Ok(FALLBACK_CODE)
        }
        None => Err(PredictError::InvalidInput {
            field,
            label: label.to_string(),
        }),
    }
}

/// Encode a raw record into the model's column order.
pub fn encode(raw: &RawInput) -> Result<FeatureVector, PredictError> {
    let code = |field: CategoricalField| encode_label(field, raw.label(field));

    Ok(FeatureVector::new([
        raw.age,
        code(CategoricalField::Workclass)?,
        FNLWGT,
        raw.education_num,
        code(CategoricalField::MaritalStatus)?,
        code(CategoricalField::Occupation)?,
        code(CategoricalField::Relationship)?,
        code(CategoricalField::Race)?,
        code(CategoricalField::Gender)?,
        raw.capital_gain,
        raw.capital_loss,
        raw.hours_per_week,
        code(CategoricalField::NativeCountry)?,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Feature;

    fn scenario() -> RawInput {
        RawInput {
            age: 30,
            workclass: "Private".to_string(),
            education_num: 10,
            marital_status: "Never-married".to_string(),
            occupation: "Prof-specialty".to_string(),
            relationship: "Not-in-family".to_string(),
            race: "White".to_string(),
            gender: "Male".to_string(),
            capital_gain: 0,
            capital_loss: 0,
            hours_per_week: 40,
            native_country: "United-States".to_string(),
        }
    }

    #[test]
    fn encodes_reference_profile_positionally() {
        let fv = encode(&scenario()).unwrap();
        assert_eq!(
            fv.values(),
            &[30, 4, 180000, 10, 1, 9, 3, 4, 1, 0, 0, 40, 38]
        );
    }

    #[test]
    fn unknown_country_falls_back_without_touching_other_fields() {
        let mut raw = scenario();
        raw.native_country = "Atlantis".to_string();
        let fv = encode(&raw).unwrap();
        assert_eq!(
            fv.values(),
            &[30, 4, 180000, 10, 1, 9, 3, 4, 1, 0, 0, 40, 0]
        );
    }

    #[test]
    fn country_codes() {
        assert_eq!(encode_label(CategoricalField::NativeCountry, "United-States"), Ok(38));
        assert_eq!(encode_label(CategoricalField::NativeCountry, "Atlantis"), Ok(0));
        assert_eq!(encode_label(CategoricalField::NativeCountry, ""), Ok(0));
    }

    #[test]
    fn closed_fields_reject_unknown_labels() {
        for field in CategoricalField::ALL.into_iter().filter(|f| !f.is_open()) {
            let mut raw = scenario();
            raw.set_label(field, "Atlantis");
            assert_eq!(
                encode(&raw),
                Err(PredictError::InvalidInput {
                    field,
                    label: "Atlantis".to_string()
                })
            );
        }
    }

    #[test]
    fn closed_field_codes_match_tabulated_values() {
        let expected: &[(CategoricalField, &str, i64)] = &[
            (CategoricalField::Workclass, "Private", 4),
            (CategoricalField::Workclass, "Self-emp-not-inc", 5),
            (CategoricalField::Workclass, "Self-emp-inc", 3),
            (CategoricalField::Workclass, "Federal-gov", 1),
            (CategoricalField::Workclass, "Local-gov", 2),
            (CategoricalField::Workclass, "State-gov", 6),
            (CategoricalField::Workclass, "Others", 0),
            (CategoricalField::Occupation, "Tech-support", 12),
            (CategoricalField::Occupation, "Craft-repair", 2),
            (CategoricalField::Occupation, "Other-service", 8),
            (CategoricalField::Occupation, "Sales", 10),
            (CategoricalField::Occupation, "Exec-managerial", 4),
            (CategoricalField::Occupation, "Prof-specialty", 9),
            (CategoricalField::Occupation, "Handlers-cleaners", 5),
            (CategoricalField::Occupation, "Machine-op-inspct", 6),
            (CategoricalField::Occupation, "Adm-clerical", 0),
            (CategoricalField::Occupation, "Farming-fishing", 3),
            (CategoricalField::Occupation, "Transport-moving", 13),
            (CategoricalField::Occupation, "Priv-house-serv", 7),
            (CategoricalField::Occupation, "Protective-serv", 11),
            (CategoricalField::Occupation, "Armed-Forces", 1),
            (CategoricalField::Occupation, "Others", 14),
            (CategoricalField::Relationship, "Wife", 5),
            (CategoricalField::Relationship, "Own-child", 1),
            (CategoricalField::Relationship, "Husband", 2),
            (CategoricalField::Relationship, "Not-in-family", 3),
            (CategoricalField::Relationship, "Other-relative", 0),
            (CategoricalField::Relationship, "Unmarried", 4),
            (CategoricalField::Race, "White", 4),
            (CategoricalField::Race, "Black", 0),
            (CategoricalField::Race, "Asian-Pac-Islander", 1),
            (CategoricalField::Race, "Amer-Indian-Eskimo", 2),
            (CategoricalField::Race, "Other", 3),
            (CategoricalField::Gender, "Female", 0),
            (CategoricalField::Gender, "Male", 1),
        ];
        for &(field, label, code) in expected {
            assert_eq!(encode_label(field, label), Ok(code), "{} / {label}", field.name());
            // Stable across repeated lookups.
            assert_eq!(encode_label(field, label), Ok(code));
        }
    }

    #[test]
    fn fnlwgt_is_constant() {
        let mut raw = scenario();
        for (age, gain) in [(17, 0), (75, 100_000), (44, 1234)] {
            raw.age = age;
            raw.capital_gain = gain;
            assert_eq!(encode(&raw).unwrap().get(Feature::Fnlwgt), 180_000);
        }
    }

    #[test]
    fn encoding_is_pure() {
        let raw = scenario();
        let a = encode(&raw).unwrap();
        let b = encode(&raw).unwrap();
        assert_eq!(a, b);
        assert_eq!(raw, scenario());
    }
}
