//! Label → code tables for the categorical fields.
//!
//! The codes were assigned when the model was trained and must be reproduced
//! exactly; they are compatibility data, not something to regenerate.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::CategoricalField;

/// Code used for a `native_country` label missing from its table.
pub const FALLBACK_CODE: i64 = 0;

const WORKCLASS: &[(&str, i64)] = &[
    ("Private", 4),
    ("Self-emp-not-inc", 5),
    ("Self-emp-inc", 3),
    ("Federal-gov", 1),
    ("Local-gov", 2),
    ("State-gov", 6),
    ("Others", 0),
];

const MARITAL_STATUS: &[(&str, i64)] = &[
    ("Never-married", 1),
    ("Married-civ-spouse", 0),
    ("Divorced", 2),
    ("Separated", 2),
    ("Widowed", 2),
    ("Married-spouse-absent", 2),
];

const OCCUPATION: &[(&str, i64)] = &[
    ("Tech-support", 12),
    ("Craft-repair", 2),
    ("Other-service", 8),
    ("Sales", 10),
    ("Exec-managerial", 4),
    ("Prof-specialty", 9),
    ("Handlers-cleaners", 5),
    ("Machine-op-inspct", 6),
    ("Adm-clerical", 0),
    ("Farming-fishing", 3),
    ("Transport-moving", 13),
    ("Priv-house-serv", 7),
    ("Protective-serv", 11),
    ("Armed-Forces", 1),
    ("Others", 14),
];

const RELATIONSHIP: &[(&str, i64)] = &[
    ("Wife", 5),
    ("Own-child", 1),
    ("Husband", 2),
    ("Not-in-family", 3),
    ("Other-relative", 0),
    ("Unmarried", 4),
];

const RACE: &[(&str, i64)] = &[
    ("White", 4),
    ("Black", 0),
    ("Asian-Pac-Islander", 1),
    ("Amer-Indian-Eskimo", 2),
    ("Other", 3),
];

const GENDER: &[(&str, i64)] = &[("Female", 0), ("Male", 1)];

const NATIVE_COUNTRY: &[(&str, i64)] = &[
    ("United-States", 38),
    ("Mexico", 23),
    ("Philippines", 29),
    ("Germany", 10),
    ("Canada", 4),
    ("India", 16),
    ("Others", 0),
];

/// Read-only mapping for one categorical field.
#[derive(Debug)]
pub struct EncodingTable {
    field: CategoricalField,
    entries: &'static [(&'static str, i64)],
    index: HashMap<&'static str, i64>,
}

impl EncodingTable {
    fn build(field: CategoricalField, entries: &'static [(&'static str, i64)]) -> Self {
        Self {
            field,
            entries,
            index: entries.iter().copied().collect(),
        }
    }

    pub fn field(&self) -> CategoricalField {
        self.field
    }

    pub fn code(&self, label: &str) -> Option<i64> {
        self.index.get(label).copied()
    }

    /// Entries in their declared order.
    pub fn entries(&self) -> &'static [(&'static str, i64)] {
        self.entries
    }
}

/// All seven tables, built once on first use and shared by every reader.
pub struct EncodingTables {
    workclass: EncodingTable,
    marital_status: EncodingTable,
    occupation: EncodingTable,
    relationship: EncodingTable,
    race: EncodingTable,
    gender: EncodingTable,
    native_country: EncodingTable,
}

static TABLES: LazyLock<EncodingTables> = LazyLock::new(|| {
    tracing::debug!("building categorical encoding tables");
    EncodingTables {
        workclass: EncodingTable::build(CategoricalField::Workclass, WORKCLASS),
        marital_status: EncodingTable::build(CategoricalField::MaritalStatus, MARITAL_STATUS),
        occupation: EncodingTable::build(CategoricalField::Occupation, OCCUPATION),
        relationship: EncodingTable::build(CategoricalField::Relationship, RELATIONSHIP),
        race: EncodingTable::build(CategoricalField::Race, RACE),
        gender: EncodingTable::build(CategoricalField::Gender, GENDER),
        native_country: EncodingTable::build(CategoricalField::NativeCountry, NATIVE_COUNTRY),
    }
});

/// Process-wide encoding tables.
pub fn tables() -> &'static EncodingTables {
    &TABLES
}

impl EncodingTables {
    pub fn get(&self, field: CategoricalField) -> &EncodingTable {
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
}
