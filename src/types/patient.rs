//! Patient records held in the local store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient gender as accepted at the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Accepts `m`/`f` in either case, ignoring surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            other => Err(format!("invalid gender '{}'", other)),
        }
    }
}

/// One row of the `patients` table
///
/// Gender is kept as stored text: the table itself does not constrain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub symptom1: Option<String>,
    pub symptom2: Option<String>,
    pub symptom3: Option<String>,
    pub diagnosis: Option<String>,
    pub diagnosis_explain: Option<String>,
}

impl PatientRecord {
    /// Gender parsed into the input-side enum, if the stored value is valid
    pub fn parsed_gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(|g| g.parse().ok())
    }

    /// Whether the row carries a diagnosis usable for training
    pub fn is_labelled(&self) -> bool {
        self.diagnosis.as_deref().map_or(false, |d| !d.trim().is_empty())
    }
}
