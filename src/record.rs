//! Employee record as stored
//!
//! The JSON shape matches what a date/radio/checkbox form produces:
//! `dob` is an ISO `YYYY-MM-DD` string, `gender` the radio label and
//! `hobbies` the checked labels.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender radio choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person's form data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub email: String,
    pub phone: String,
    /// Checked hobby labels; order is not significant
    #[serde(default)]
    pub hobbies: BTreeSet<String>,
}

impl EmployeeRecord {
    /// Hobbies as shown in both tables
    pub fn hobbies_display(&self) -> String {
        self.hobbies
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Date of birth as the date input expects it
    pub fn dob_display(&self) -> String {
        self.dob.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_form_json() {
        let json = r#"{
            "name": "Jane Doe",
            "gender": "Female",
            "dob": "1990-04-12",
            "email": "jane@example.com",
            "phone": "5551234567",
            "hobbies": ["Reading", "Music", "Reading"]
        }"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.dob, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
        assert_eq!(record.hobbies.len(), 2);
        assert_eq!(record.hobbies_display(), "Music, Reading");
    }

    #[test]
    fn test_missing_hobbies_defaults_empty() {
        let json = r#"{"name":"Jane Doe","gender":"Male","dob":"1990-04-12",
            "email":"j@x.io","phone":"5551234567"}"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert!(record.hobbies.is_empty());
        assert_eq!(record.hobbies_display(), "");
    }

    #[test]
    fn test_dob_serializes_as_iso_date() {
        let record = EmployeeRecord {
            name: "Jane Doe".into(),
            gender: Gender::Male,
            dob: NaiveDate::from_ymd_opt(2001, 2, 3).unwrap(),
            email: "j@x.io".into(),
            phone: "5551234567".into(),
            hobbies: BTreeSet::new(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""dob":"2001-02-03""#));
        assert!(json.contains(r#""gender":"Male""#));
        assert_eq!(record.dob_display(), "2001-02-03");
    }

    #[test]
    fn test_gender_from_label() {
        assert_eq!(Gender::from_label(" Male "), Some(Gender::Male));
        assert_eq!(Gender::from_label("f"), Some(Gender::Female));
        assert_eq!(Gender::from_label("other"), None);
    }
}
