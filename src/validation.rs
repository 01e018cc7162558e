//! Field predicates
//!
//! Each validated field has one pure check over its raw text value and one
//! failure message (see [`FieldError`]). Checks are independent: no field
//! looks at another. The form re-runs a field's check on every keystroke
//! and all of them on submit.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FieldError, FieldErrors};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]{4,20}$").expect("name pattern"));

// ASCII word classes; `\w` in `regex` is Unicode-aware.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").expect("email pattern")
});

// chrono skips leading whitespace before numbers, so pin the shape first.
static DOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("dob pattern"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern"));

/// Date format produced by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields that carry a validation predicate, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Dob,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Dob, Field::Email, Field::Phone];

    /// Input element id (error slot is `{id}Error`)
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Dob => "dob",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.id() == s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 4-20 ASCII letters, digits or spaces
pub fn validate_name(raw: &str) -> Result<(), FieldError> {
    if NAME_RE.is_match(raw) {
        Ok(())
    } else {
        Err(FieldError::Name)
    }
}

/// ISO date strictly before `today`. Unparsable input fails the same way.
pub fn validate_dob(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    if !DOB_RE.is_match(raw) {
        return Err(FieldError::Dob);
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(dob) if dob < today => Ok(dob),
        _ => Err(FieldError::Dob),
    }
}

pub fn validate_email(raw: &str) -> Result<(), FieldError> {
    if EMAIL_RE.is_match(raw) {
        Ok(())
    } else {
        Err(FieldError::Email)
    }
}

/// Exactly 10 ASCII digits
pub fn validate_phone(raw: &str) -> Result<(), FieldError> {
    if PHONE_RE.is_match(raw) {
        Ok(())
    } else {
        Err(FieldError::Phone)
    }
}

/// Run the predicate for `field` against `raw`
pub fn validate(field: Field, raw: &str, today: NaiveDate) -> Result<(), FieldError> {
    match field {
        Field::Name => validate_name(raw),
        Field::Dob => validate_dob(raw, today).map(|_| ()),
        Field::Email => validate_email(raw),
        Field::Phone => validate_phone(raw),
    }
}

/// Run every predicate; returns the failing fields
pub fn validate_all<'a>(
    mut raw: impl FnMut(Field) -> &'a str,
    today: NaiveDate,
) -> FieldErrors {
    Field::ALL
        .into_iter()
        .filter_map(|field| validate(field, raw(field), today).err().map(|e| (field, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 10).unwrap()
    }

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("abc").is_err());
        assert!(validate_name("abcd").is_ok());
        assert!(validate_name(&"a".repeat(20)).is_ok());
        assert!(validate_name(&"a".repeat(21)).is_err());
        assert!(validate_name("John Smith 2").is_ok());
        assert!(validate_name("O'Brien").is_err());
        assert!(validate_name("Jane-Doe").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_dob_must_be_past() {
        assert!(validate_dob("2024-10-10", today()).is_err());
        assert!(validate_dob("2024-10-11", today()).is_err());
        assert_eq!(
            validate_dob("2024-10-09", today()),
            Ok(NaiveDate::from_ymd_opt(2024, 10, 9).unwrap())
        );
        assert!(validate_dob("1950-01-01", today()).is_ok());
    }

    #[test]
    fn test_dob_unparsable() {
        assert_eq!(validate_dob("", today()), Err(FieldError::Dob));
        assert_eq!(validate_dob("10/09/2024", today()), Err(FieldError::Dob));
        assert_eq!(validate_dob("2024-02-30", today()), Err(FieldError::Dob));
        assert_eq!(validate_dob(" 1990-01-01", today()), Err(FieldError::Dob));
        assert_eq!(validate_dob("1990-01-01 ", today()), Err(FieldError::Dob));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane.doe-1@mail.example.info").is_ok());
        assert!(validate_email("jane.example.com").is_err());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("jane@example.c").is_err());
        assert!(validate_email("jane@example.comxx").is_err());
        assert!(validate_email("ja ne@example.com").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("555123456").is_err());
        assert!(validate_phone("55512345678").is_err());
        assert!(validate_phone("555-123-4567").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_all_collects_failures() {
        let errors = validate_all(
            |field| match field {
                Field::Name => "ab",
                Field::Dob => "2000-01-01",
                Field::Email => "nope",
                Field::Phone => "5551234567",
            },
            today(),
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(&Field::Name), Some(&FieldError::Name));
        assert_eq!(errors.get(&Field::Email), Some(&FieldError::Email));
    }

    #[test]
    fn test_field_ids() {
        for field in Field::ALL {
            assert_eq!(Field::from_id(field.id()), Some(field));
        }
        assert_eq!(Field::from_id("gender"), None);
    }

    proptest! {
        #[test]
        fn prop_name_charset_in_bounds_accepted(name in "[A-Za-z0-9 ]{4,20}") {
            prop_assert!(validate_name(&name).is_ok());
        }

        #[test]
        fn prop_name_out_of_bounds_rejected(
            name in prop_oneof!["[A-Za-z0-9 ]{0,3}", "[A-Za-z0-9 ]{21,40}"]
        ) {
            prop_assert!(validate_name(&name).is_err());
        }

        #[test]
        fn prop_name_with_punctuation_rejected(
            head in "[A-Za-z0-9]{2,8}",
            punct in "[!-/:-@]",
            tail in "[A-Za-z0-9]{2,8}",
        ) {
            let name = format!("{head}{punct}{tail}");
            prop_assert!(validate_name(&name).is_err());
        }

        #[test]
        fn prop_dob_before_today_accepted(days in 1i64..40_000) {
            let dob = today() - chrono::Duration::days(days);
            let raw = dob.format(DATE_FORMAT).to_string();
            prop_assert_eq!(validate_dob(&raw, today()), Ok(dob));
        }

        #[test]
        fn prop_dob_today_or_later_rejected(days in 0i64..40_000) {
            let dob = today() + chrono::Duration::days(days);
            let raw = dob.format(DATE_FORMAT).to_string();
            prop_assert!(validate_dob(&raw, today()).is_err());
        }

        #[test]
        fn prop_phone_wrong_length_rejected(phone in "[0-9]{0,9}|[0-9]{11,15}") {
            prop_assert!(validate_phone(&phone).is_err());
        }

        #[test]
        fn prop_phone_ten_digits_accepted(phone in "[0-9]{10}") {
            prop_assert!(validate_phone(&phone).is_ok());
        }
    }
}
