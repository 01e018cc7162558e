//! Form controller
//!
//! Holds the raw text of every input, the current failing fields and the
//! index being edited (if any). Keystrokes re-validate one field; submit
//! re-validates all of them and upserts into the store when none fail.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{FieldError, FieldErrors, FormError, StoreError};
use crate::persistence::KeyValueStore;
use crate::record::{EmployeeRecord, Gender};
use crate::store::RecordStore;
use crate::validation::{self, Field};

/// Raw input values as typed/checked by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub gender: Option<Gender>,
    pub dob: String,
    pub email: String,
    pub phone: String,
    pub hobbies: BTreeSet<String>,
}

impl FormInput {
    /// Raw text of a validated field
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Dob => &self.dob,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn raw_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Dob => &mut self.dob,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    /// Inputs pre-filled from a stored record (edit)
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            name: record.name.clone(),
            gender: Some(record.gender),
            dob: record.dob_display(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            hobbies: record.hobbies.clone(),
        }
    }
}

/// Label recorded for a checked choice: the text next to the box, or its
/// `value` when that text is blank.
pub fn choice_label(label_text: Option<&str>, value: &str) -> String {
    label_text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| value.trim())
        .to_string()
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    input: FormInput,
    errors: FieldErrors,
    editing: Option<usize>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Fields currently failing
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Index of the record loaded for editing
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Keystroke on a validated field: store the text and re-check it
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
        today: NaiveDate,
    ) -> Result<(), FieldError> {
        *self.input.raw_mut(field) = value.into();
        self.check(field, today)
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.input.gender = gender;
    }

    pub fn set_hobby(&mut self, label: &str, checked: bool) {
        if checked {
            self.input.hobbies.insert(label.to_string());
        } else {
            self.input.hobbies.remove(label);
        }
    }

    pub fn set_hobbies<I, T>(&mut self, labels: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.input.hobbies = labels.into_iter().map(Into::into).collect();
    }

    fn check(&mut self, field: Field, today: NaiveDate) -> Result<(), FieldError> {
        match validation::validate(field, self.input.raw(field), today) {
            Ok(()) => {
                self.errors.remove(&field);
                Ok(())
            }
            Err(e) => {
                self.errors.insert(field, e);
                Err(e)
            }
        }
    }

    /// Re-check every field; `true` when none fail
    pub fn validate_all(&mut self, today: NaiveDate) -> bool {
        let input = &self.input;
        self.errors = validation::validate_all(|field| input.raw(field), today);
        self.errors.is_empty()
    }

    /// Validate everything and upsert at the editing index (or append).
    ///
    /// On success the form is reset and the written index returned. On
    /// failure the inputs stay as they are.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut RecordStore<S>,
        today: NaiveDate,
    ) -> Result<usize, FormError> {
        if !self.validate_all(today) {
            return Err(FormError::Invalid(self.errors.clone()));
        }
        let gender = self.input.gender.ok_or(FormError::GenderNotSelected)?;
        let dob = validation::validate_dob(&self.input.dob, today)
            .map_err(|e| FormError::Invalid(FieldErrors::from([(Field::Dob, e)])))?;

        let record = EmployeeRecord {
            name: self.input.name.clone(),
            gender,
            dob,
            email: self.input.email.clone(),
            phone: self.input.phone.clone(),
            hobbies: self.input.hobbies.clone(),
        };
        let index = store.upsert(record, self.editing)?;
        self.reset();
        Ok(index)
    }

    /// Load the record at `index` into the inputs and mark it as edited
    pub fn begin_edit<S: KeyValueStore>(
        &mut self,
        store: &RecordStore<S>,
        index: usize,
    ) -> Result<(), StoreError> {
        let record = store.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: store.len(),
        })?;
        self.input = FormInput::from_record(record);
        self.errors.clear();
        self.editing = Some(index);
        log::debug!("Editing employee at index {}", index);
        Ok(())
    }

    /// Clear inputs, errors and the editing index
    pub fn reset(&mut self) {
        self.input = FormInput::default();
        self.errors.clear();
        self.editing = None;
    }

    /// Keep the editing index pointing at the same record after a delete
    pub fn record_deleted(&mut self, index: usize) {
        self.editing = match self.editing {
            Some(editing) if editing == index => {
                log::info!("Edited employee was deleted, edit cancelled");
                None
            }
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::store::tests::employee;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 10).unwrap()
    }

    fn fill(form: &mut FormController, name: &str) {
        form.set_field(Field::Name, name, today()).unwrap();
        form.set_field(Field::Dob, "1992-06-15", today()).unwrap();
        form.set_field(Field::Email, "worker@example.com", today()).unwrap();
        form.set_field(Field::Phone, "5550001111", today()).unwrap();
        form.set_gender(Some(Gender::Male));
        form.set_hobbies(["Sports", "Music"]);
    }

    fn open_store() -> RecordStore<MemoryStore> {
        RecordStore::open(MemoryStore::new(), "employees").unwrap()
    }

    #[test]
    fn test_keystroke_tracks_error_state() {
        let mut form = FormController::new();
        assert_eq!(form.set_field(Field::Name, "Jo", today()), Err(FieldError::Name));
        assert_eq!(form.error(Field::Name), Some(FieldError::Name));
        assert!(form.set_field(Field::Name, "John", today()).is_ok());
        assert_eq!(form.error(Field::Name), None);
        assert_eq!(form.input().name, "John");
    }

    #[test]
    fn test_submit_appends_and_resets() {
        let mut store = open_store();
        store.upsert(employee("Existing"), None).unwrap();
        let mut form = FormController::new();
        fill(&mut form, "New Hire");

        assert_eq!(form.submit(&mut store, today()).unwrap(), 1);
        assert_eq!(store.len(), 2);
        let stored = store.get(1).unwrap();
        assert_eq!(stored.name, "New Hire");
        assert_eq!(stored.gender, Gender::Male);
        assert_eq!(stored.dob, NaiveDate::from_ymd_opt(1992, 6, 15).unwrap());
        assert_eq!(stored.hobbies_display(), "Music, Sports");
        assert_eq!(form.input(), &FormInput::default());
        assert_eq!(form.editing(), None);
    }

    #[test]
    fn test_submit_blocked_by_any_failing_field() {
        let mut store = open_store();
        let mut form = FormController::new();
        fill(&mut form, "Valid Name");
        let _ = form.set_field(Field::Phone, "12345", today());

        let err = form.submit(&mut store, today()).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Phone), Some(&FieldError::Phone));
        assert!(store.is_empty());
        assert_eq!(form.input().phone, "12345");
    }

    #[test]
    fn test_submit_untouched_form_reports_all_fields() {
        let mut store = open_store();
        let mut form = FormController::new();
        let err = form.submit(&mut store, today()).unwrap_err();
        assert_eq!(err.field_errors().map(|e| e.len()), Some(4));
        assert_eq!(form.errors().len(), 4);
    }

    #[test]
    fn test_submit_requires_gender() {
        let mut store = open_store();
        let mut form = FormController::new();
        fill(&mut form, "Valid Name");
        form.set_gender(None);
        assert!(matches!(
            form.submit(&mut store, today()),
            Err(FormError::GenderNotSelected)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_overwrites_without_changing_count() {
        let mut store = open_store();
        for name in ["Alice", "Bob", "Carol"] {
            store.upsert(employee(name), None).unwrap();
        }
        let mut form = FormController::new();
        form.begin_edit(&store, 1).unwrap();
        assert_eq!(form.editing(), Some(1));
        assert_eq!(form.input().name, "Bob");
        assert_eq!(form.input().dob, "1990-01-01");

        form.set_field(Field::Name, "Robert", today()).unwrap();
        assert_eq!(form.submit(&mut store, today()).unwrap(), 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().name, "Robert");
        assert_eq!(store.get(1).unwrap().email, "someone@example.com");
        assert_eq!(form.editing(), None);
    }

    #[test]
    fn test_begin_edit_out_of_range() {
        let store = open_store();
        let mut form = FormController::new();
        assert!(matches!(
            form.begin_edit(&store, 0),
            Err(StoreError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert_eq!(form.editing(), None);
    }

    #[test]
    fn test_record_deleted_adjusts_editing() {
        let mut form = FormController::new();
        form.editing = Some(2);
        form.record_deleted(3);
        assert_eq!(form.editing(), Some(2));
        form.record_deleted(0);
        assert_eq!(form.editing(), Some(1));
        form.record_deleted(1);
        assert_eq!(form.editing(), None);
    }

    #[test]
    fn test_choice_label_prefers_label_text() {
        assert_eq!(choice_label(Some(" Reading\n"), "reading"), "Reading");
        assert_eq!(choice_label(Some("   "), "music"), "music");
        assert_eq!(choice_label(None, " travel "), "travel");
    }

    #[test]
    fn test_set_hobby_toggles() {
        let mut form = FormController::new();
        form.set_hobby("Reading", true);
        form.set_hobby("Travel", true);
        form.set_hobby("Reading", false);
        assert_eq!(
            form.input().hobbies.iter().collect::<Vec<_>>(),
            ["Travel"]
        );
    }
}
