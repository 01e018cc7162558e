//! App facade
//!
//! One record store, one form and a clock. Each UI event maps to one
//! method; callers re-render the tables after every mutation.

use chrono::NaiveDate;

use crate::error::{FieldError, FormError, StoreError};
use crate::form::FormController;
use crate::persistence::KeyValueStore;
use crate::record::{EmployeeRecord, Gender};
use crate::render::{AdvancedTable, BasicTable};
use crate::store::RecordStore;
use crate::validation::Field;

/// Source of "today" for the date of birth check
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date (browser clock on wasm32)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug)]
pub struct App<S: KeyValueStore, C: Clock = SystemClock> {
    store: RecordStore<S>,
    form: FormController,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    /// Load the record list under `key` with an empty form
    pub fn open(storage: S, key: &str, clock: C) -> Result<Self, StoreError> {
        Ok(Self {
            store: RecordStore::open(storage, key)?,
            form: FormController::new(),
            clock,
        })
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Keystroke in a validated input
    pub fn input(&mut self, field: Field, value: impl Into<String>) -> Result<(), FieldError> {
        let today = self.clock.today();
        self.form.set_field(field, value, today)
    }

    pub fn select_gender(&mut self, gender: Option<Gender>) {
        self.form.set_gender(gender);
    }

    pub fn toggle_hobby(&mut self, label: &str, checked: bool) {
        self.form.set_hobby(label, checked);
    }

    pub fn set_hobbies<I, T>(&mut self, labels: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.form.set_hobbies(labels);
    }

    /// Upsert the form contents; returns the index written
    pub fn submit(&mut self) -> Result<usize, FormError> {
        let today = self.clock.today();
        self.form.submit(&mut self.store, today)
    }

    /// Load a record into the form for editing
    pub fn edit(&mut self, index: usize) -> Result<(), StoreError> {
        self.form.begin_edit(&self.store, index)
    }

    pub fn delete(&mut self, index: usize) -> Result<EmployeeRecord, StoreError> {
        let removed = self.store.delete(index)?;
        self.form.record_deleted(index);
        Ok(removed)
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    pub fn basic_table(&self) -> BasicTable {
        BasicTable::from_records(self.store.records())
    }

    pub fn advanced_table(&self) -> AdvancedTable {
        AdvancedTable::from_records(self.store.records())
    }
}
