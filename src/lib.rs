//! Employee Form - employee records with validation and local persistence
//!
//! Core modules:
//! - `validation`: Per-field predicates (name, date of birth, email, phone)
//! - `form`: Raw input state, error state and the editing index
//! - `store`: Ordered record list mirrored into one key-value slot
//! - `persistence`: Key-value backends (memory, files, LocalStorage)
//! - `render`: Row-per-employee and field-per-employee table views
//! - `app`: Store + form + clock behind one event-level API

pub mod app;
pub mod error;
pub mod form;
pub mod persistence;
pub mod record;
pub mod render;
pub mod settings;
pub mod store;
pub mod validation;

pub use app::{App, Clock, FixedClock, SystemClock};
pub use error::{FieldError, FieldErrors, FormError, StorageError, StoreError};
pub use form::{FormController, FormInput, choice_label};
pub use persistence::{KeyValueStore, MemoryStore};
pub use record::{EmployeeRecord, Gender};
pub use render::{AdvancedTable, BasicTable, EMPTY_PLACEHOLDER, FIELD_LABELS};
pub use settings::Settings;
pub use store::RecordStore;
pub use validation::Field;

#[cfg(not(target_arch = "wasm32"))]
pub use persistence::FileStore;
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStore;
