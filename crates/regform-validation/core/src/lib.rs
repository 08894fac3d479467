//! Registration form validation core
//!
//! Pure Rust rule table, dependent-field rules and the interaction controller for the
//! conference registration form. Everything talks to the page through [`FormAdapter`],
//! so the same logic runs against the browser DOM (see `regform-validation-wasm`) and
//! against [`MemoryForm`] on the server or in tests.

pub mod activities;
pub mod adapter;
pub mod config;
pub mod controller;
pub mod error;
pub mod memory;
pub mod render;
pub mod rules;
pub mod visibility;

pub use activities::{conflict_updates, format_total, parse_cost, total_cost};
pub use adapter::{Activity, FormAdapter, SelectOption};
pub use config::{FieldIds, FormConfig, PaymentOption};
pub use controller::{Controller, SubmitOutcome};
pub use error::FormError;
pub use memory::MemoryForm;
pub use render::FieldState;
pub use rules::{Condition, FieldError, FieldRule, FormErrors, RuleTable, Validator};
