// File: src/error.rs
// Purpose: Integration errors raised while driving the form

use thiserror::Error;

/// Errors caused by a mismatch between the configuration and the host page.
///
/// Failed user input is never reported here; that is a [`crate::FormErrors`] value.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("element `{0}` not found in the form")]
    MissingElement(String),

    #[error("element `{0}` is not a form control this adapter can read")]
    UnsupportedElement(String),

    #[error("invalid pattern for field `{field}`: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("activity `{name}` has a non-numeric cost `{raw}`")]
    InvalidCost { name: String, raw: String },

    #[error("activity total does not fit in the cost range")]
    CostOverflow,

    #[error("host call failed: {0}")]
    Js(String),
}
