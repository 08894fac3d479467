//! Per-field error state rendering

use crate::{FormAdapter, FormError, FormErrors};

/// Rendered state of a validated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid(String),
}

impl FieldState {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid(_))
    }
}

/// Bring every field in `scope` in line with `errors`: failing fields get the marker
/// and message, the rest are cleared.
pub fn render_errors<A, S>(form: &mut A, scope: &[S], errors: &FormErrors) -> Result<(), FormError>
where
    A: FormAdapter + ?Sized,
    S: AsRef<str>,
{
    for field in scope {
        let field = field.as_ref();
        form.set_field_error(field, errors.get(field))?;
    }
    Ok(())
}
