//! The narrow interface between the controller and the page.

use crate::FormError;

/// One `<option>` of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    /// `data-theme` tag; `None` for untagged options
    pub theme: Option<String>,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            theme: None,
            selected: false,
        }
    }

    pub fn themed(value: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
            ..Self::new(value)
        }
    }
}

/// Snapshot of one activity checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    /// `data-cost` in cents; checkboxes without it never count towards the total
    pub cost: Option<u64>,
    /// `data-day-and-time`
    pub time_slot: Option<String>,
    pub checked: bool,
    pub enabled: bool,
}

impl Activity {
    /// An activity costing whole `dollars`
    pub fn new(name: impl Into<String>, dollars: u32, time_slot: Option<&str>) -> Self {
        Self {
            name: name.into(),
            cost: Some(u64::from(dollars) * 100),
            time_slot: time_slot.map(str::to_string),
            checked: false,
            enabled: true,
        }
    }
}

/// Read and mutate the registration form.
///
/// Element ids and selectors come from [`crate::FormConfig`]; an id the page does not
/// have is reported as [`FormError::MissingElement`].
pub trait FormAdapter {
    /// Current value of a text input or select list.
    fn value(&self, id: &str) -> Result<String, FormError>;

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), FormError>;

    /// Options of a select list, in document order.
    fn options(&self, id: &str) -> Result<Vec<SelectOption>, FormError>;

    fn select_index(&mut self, id: &str, index: usize) -> Result<(), FormError>;

    fn set_option_visible(&mut self, id: &str, index: usize, visible: bool)
        -> Result<(), FormError>;

    /// Show or hide every element matching `selector`.
    fn set_visible(&mut self, selector: &str, visible: bool) -> Result<(), FormError>;

    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), FormError>;

    /// All activity checkboxes, in document order.
    fn activities(&self) -> Result<Vec<Activity>, FormError>;

    /// Enable or disable a checkbox, marking it (and its label) disabled.
    fn set_activity_enabled(&mut self, name: &str, enabled: bool) -> Result<(), FormError>;

    fn set_activity_focus(&mut self, name: &str, focused: bool) -> Result<(), FormError>;

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), FormError>;

    /// Render a field as invalid with `message`, or as valid when `None`.
    fn set_field_error(&mut self, id: &str, message: Option<&str>) -> Result<(), FormError>;

    fn is_marked_invalid(&self, id: &str) -> Result<bool, FormError>;

    fn focus(&mut self, id: &str) -> Result<(), FormError>;
}
