// File: src/memory.rs
// Purpose: In-memory FormAdapter for server-side checks and tests

use std::collections::HashMap;

use crate::{Activity, FieldState, FormAdapter, FormError, SelectOption};

#[derive(Debug, Clone)]
struct Control {
    value: String,
    enabled: bool,
    select: Option<Vec<(SelectOption, bool)>>,
}

impl Control {
    fn input(value: &str) -> Self {
        Self {
            value: value.to_string(),
            enabled: true,
            select: None,
        }
    }
}

/// A form held entirely in memory.
///
/// Mirrors what the browser adapter does to the page so the controller can be driven
/// without a document. [`MemoryForm::registration`] builds the conference form.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    controls: HashMap<String, Control>,
    sections: HashMap<String, bool>,
    activities: Vec<Activity>,
    focused_activity: Option<String>,
    texts: HashMap<String, String>,
    states: HashMap<String, FieldState>,
    focused: Option<String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registration form with every control the default configuration expects
    pub fn registration() -> Self {
        let slot_am = Some("Tuesday 9am-12pm");
        let slot_pm = Some("Tuesday 1pm-4pm");

        Self::new()
            .with_input("name", "")
            .with_input("email", "")
            .with_select(
                "title",
                vec![
                    SelectOption::new("full-stack js developer"),
                    SelectOption::new("front-end developer"),
                    SelectOption::new("back-end developer"),
                    SelectOption::new("designer"),
                    SelectOption::new("student"),
                    SelectOption::new("other"),
                ],
            )
            .with_input("other-job-role", "")
            .with_section("#other-job-role")
            .with_select(
                "design",
                vec![
                    SelectOption::new("Select Theme"),
                    SelectOption::new("js puns"),
                    SelectOption::new("heart js"),
                ],
            )
            .with_select(
                "color",
                vec![
                    SelectOption::new("Select a design theme above"),
                    SelectOption::themed("cornflowerblue", "js puns"),
                    SelectOption::themed("darkslategrey", "js puns"),
                    SelectOption::themed("gold", "js puns"),
                    SelectOption::themed("tomato", "heart js"),
                    SelectOption::themed("steelblue", "heart js"),
                    SelectOption::themed("dimgrey", "heart js"),
                ],
            )
            .with_select(
                "payment",
                vec![
                    SelectOption::new("select method"),
                    SelectOption::new("credit-card"),
                    SelectOption::new("paypal"),
                    SelectOption::new("bitcoin"),
                ],
            )
            .with_input("cc-num", "")
            .with_input("zip", "")
            .with_input("cvv", "")
            .with_section(".month-box")
            .with_section(".year-box")
            .with_section(".credit-card-box")
            .with_section(".paypal")
            .with_section(".bitcoin")
            .with_group("activities")
            .with_group("activities-box")
            .with_activity(Activity::new("all", 200, None))
            .with_activity(Activity::new("js-frameworks", 100, slot_am))
            .with_activity(Activity::new("js-libs", 100, slot_pm))
            .with_activity(Activity::new("express", 100, slot_am))
            .with_activity(Activity::new("node", 100, slot_pm))
            .with_activity(Activity::new("build-tools", 100, Some("Wednesday 9am-12pm")))
            .with_activity(Activity::new("npm", 100, Some("Wednesday 1pm-4pm")))
            .with_text("activities-cost")
    }

    pub fn with_input(mut self, id: &str, value: &str) -> Self {
        self.controls.insert(id.to_string(), Control::input(value));
        self
    }

    /// A select list; the first option starts selected
    pub fn with_select(mut self, id: &str, mut options: Vec<SelectOption>) -> Self {
        if !options.iter().any(|o| o.selected) {
            if let Some(first) = options.first_mut() {
                first.selected = true;
            }
        }
        let control = Control {
            value: String::new(),
            enabled: true,
            select: Some(options.into_iter().map(|o| (o, true)).collect()),
        };
        self.controls.insert(id.to_string(), control);
        self
    }

    /// A container that carries error state but no value
    pub fn with_group(self, id: &str) -> Self {
        self.with_input(id, "")
    }

    /// A section toggled by selector, initially visible
    pub fn with_section(mut self, selector: &str) -> Self {
        self.sections.insert(selector.to_string(), true);
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn with_text(mut self, id: &str) -> Self {
        self.texts.insert(id.to_string(), String::new());
        self
    }

    /// Tick or clear a checkbox the way a user would. Disabled boxes ignore the click.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), FormError> {
        let activity = self.activity_mut(name)?;
        if activity.enabled {
            activity.checked = checked;
        }
        Ok(())
    }

    pub fn is_visible(&self, selector: &str) -> Option<bool> {
        self.sections.get(selector).copied()
    }

    pub fn is_enabled(&self, id: &str) -> Option<bool> {
        self.controls.get(id).map(|c| c.enabled)
    }

    pub fn is_option_visible(&self, id: &str, index: usize) -> Option<bool> {
        self.controls
            .get(id)
            .and_then(|c| c.select.as_ref())
            .and_then(|opts| opts.get(index))
            .map(|(_, visible)| *visible)
    }

    pub fn activity(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn focused_activity(&self) -> Option<&str> {
        self.focused_activity.as_deref()
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    /// Rendered state, `None` until the field has been validated
    pub fn state(&self, id: &str) -> Option<&FieldState> {
        self.states.get(id)
    }

    pub fn invalid_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self
            .states
            .iter()
            .filter(|(_, s)| s.is_invalid())
            .map(|(id, _)| id.as_str())
            .collect();
        fields.sort_unstable();
        fields
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    fn control(&self, id: &str) -> Result<&Control, FormError> {
        self.controls
            .get(id)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    }

    fn control_mut(&mut self, id: &str) -> Result<&mut Control, FormError> {
        self.controls
            .get_mut(id)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    }

    fn select_mut(&mut self, id: &str) -> Result<&mut Vec<(SelectOption, bool)>, FormError> {
        self.control_mut(id)?
            .select
            .as_mut()
            .ok_or_else(|| FormError::UnsupportedElement(id.to_string()))
    }

    fn activity_mut(&mut self, name: &str) -> Result<&mut Activity, FormError> {
        self.activities
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| FormError::MissingElement(name.to_string()))
    }
}

impl FormAdapter for MemoryForm {
    fn value(&self, id: &str) -> Result<String, FormError> {
        let control = self.control(id)?;
        Ok(match &control.select {
            Some(opts) => opts
                .iter()
                .find(|(o, _)| o.selected)
                .map(|(o, _)| o.value.clone())
                .unwrap_or_default(),
            None => control.value.clone(),
        })
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), FormError> {
        let control = self.control_mut(id)?;
        match control.select.as_mut() {
            Some(opts) => {
                for (option, _) in opts.iter_mut() {
                    option.selected = option.value == value;
                }
            }
            None => control.value = value.to_string(),
        }
        Ok(())
    }

    fn options(&self, id: &str) -> Result<Vec<SelectOption>, FormError> {
        self.control(id)?
            .select
            .as_ref()
            .map(|opts| opts.iter().map(|(o, _)| o.clone()).collect())
            .ok_or_else(|| FormError::UnsupportedElement(id.to_string()))
    }

    fn select_index(&mut self, id: &str, index: usize) -> Result<(), FormError> {
        let opts = self.select_mut(id)?;
        if index >= opts.len() {
            return Err(FormError::MissingElement(format!("{}[{}]", id, index)));
        }
        for (i, (option, _)) in opts.iter_mut().enumerate() {
            option.selected = i == index;
        }
        Ok(())
    }

    fn set_option_visible(
        &mut self,
        id: &str,
        index: usize,
        visible: bool,
    ) -> Result<(), FormError> {
        let opts = self.select_mut(id)?;
        let (_, shown) = opts
            .get_mut(index)
            .ok_or_else(|| FormError::MissingElement(format!("{}[{}]", id, index)))?;
        *shown = visible;
        Ok(())
    }

    fn set_visible(&mut self, selector: &str, visible: bool) -> Result<(), FormError> {
        let shown = self
            .sections
            .get_mut(selector)
            .ok_or_else(|| FormError::MissingElement(selector.to_string()))?;
        *shown = visible;
        Ok(())
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), FormError> {
        self.control_mut(id)?.enabled = enabled;
        Ok(())
    }

    fn activities(&self) -> Result<Vec<Activity>, FormError> {
        Ok(self.activities.clone())
    }

    fn set_activity_enabled(&mut self, name: &str, enabled: bool) -> Result<(), FormError> {
        self.activity_mut(name)?.enabled = enabled;
        Ok(())
    }

    fn set_activity_focus(&mut self, name: &str, focused: bool) -> Result<(), FormError> {
        self.activity_mut(name)?;
        if focused {
            self.focused_activity = Some(name.to_string());
        } else if self.focused_activity.as_deref() == Some(name) {
            self.focused_activity = None;
        }
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), FormError> {
        let slot = self
            .texts
            .get_mut(id)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))?;
        *slot = text.to_string();
        Ok(())
    }

    fn set_field_error(&mut self, id: &str, message: Option<&str>) -> Result<(), FormError> {
        self.control(id)?;
        let state = match message {
            Some(msg) => FieldState::Invalid(msg.to_string()),
            None => FieldState::Valid,
        };
        self.states.insert(id.to_string(), state);
        Ok(())
    }

    fn is_marked_invalid(&self, id: &str) -> Result<bool, FormError> {
        self.control(id)?;
        Ok(self.states.get(id).is_some_and(FieldState::is_invalid))
    }

    fn focus(&mut self, id: &str) -> Result<(), FormError> {
        self.control(id)?;
        self.focused = Some(id.to_string());
        Ok(())
    }
}
