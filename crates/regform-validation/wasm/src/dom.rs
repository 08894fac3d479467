//! `FormAdapter` over the live document

use regform_validation_core::{parse_cost, Activity, FormAdapter, FormError, SelectOption};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

const INVALID_CLASS: &str = "not-valid";
const VALID_CLASS: &str = "valid";
const DISABLED_CLASS: &str = "disabled";
const FOCUS_CLASS: &str = "focus";

/// Reads and writes the registration form through web-sys.
///
/// Error markers go on the field's parent element; its last child holds the message.
#[derive(Debug, Clone)]
pub struct DomForm {
    document: Document,
    activities: String,
}

pub(crate) fn js_err(err: JsValue) -> FormError {
    FormError::Js(format!("{:?}", err))
}

fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), FormError> {
    el.style().set_property(property, value).map_err(js_err)
}

fn toggle_class(el: &Element, class: &str, on: bool) -> Result<(), FormError> {
    el.class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(js_err)
}

impl DomForm {
    /// `activities` is the id of the element holding the activity checkboxes
    pub fn new(document: Document, activities: &str) -> Self {
        Self {
            document,
            activities: activities.to_string(),
        }
    }

    pub fn from_window(activities: &str) -> Result<Self, FormError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FormError::MissingElement("document".to_string()))?;
        Ok(Self::new(document, activities))
    }

    fn element(&self, id: &str) -> Result<Element, FormError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    }

    fn select(&self, id: &str) -> Result<HtmlSelectElement, FormError> {
        self.element(id)?
            .dyn_into::<HtmlSelectElement>()
            .map_err(|_| FormError::UnsupportedElement(id.to_string()))
    }

    fn option(&self, id: &str, index: usize) -> Result<HtmlOptionElement, FormError> {
        self.select(id)?
            .item(index as u32)
            .and_then(|el| el.dyn_into::<HtmlOptionElement>().ok())
            .ok_or_else(|| FormError::MissingElement(format!("{}[{}]", id, index)))
    }

    fn checkboxes(&self) -> Result<Vec<HtmlInputElement>, FormError> {
        let list = self
            .element(&self.activities)?
            .query_selector_all("input[type=\"checkbox\"]")
            .map_err(js_err)?;

        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .collect())
    }

    fn checkbox(&self, name: &str) -> Result<HtmlInputElement, FormError> {
        self.checkboxes()?
            .into_iter()
            .find(|cb| cb.name() == name)
            .ok_or_else(|| FormError::MissingElement(name.to_string()))
    }

    fn field_parent(&self, id: &str) -> Result<Element, FormError> {
        self.element(id)?
            .parent_element()
            .ok_or_else(|| FormError::MissingElement(format!("parent of {}", id)))
    }
}

impl FormAdapter for DomForm {
    fn value(&self, id: &str) -> Result<String, FormError> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            Ok(input.value())
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            Ok(select.value())
        } else {
            Err(FormError::UnsupportedElement(id.to_string()))
        }
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), FormError> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else {
            return Err(FormError::UnsupportedElement(id.to_string()));
        }
        Ok(())
    }

    fn options(&self, id: &str) -> Result<Vec<SelectOption>, FormError> {
        let select = self.select(id)?;
        (0..select.length() as usize)
            .map(|i| {
                let option = self.option(id, i)?;
                Ok(SelectOption {
                    value: option.value(),
                    theme: option.get_attribute("data-theme"),
                    selected: option.selected(),
                })
            })
            .collect()
    }

    fn select_index(&mut self, id: &str, index: usize) -> Result<(), FormError> {
        self.select(id)?.set_selected_index(index as i32);
        Ok(())
    }

    fn set_option_visible(
        &mut self,
        id: &str,
        index: usize,
        visible: bool,
    ) -> Result<(), FormError> {
        let option = self.option(id, index)?;
        set_style(&option, "display", if visible { "inline" } else { "none" })
    }

    fn set_visible(&mut self, selector: &str, visible: bool) -> Result<(), FormError> {
        let list = self.document.query_selector_all(selector).map_err(js_err)?;
        if list.length() == 0 {
            return Err(FormError::MissingElement(selector.to_string()));
        }
        let value = if visible { "visible" } else { "hidden" };
        for node in (0..list.length()).filter_map(|i| list.item(i)) {
            if let Ok(el) = node.dyn_into::<HtmlElement>() {
                set_style(&el, "visibility", value)?;
            }
        }
        Ok(())
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), FormError> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(!enabled);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_disabled(!enabled);
        } else {
            return Err(FormError::UnsupportedElement(id.to_string()));
        }
        Ok(())
    }

    fn activities(&self) -> Result<Vec<Activity>, FormError> {
        self.checkboxes()?
            .into_iter()
            .map(|cb| {
                let name = cb.name();
                let cost = match cb.get_attribute("data-cost") {
                    Some(raw) => Some(parse_cost(&raw).ok_or_else(|| FormError::InvalidCost {
                        name: name.clone(),
                        raw: raw.clone(),
                    })?),
                    None => None,
                };
                Ok(Activity {
                    cost,
                    time_slot: cb.get_attribute("data-day-and-time"),
                    checked: cb.checked(),
                    enabled: !cb.disabled(),
                    name,
                })
            })
            .collect()
    }

    fn set_activity_enabled(&mut self, name: &str, enabled: bool) -> Result<(), FormError> {
        let cb = self.checkbox(name)?;
        cb.set_disabled(!enabled);
        toggle_class(&cb, DISABLED_CLASS, !enabled)?;
        if let Some(label) = cb.parent_element() {
            toggle_class(&label, DISABLED_CLASS, !enabled)?;
        }
        Ok(())
    }

    fn set_activity_focus(&mut self, name: &str, focused: bool) -> Result<(), FormError> {
        if let Some(label) = self.checkbox(name)?.parent_element() {
            label.set_class_name(if focused { FOCUS_CLASS } else { "" });
        }
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), FormError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_field_error(&mut self, id: &str, message: Option<&str>) -> Result<(), FormError> {
        let parent = self.field_parent(id)?;
        toggle_class(&parent, INVALID_CLASS, message.is_some())?;
        toggle_class(&parent, VALID_CLASS, message.is_none())?;

        let hint = parent
            .last_element_child()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| FormError::MissingElement(format!("hint for {}", id)))?;
        match message {
            Some(msg) => {
                hint.set_text_content(Some(msg));
                set_style(&hint, "display", "inline")
            }
            None => set_style(&hint, "display", "none"),
        }
    }

    fn is_marked_invalid(&self, id: &str) -> Result<bool, FormError> {
        Ok(self.field_parent(id)?.class_list().contains(INVALID_CLASS))
    }

    fn focus(&mut self, id: &str) -> Result<(), FormError> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| FormError::UnsupportedElement(id.to_string()))?
            .focus()
            .map_err(js_err)
    }
}
