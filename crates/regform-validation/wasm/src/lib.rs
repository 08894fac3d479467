//! Registration form WASM
//!
//! WebAssembly bindings that drive the registration form in the browser.
//! Same rule table and controller as the server side, wired to DOM events.

use std::rc::Rc;

use regform_validation_core::{Controller, FieldError, FormConfig, FormError, RuleTable};
use wasm_bindgen::prelude::*;

mod dom;
mod events;

pub use dom::DomForm;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: FormError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_config(config: JsValue) -> Result<FormConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(FormConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))
}

/// Handle to a running form. Listeners are removed when it is freed.
#[wasm_bindgen]
pub struct RegistrationForm {
    controller: Rc<Controller>,
    _listeners: Vec<events::Listener>,
}

#[wasm_bindgen]
impl RegistrationForm {
    /// Validate the whole form now, rendering errors. Returns `true` when it may be
    /// submitted.
    pub fn validate(&self) -> Result<bool, JsValue> {
        let mut form = DomForm::from_window(&self.controller.config().fields.activities)
            .map_err(to_js)?;
        let outcome = self.controller.on_submit(&mut form).map_err(to_js)?;
        Ok(!outcome.is_cancelled())
    }
}

/// Initialise the form and attach its event handlers.
///
/// # Example (JavaScript)
/// ```javascript
/// const form = startRegistrationForm();            // built-in rules
/// const custom = startRegistrationForm({ default_payment: 'paypal' });
/// ```
#[wasm_bindgen(js_name = startRegistrationForm)]
pub fn start_registration_form(config: JsValue) -> Result<RegistrationForm, JsValue> {
    let config = parse_config(config)?;
    let controller = Rc::new(Controller::new(config).map_err(to_js)?);

    let mut form = DomForm::from_window(&controller.config().fields.activities).map_err(to_js)?;
    controller.init(&mut form).map_err(to_js)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let listeners = events::bind(&document, &controller).map_err(to_js)?;

    Ok(RegistrationForm {
        controller,
        _listeners: listeners,
    })
}

thread_local! {
    // Built-in rules, compiled once per thread for the standalone exports
    static DEFAULT_RULES: Result<RuleTable, String> =
        RuleTable::new(FormConfig::default().rules).map_err(|e| e.to_string());
}

fn check(field_id: &str, value: &str) -> Result<Option<FieldError>, JsValue> {
    DEFAULT_RULES.with(|rules| match rules {
        Ok(table) => Ok(table.check_value(field_id, value)),
        Err(msg) => Err(JsValue::from_str(msg)),
    })
}

/// Validate a single value against the built-in rules for `fieldId`
///
/// # Returns
/// Array of validation errors (empty if valid)
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field_id: &str, value: &str) -> Result<JsValue, JsValue> {
    let errors: Vec<FieldError> = check(field_id, value)?.into_iter().collect();
    Ok(serde_wasm_bindgen::to_value(&errors)?)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> Result<bool, JsValue> {
    Ok(check("email", email)?.is_none())
}
