//! Event wiring between the document and the controller

use std::rc::Rc;

use regform_validation_core::{Controller, FormError, SubmitOutcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, EventTarget, HtmlInputElement};

use crate::dom::{js_err, DomForm};

/// A registered listener; removed from its target when dropped
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, FormError> {
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target,
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Wrap a controller call so it runs against a fresh `DomForm` and reports faults to
/// the console instead of throwing into the page.
fn handler<F>(document: &Document, controller: &Rc<Controller>, f: F) -> Closure<dyn FnMut(Event)>
where
    F: Fn(&Controller, &mut DomForm, &Event) -> Result<(), FormError> + 'static,
{
    let document = document.clone();
    let controller = Rc::clone(controller);
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let mut form = DomForm::new(document.clone(), &controller.config().fields.activities);
        if let Err(err) = f(&controller, &mut form, &event) {
            console::error_1(&JsValue::from_str(&format!("regform: {}", err)));
        }
    })
}

/// The checkbox an event came from, if any
fn checkbox_target(event: &Event) -> Option<HtmlInputElement> {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .filter(|input| input.type_() == "checkbox")
}

pub(crate) fn bind(
    document: &Document,
    controller: &Rc<Controller>,
) -> Result<Vec<Listener>, FormError> {
    let ids = controller.config().fields.clone();
    let by_id = |id: &str| -> Result<EventTarget, FormError> {
        document
            .get_element_by_id(id)
            .map(EventTarget::from)
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    };
    let form_el: EventTarget = document
        .query_selector("form")
        .map_err(js_err)?
        .ok_or_else(|| FormError::MissingElement("form".to_string()))?
        .into();
    let activities = by_id(&ids.activities)?;

    let mut listeners = vec![
        Listener::attach(
            by_id(&ids.title)?,
            "change",
            handler(document, controller, |c, form, _| c.on_job_title_change(form)),
        )?,
        Listener::attach(
            by_id(&ids.design)?,
            "change",
            handler(document, controller, |c, form, _| c.on_design_change(form)),
        )?,
        Listener::attach(
            by_id(&ids.payment)?,
            "change",
            handler(document, controller, |c, form, _| c.on_payment_change(form)),
        )?,
    ];

    listeners.push(Listener::attach(
        activities.clone(),
        "change",
        handler(document, controller, |c, form, event| {
            match checkbox_target(event) {
                Some(cb) => c.on_activity_change(form, &cb.name()),
                None => Ok(()),
            }
        }),
    )?);

    // focus/blur don't bubble; their -in/-out forms do
    for (kind, focused) in [("focusin", true), ("focusout", false)] {
        listeners.push(Listener::attach(
            activities.clone(),
            kind,
            handler(document, controller, move |c, form, event| {
                match checkbox_target(event) {
                    Some(cb) => c.on_activity_focus(form, &cb.name(), focused),
                    None => Ok(()),
                }
            }),
        )?);
    }

    // change catches pasted and autofilled values that never fire keyup
    for kind in ["keyup", "change"] {
        listeners.push(Listener::attach(
            form_el.clone(),
            kind,
            handler(document, controller, |c, form, event| {
                let id = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .map(|el| el.id())
                    .unwrap_or_default();
                if id.is_empty() {
                    return Ok(());
                }
                c.on_field_input(form, &id).map(|_| ())
            }),
        )?);
    }

    listeners.push(Listener::attach(
        form_el,
        "submit",
        handler(document, controller, |c, form, event| {
            match c.on_submit(form) {
                Ok(SubmitOutcome::Proceed) => Ok(()),
                Ok(SubmitOutcome::Cancel(_)) => {
                    event.prevent_default();
                    Ok(())
                }
                Err(err) => {
                    event.prevent_default();
                    Err(err)
                }
            }
        }),
    )?);

    Ok(listeners)
}
