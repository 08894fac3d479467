//! Interaction controller
//!
//! One method per form event. Each runs to completion against a [`FormAdapter`] and
//! recomputes from the live form state, so firing the same event twice is harmless.

use tracing::{debug, warn};

use crate::activities::{conflict_updates, format_total, total_cost};
use crate::render::render_errors;
use crate::visibility::{color_visibility, other_job_role_visible, payment_visibility};
use crate::{FormAdapter, FormConfig, FormError, FormErrors, RuleTable};

/// What the host should do with a submit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceed,
    /// Cancel the submission; the errors have already been rendered
    Cancel(FormErrors),
}

impl SubmitOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubmitOutcome::Cancel(_))
    }
}

#[derive(Debug)]
pub struct Controller {
    config: FormConfig,
    rules: RuleTable,
}

impl Controller {
    pub fn new(config: FormConfig) -> Result<Self, FormError> {
        let rules = RuleTable::new(config.rules.clone())?;
        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Put the form in its starting state.
    pub fn init<A: FormAdapter + ?Sized>(&self, form: &mut A) -> Result<(), FormError> {
        let ids = &self.config.fields;

        form.focus(&ids.name)?;
        form.set_visible(&selector(&ids.other_job_role), false)?;
        form.set_enabled(&ids.color, false)?;
        form.set_value(&ids.payment, &self.config.default_payment)?;
        self.apply_payment(form, &self.config.default_payment)?;
        form.set_text(&ids.activities_cost, &format_total(0))?;

        debug!(payment = %self.config.default_payment, "registration form initialised");
        Ok(())
    }

    pub fn on_job_title_change<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
    ) -> Result<(), FormError> {
        let ids = &self.config.fields;
        let show = other_job_role_visible(&form.options(&ids.title)?);
        form.set_visible(&selector(&ids.other_job_role), show)
    }

    pub fn on_design_change<A: FormAdapter + ?Sized>(&self, form: &mut A) -> Result<(), FormError> {
        let ids = &self.config.fields;
        let design = form.value(&ids.design)?;

        form.set_enabled(&ids.color, design != ids.design_placeholder)?;
        form.select_index(&ids.color, 0)?;

        let colors = form.options(&ids.color)?;
        for (index, visible) in color_visibility(&colors, &design).into_iter().enumerate() {
            form.set_option_visible(&ids.color, index, visible)?;
        }
        Ok(())
    }

    /// Show the selected method's fields and clear errors left on rules that no
    /// longer apply.
    pub fn on_payment_change<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
    ) -> Result<(), FormError> {
        let ids = &self.config.fields;
        let method = form.value(&ids.payment)?;
        self.apply_payment(form, &method)?;

        for rule in self.rules.gated_by(&ids.payment) {
            let inactive = rule.when.as_ref().is_some_and(|w| w.equals != method);
            if inactive && form.is_marked_invalid(&rule.field)? {
                form.set_field_error(&rule.field, None)?;
            }
        }
        Ok(())
    }

    /// A checkbox in the activities list changed.
    pub fn on_activity_change<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
        name: &str,
    ) -> Result<(), FormError> {
        let activities = form.activities()?;
        if !activities.iter().any(|a| a.name == name) {
            warn!(name, "change event from unknown activity");
            return Err(FormError::MissingElement(name.to_string()));
        }

        for (other, enabled) in conflict_updates(&activities, name) {
            form.set_activity_enabled(&other, enabled)?;
        }

        let total = total_cost(&activities)?;
        form.set_text(&self.config.fields.activities_cost, &format_total(total))?;
        debug!(name, total, "activities updated");

        self.on_field_input(form, &self.config.fields.activities_box)?;
        Ok(())
    }

    pub fn on_activity_focus<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
        name: &str,
        focused: bool,
    ) -> Result<(), FormError> {
        form.set_activity_focus(name, focused)
    }

    /// Live validation of a single field (keyup/change). Fields without rules are
    /// ignored.
    pub fn on_field_input<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
        field_id: &str,
    ) -> Result<FormErrors, FormError> {
        if !self.rules.has_rules_for(field_id) {
            return Ok(FormErrors::default());
        }
        let errors = self.rules.validate_field(form, field_id)?;
        render_errors(form, &[field_id], &errors)?;
        Ok(errors)
    }

    /// Validate everything; the host cancels the submission on [`SubmitOutcome::Cancel`].
    pub fn on_submit<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
    ) -> Result<SubmitOutcome, FormError> {
        let errors = self.rules.validate(form)?;
        render_errors(form, &self.rules.fields(), &errors)?;

        if errors.is_empty() {
            debug!("submission accepted");
            Ok(SubmitOutcome::Proceed)
        } else {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "submission cancelled");
            Ok(SubmitOutcome::Cancel(errors))
        }
    }

    fn apply_payment<A: FormAdapter + ?Sized>(
        &self,
        form: &mut A,
        method: &str,
    ) -> Result<(), FormError> {
        if self.config.payment_option(method).is_none() {
            debug!(method, "no payment option configured for method");
        }
        for (sel, visible) in payment_visibility(&self.config.payment_options, method) {
            form.set_visible(sel, visible)?;
        }
        Ok(())
    }
}

fn selector(id: &str) -> String {
    format!("#{}", id)
}
