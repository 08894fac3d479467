//! Rule table and validators
//!
//! A [`FieldRule`] names a field, a [`Validator`] and the message shown when it fails.
//! [`RuleTable`] compiles the patterns once and evaluates the rules against a
//! [`FormAdapter`], returning the errors of that pass by value.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Activity, FormAdapter, FormError};

/// Validator kinds understood by the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// Value must match a regular expression
    Pattern { pattern: String },
    /// Value must be at least `min` characters long
    MinLength { min: usize },
    /// Value must be ASCII digits only, `min..=max` of them
    Digits { min: usize, max: usize },
    /// At least one activity with a cost must be checked
    AnyChecked,
}

/// Gate a rule on the value of another field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub validator: Validator,
    pub message: String,
    #[serde(default)]
    pub when: Option<Condition>,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, validator: Validator, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            validator,
            message: message.into(),
            when: None,
        }
    }

    /// Only apply this rule while `field` holds `equals`.
    pub fn when(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.when = Some(Condition {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }
}

/// A failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Errors of one validation pass, in rule table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field_id == field_id)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field_id.as_str())
    }
}

#[derive(Debug)]
struct CompiledRule {
    rule: FieldRule,
    regex: Option<Regex>,
}

/// Compiled, immutable rule table
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<FieldRule>) -> Result<Self, FormError> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let regex = match &rule.validator {
                    Validator::Pattern { pattern } => {
                        Some(Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
                            field: rule.field.clone(),
                            source,
                        })?)
                    }
                    _ => None,
                };
                Ok(CompiledRule { rule, regex })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(Self { rules })
    }

    /// Distinct field ids owning at least one rule, in table order.
    pub fn fields(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .map(|c| c.rule.field.as_str())
            .filter(|f| seen.insert(*f))
            .collect()
    }

    pub fn has_rules_for(&self, field_id: &str) -> bool {
        self.rules.iter().any(|c| c.rule.field == field_id)
    }

    /// Rules whose `when` condition reads `field_id`.
    pub fn gated_by<'a>(&'a self, field_id: &'a str) -> impl Iterator<Item = &'a FieldRule> {
        self.rules
            .iter()
            .map(|c| &c.rule)
            .filter(move |r| r.when.as_ref().is_some_and(|w| w.field == field_id))
    }

    /// Run every rule. Each field reports at most its first failing rule; no field
    /// stops the others from being checked.
    pub fn validate<A: FormAdapter + ?Sized>(&self, form: &A) -> Result<FormErrors, FormError> {
        self.run(form, |_| true)
    }

    /// Run only the rules of `field_id`.
    pub fn validate_field<A: FormAdapter + ?Sized>(
        &self,
        form: &A,
        field_id: &str,
    ) -> Result<FormErrors, FormError> {
        self.run(form, |rule| rule.field == field_id)
    }

    /// Check a bare value against the text rules of `field_id`, ignoring conditions
    /// and group rules. Used where no live form exists.
    pub fn check_value(&self, field_id: &str, value: &str) -> Option<FieldError> {
        self.rules
            .iter()
            .filter(|c| c.rule.field == field_id)
            .filter(|c| c.rule.validator != Validator::AnyChecked)
            .find(|c| !check_text(c, value))
            .map(|c| FieldError {
                field_id: field_id.to_string(),
                message: c.rule.message.clone(),
            })
    }

    fn run<A, F>(&self, form: &A, select: F) -> Result<FormErrors, FormError>
    where
        A: FormAdapter + ?Sized,
        F: Fn(&FieldRule) -> bool,
    {
        let mut errors = Vec::new();
        let mut failed: HashSet<&str> = HashSet::new();
        let mut activities: Option<Vec<Activity>> = None;

        for compiled in self.rules.iter().filter(|c| select(&c.rule)) {
            let rule = &compiled.rule;
            if failed.contains(rule.field.as_str()) {
                continue;
            }
            if let Some(cond) = &rule.when {
                if form.value(&cond.field)? != cond.equals {
                    continue;
                }
            }

            let passed = match &rule.validator {
                Validator::AnyChecked => {
                    if activities.is_none() {
                        activities = Some(form.activities()?);
                    }
                    activities
                        .as_deref()
                        .is_some_and(|a| a.iter().any(|a| a.checked && a.cost.is_some()))
                }
                _ => check_text(compiled, &form.value(&rule.field)?),
            };

            if !passed {
                failed.insert(rule.field.as_str());
                errors.push(FieldError {
                    field_id: rule.field.clone(),
                    message: rule.message.clone(),
                });
            }
        }

        debug!(errors = errors.len(), "validation pass finished");
        Ok(FormErrors(errors))
    }
}

fn check_text(compiled: &CompiledRule, value: &str) -> bool {
    match &compiled.rule.validator {
        Validator::Pattern { .. } => compiled.regex.as_ref().is_some_and(|r| r.is_match(value)),
        Validator::MinLength { min } => value.chars().count() >= *min,
        Validator::Digits { min, max } => {
            (*min..=*max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
        }
        Validator::AnyChecked => true,
    }
}
