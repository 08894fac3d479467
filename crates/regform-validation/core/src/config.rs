// File: src/config.rs
// Purpose: Form configuration (rule table, payment options, element ids), loadable from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{FieldRule, Validator};

/// Everything the controller needs to know about one registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<FieldRule>,

    #[serde(default = "default_payment_options")]
    pub payment_options: Vec<PaymentOption>,

    /// Payment method selected when the form starts
    #[serde(default = "default_payment")]
    pub default_payment: String,

    #[serde(default)]
    pub fields: FieldIds,
}

/// A payment method and the selectors of the fields shown only for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOption {
    pub method: String,
    pub fields: Vec<String>,
}

impl PaymentOption {
    pub fn new(method: &str, fields: &[&str]) -> Self {
        Self {
            method: method.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Ids of the controls the controller wires up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldIds {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_other_job_role")]
    pub other_job_role: String,

    #[serde(default = "default_design")]
    pub design: String,

    /// Value of the design option that means "nothing chosen yet"
    #[serde(default = "default_design_placeholder")]
    pub design_placeholder: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_payment_field")]
    pub payment: String,

    /// Container of the activity checkboxes
    #[serde(default = "default_activities")]
    pub activities: String,

    /// Field id the activities error is rendered against
    #[serde(default = "default_activities_box")]
    pub activities_box: String,

    #[serde(default = "default_activities_cost")]
    pub activities_cost: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: default_title(),
            other_job_role: default_other_job_role(),
            design: default_design(),
            design_placeholder: default_design_placeholder(),
            color: default_color(),
            payment: default_payment_field(),
            activities: default_activities(),
            activities_box: default_activities_box(),
            activities_cost: default_activities_cost(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            payment_options: default_payment_options(),
            default_payment: default_payment(),
            fields: FieldIds::default(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text; omitted sections fall back to the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid form configuration")
    }

    /// Load from file if it exists, otherwise use the registration form defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn payment_option(&self, method: &str) -> Option<&PaymentOption> {
        self.payment_options.iter().find(|p| p.method == method)
    }
}

// Default values
fn default_name() -> String {
    "name".to_string()
}

fn default_title() -> String {
    "title".to_string()
}

fn default_other_job_role() -> String {
    "other-job-role".to_string()
}

fn default_design() -> String {
    "design".to_string()
}

fn default_design_placeholder() -> String {
    "Select Theme".to_string()
}

fn default_color() -> String {
    "color".to_string()
}

fn default_payment_field() -> String {
    "payment".to_string()
}

fn default_activities() -> String {
    "activities".to_string()
}

fn default_activities_box() -> String {
    "activities-box".to_string()
}

fn default_activities_cost() -> String {
    "activities-cost".to_string()
}

fn default_payment() -> String {
    "credit-card".to_string()
}

fn default_payment_options() -> Vec<PaymentOption> {
    vec![
        PaymentOption::new("credit-card", &[".month-box", ".year-box", ".credit-card-box"]),
        PaymentOption::new("paypal", &[".paypal"]),
        PaymentOption::new("bitcoin", &[".bitcoin"]),
    ]
}

fn default_rules() -> Vec<FieldRule> {
    let word = |pattern: &str| Validator::Pattern {
        pattern: pattern.to_string(),
    };

    vec![
        FieldRule::new("name", word(r"^[A-Za-z0-9_]+$"), "Name field can not be blank"),
        FieldRule::new(
            "email",
            Validator::MinLength { min: 5 },
            "Email must have at a minimum 5 characters",
        ),
        FieldRule::new(
            "email",
            word(r"^[A-Za-z0-9_]+@[A-Za-z0-9_]+\.[A-Za-z0-9_]{2,10}$"),
            "Email must include a valid email address",
        ),
        FieldRule::new(
            "cc-num",
            Validator::Digits { min: 13, max: 16 },
            "Please ensure the credit card is 13-16 digits",
        )
        .when("payment", "credit-card"),
        FieldRule::new(
            "zip",
            Validator::Digits { min: 5, max: 5 },
            "Please ensure the zip is 5 digit",
        )
        .when("payment", "credit-card"),
        FieldRule::new(
            "cvv",
            Validator::Digits { min: 3, max: 3 },
            "Please ensure the cvv code is 3 digits",
        )
        .when("payment", "credit-card"),
        FieldRule::new(
            "activities-box",
            Validator::AnyChecked,
            "Please ensure at least one activity is selected",
        ),
    ]
}
