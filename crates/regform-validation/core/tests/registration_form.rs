//! Integration tests for the registration form controller
//!
//! Drives `Controller` against `MemoryForm::registration()` the way the browser
//! bindings do: mutate the form like a user would, then fire the matching handler.

use pretty_assertions::assert_eq;
use regform_validation_core::*;
use rstest::*;

#[fixture]
fn controller() -> Controller {
    Controller::new(FormConfig::default()).unwrap()
}

#[fixture]
fn form(controller: Controller) -> MemoryForm {
    let mut form = MemoryForm::registration();
    controller.init(&mut form).unwrap();
    form
}

fn fill_valid(form: &mut MemoryForm) {
    form.set_value("name", "Ada").unwrap();
    form.set_value("email", "ada@example.com").unwrap();
    form.set_value("cc-num", "4111111111111111").unwrap();
    form.set_value("zip", "12345").unwrap();
    form.set_value("cvv", "123").unwrap();
    form.set_checked("all", true).unwrap();
}

#[rstest]
fn test_init_state(form: MemoryForm) {
    assert_eq!(form.focused(), Some("name"));
    assert_eq!(form.is_visible("#other-job-role"), Some(false));
    assert_eq!(form.is_enabled("color"), Some(false));
    assert_eq!(form.value("payment").unwrap(), "credit-card");
    assert_eq!(form.is_visible(".credit-card-box"), Some(true));
    assert_eq!(form.is_visible(".paypal"), Some(false));
    assert_eq!(form.is_visible(".bitcoin"), Some(false));
    assert_eq!(form.text("activities-cost"), Some("Total: $0"));
    assert!(form.invalid_fields().is_empty());
    assert_eq!(form.state("name"), None);
}

// Name rule

#[rstest]
#[case("Ada", true)]
#[case("ada_lovelace", true)]
#[case("x", true)]
#[case("", false)]
#[case("   ", false)]
#[case("!!!", false)]
fn test_name_rule(controller: Controller, #[case] value: &str, #[case] passes: bool) {
    assert_eq!(controller.rules().check_value("name", value).is_none(), passes);
}

// Email rules: each failure cause carries its own message

#[rstest]
#[case("ada@example.com", None)]
#[case("a@b.co", None)]
#[case("a@b", Some("Email must have at a minimum 5 characters"))]
#[case("", Some("Email must have at a minimum 5 characters"))]
#[case("ada.example.com", Some("Email must include a valid email address"))]
#[case("ada@example", Some("Email must include a valid email address"))]
#[case("ada@example.c", Some("Email must include a valid email address"))]
#[case("ada@example.abcdefghijk", Some("Email must include a valid email address"))]
fn test_email_rules(controller: Controller, #[case] value: &str, #[case] message: Option<&str>) {
    let error = controller.rules().check_value("email", value);
    assert_eq!(error.as_ref().map(|e| e.message.as_str()), message);
}

#[rstest]
fn test_email_keyup_reports_one_error(controller: Controller, mut form: MemoryForm) {
    form.set_value("email", "ab").unwrap();
    let errors = controller.on_field_input(&mut form, "email").unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        form.state("email"),
        Some(&FieldState::Invalid(
            "Email must have at a minimum 5 characters".into()
        ))
    );

    form.set_value("email", "ab@cd").unwrap();
    controller.on_field_input(&mut form, "email").unwrap();
    assert_eq!(
        form.state("email"),
        Some(&FieldState::Invalid(
            "Email must include a valid email address".into()
        ))
    );

    form.set_value("email", "ab@cd.org").unwrap();
    controller.on_field_input(&mut form, "email").unwrap();
    assert_eq!(form.state("email"), Some(&FieldState::Valid));
}

#[rstest]
fn test_repeated_keyup_is_idempotent(controller: Controller, mut form: MemoryForm) {
    for _ in 0..3 {
        let errors = controller.on_field_input(&mut form, "name").unwrap();
        assert_eq!(errors.len(), 1);
    }
    assert_eq!(form.invalid_fields(), vec!["name"]);
}

#[rstest]
fn test_keyup_on_unruled_field_does_nothing(controller: Controller, mut form: MemoryForm) {
    let errors = controller.on_field_input(&mut form, "other-job-role").unwrap();
    assert!(errors.is_empty());
    assert_eq!(form.state("other-job-role"), None);
}

// Submission

#[rstest]
fn test_valid_submission_proceeds(controller: Controller, mut form: MemoryForm) {
    fill_valid(&mut form);
    let outcome = controller.on_submit(&mut form).unwrap();
    assert_eq!(outcome, SubmitOutcome::Proceed);
    assert!(form.invalid_fields().is_empty());
}

#[rstest]
fn test_empty_name_cancels_and_marks_only_name(controller: Controller, mut form: MemoryForm) {
    fill_valid(&mut form);
    form.set_value("name", "").unwrap();

    let outcome = controller.on_submit(&mut form).unwrap();
    assert!(outcome.is_cancelled());
    assert_eq!(form.invalid_fields(), vec!["name"]);
    assert_eq!(form.state("email"), Some(&FieldState::Valid));
}

#[rstest]
fn test_all_errors_collected_on_submit(controller: Controller, mut form: MemoryForm) {
    let SubmitOutcome::Cancel(errors) = controller.on_submit(&mut form).unwrap() else {
        panic!("empty form must not submit");
    };
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec!["name", "email", "cc-num", "zip", "cvv", "activities-box"]
    );
    assert_eq!(
        errors.get("activities-box"),
        Some("Please ensure at least one activity is selected")
    );
    assert_eq!(form.invalid_fields().len(), 6);
}

#[rstest]
fn test_corrected_field_loses_marker(controller: Controller, mut form: MemoryForm) {
    fill_valid(&mut form);
    form.set_value("zip", "12").unwrap();
    assert!(controller.on_submit(&mut form).unwrap().is_cancelled());
    assert_eq!(form.invalid_fields(), vec!["zip"]);

    form.set_value("zip", "54321").unwrap();
    assert_eq!(controller.on_submit(&mut form).unwrap(), SubmitOutcome::Proceed);
    assert_eq!(form.state("zip"), Some(&FieldState::Valid));
}

#[rstest]
#[case("paypal")]
#[case("bitcoin")]
fn test_card_rules_skipped_for_other_methods(
    controller: Controller,
    mut form: MemoryForm,
    #[case] method: &str,
) {
    fill_valid(&mut form);
    form.set_value("cc-num", "").unwrap();
    form.set_value("payment", method).unwrap();
    controller.on_payment_change(&mut form).unwrap();

    assert_eq!(controller.on_submit(&mut form).unwrap(), SubmitOutcome::Proceed);
}

#[rstest]
fn test_switching_method_clears_card_errors(controller: Controller, mut form: MemoryForm) {
    fill_valid(&mut form);
    form.set_value("cvv", "1").unwrap();
    controller.on_submit(&mut form).unwrap();
    assert_eq!(form.invalid_fields(), vec!["cvv"]);

    form.set_value("payment", "paypal").unwrap();
    controller.on_payment_change(&mut form).unwrap();
    assert!(form.invalid_fields().is_empty());
}

// Payment visibility

#[rstest]
#[case("credit-card", &[".month-box", ".year-box", ".credit-card-box"])]
#[case("paypal", &[".paypal"])]
#[case("bitcoin", &[".bitcoin"])]
#[case("select method", &[])]
fn test_payment_visibility(
    controller: Controller,
    mut form: MemoryForm,
    #[case] method: &str,
    #[case] shown: &[&str],
) {
    form.set_value("payment", method).unwrap();
    controller.on_payment_change(&mut form).unwrap();

    for sel in [".month-box", ".year-box", ".credit-card-box", ".paypal", ".bitcoin"] {
        assert_eq!(form.is_visible(sel), Some(shown.contains(&sel)), "{}", sel);
    }
}

// Job title and design

#[rstest]
fn test_other_job_role_toggles(controller: Controller, mut form: MemoryForm) {
    form.set_value("title", "other").unwrap();
    controller.on_job_title_change(&mut form).unwrap();
    assert_eq!(form.is_visible("#other-job-role"), Some(true));

    form.set_value("title", "designer").unwrap();
    controller.on_job_title_change(&mut form).unwrap();
    assert_eq!(form.is_visible("#other-job-role"), Some(false));
}

#[rstest]
fn test_design_filters_colors(controller: Controller, mut form: MemoryForm) {
    form.set_value("design", "heart js").unwrap();
    controller.on_design_change(&mut form).unwrap();

    assert_eq!(form.is_enabled("color"), Some(true));
    let visible: Vec<bool> = (0..7)
        .map(|i| form.is_option_visible("color", i).unwrap())
        .collect();
    assert_eq!(visible, vec![true, false, false, false, true, true, true]);
}

#[rstest]
fn test_design_change_resets_color(controller: Controller, mut form: MemoryForm) {
    form.set_value("design", "js puns").unwrap();
    controller.on_design_change(&mut form).unwrap();
    form.set_value("color", "gold").unwrap();

    form.set_value("design", "heart js").unwrap();
    controller.on_design_change(&mut form).unwrap();
    assert_eq!(form.value("color").unwrap(), "Select a design theme above");

    form.set_value("design", "Select Theme").unwrap();
    controller.on_design_change(&mut form).unwrap();
    assert_eq!(form.is_enabled("color"), Some(false));
}

// Activities

#[rstest]
fn test_same_slot_conflict(controller: Controller, mut form: MemoryForm) {
    form.set_checked("js-frameworks", true).unwrap();
    controller.on_activity_change(&mut form, "js-frameworks").unwrap();

    assert!(!form.activity("express").unwrap().enabled);
    assert!(form.activity("js-frameworks").unwrap().enabled);
    assert!(form.activity("js-libs").unwrap().enabled);
    assert!(form.activity("build-tools").unwrap().enabled);

    form.set_checked("js-frameworks", false).unwrap();
    controller.on_activity_change(&mut form, "js-frameworks").unwrap();
    assert!(form.activity("express").unwrap().enabled);
}

#[rstest]
fn test_running_total(controller: Controller, mut form: MemoryForm) {
    for name in ["all", "js-libs", "build-tools"] {
        form.set_checked(name, true).unwrap();
        controller.on_activity_change(&mut form, name).unwrap();
    }
    assert_eq!(form.text("activities-cost"), Some("Total: $400"));

    for name in ["all", "js-libs", "build-tools"] {
        form.set_checked(name, false).unwrap();
        controller.on_activity_change(&mut form, name).unwrap();
    }
    assert_eq!(form.text("activities-cost"), Some("Total: $0"));
    assert!(form.state("activities-box").unwrap().is_invalid());
}

#[rstest]
fn test_fractional_cost_total(controller: Controller) {
    let workshop = Activity {
        cost: Some(1_250),
        ..Activity::new("workshop", 0, None)
    };
    let mut form = MemoryForm::registration().with_activity(workshop);
    controller.init(&mut form).unwrap();

    for name in ["all", "workshop"] {
        form.set_checked(name, true).unwrap();
        controller.on_activity_change(&mut form, name).unwrap();
    }
    assert_eq!(form.text("activities-cost"), Some("Total: $212.50"));
}

#[rstest]
fn test_total_overflow_is_reported_not_panicked(controller: Controller) {
    let huge = Activity {
        cost: Some(u64::MAX),
        ..Activity::new("huge", 0, None)
    };
    let mut form = MemoryForm::registration().with_activity(huge);
    controller.init(&mut form).unwrap();

    form.set_checked("all", true).unwrap();
    controller.on_activity_change(&mut form, "all").unwrap();
    form.set_checked("huge", true).unwrap();

    let err = controller.on_activity_change(&mut form, "huge").unwrap_err();
    assert!(matches!(err, FormError::CostOverflow));
}

#[rstest]
fn test_unknown_activity_is_an_error(controller: Controller, mut form: MemoryForm) {
    let err = controller.on_activity_change(&mut form, "golf").unwrap_err();
    assert!(matches!(err, FormError::MissingElement(name) if name == "golf"));
}

#[rstest]
fn test_activity_focus(controller: Controller, mut form: MemoryForm) {
    controller.on_activity_focus(&mut form, "npm", true).unwrap();
    assert_eq!(form.focused_activity(), Some("npm"));
    controller.on_activity_focus(&mut form, "npm", false).unwrap();
    assert_eq!(form.focused_activity(), None);
}

// Configuration

#[test]
fn test_custom_email_policy_from_toml() {
    let config = FormConfig::from_toml_str(
        r#"
        [[rules]]
        field = "email"
        message = "Use a .com address"
        validator = { kind = "pattern", pattern = '^\w+@\w+\.com$' }
        "#,
    )
    .unwrap();
    let controller = Controller::new(config).unwrap();

    assert!(controller.rules().check_value("email", "ada@example.com").is_none());
    assert_eq!(
        controller
            .rules()
            .check_value("email", "ada@example.org")
            .unwrap()
            .message,
        "Use a .com address"
    );
}

#[test]
fn test_missing_element_surfaces() {
    let controller = Controller::new(FormConfig::default()).unwrap();
    let mut form = MemoryForm::new().with_input("name", "");
    assert!(matches!(
        controller.init(&mut form),
        Err(FormError::MissingElement(_))
    ));
}
