//! Dependent field visibility

use crate::{PaymentOption, SelectOption};

/// Visibility of every payment-dependent selector once `selected` is chosen.
///
/// Exactly the selected method's fields are visible; an unknown method hides all.
pub fn payment_visibility<'a>(
    options: &'a [PaymentOption],
    selected: &str,
) -> Vec<(&'a str, bool)> {
    options
        .iter()
        .flat_map(|option| {
            let show = option.method == selected;
            option.fields.iter().map(move |f| (f.as_str(), show))
        })
        .collect()
}

/// The free-text job role is shown only while the last title option is selected.
pub fn other_job_role_visible(titles: &[SelectOption]) -> bool {
    titles.last().is_some_and(|o| o.selected)
}

/// Which color options remain visible for `design`.
///
/// Untagged options and options tagged `any` are always visible.
pub fn color_visibility(colors: &[SelectOption], design: &str) -> Vec<bool> {
    colors
        .iter()
        .map(|c| match c.theme.as_deref() {
            None | Some("any") => true,
            Some(theme) => theme == design,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormConfig;

    #[test]
    fn test_paypal_hides_other_methods() {
        let config = FormConfig::default();
        let vis = payment_visibility(&config.payment_options, "paypal");
        assert_eq!(
            vis,
            vec![
                (".month-box", false),
                (".year-box", false),
                (".credit-card-box", false),
                (".paypal", true),
                (".bitcoin", false),
            ]
        );
    }

    #[test]
    fn test_unknown_method_hides_everything() {
        let config = FormConfig::default();
        assert!(payment_visibility(&config.payment_options, "cash")
            .iter()
            .all(|(_, shown)| !shown));
    }

    #[test]
    fn test_other_job_role() {
        let mut titles = vec![
            SelectOption::new("full-stack js developer"),
            SelectOption::new("other"),
        ];
        assert!(!other_job_role_visible(&titles));
        titles[1].selected = true;
        assert!(other_job_role_visible(&titles));
        assert!(!other_job_role_visible(&[]));
    }

    #[test]
    fn test_color_filter() {
        let colors = vec![
            SelectOption::new("Select a design theme above"),
            SelectOption::themed("cornflowerblue", "js puns"),
            SelectOption::themed("tomato", "heart js"),
            SelectOption::themed("black", "any"),
        ];
        assert_eq!(
            color_visibility(&colors, "heart js"),
            vec![true, false, true, true]
        );
    }
}
