//! Activity checkbox rules: time-slot conflicts and the running cost

use crate::{Activity, FormError};

/// Enable/disable updates caused by `changed` toggling.
///
/// Every other activity sharing its time slot is disabled while `changed` is checked
/// and re-enabled when it is cleared. Activities without a slot affect nothing.
pub fn conflict_updates(activities: &[Activity], changed: &str) -> Vec<(String, bool)> {
    let Some(current) = activities.iter().find(|a| a.name == changed) else {
        return Vec::new();
    };
    let Some(slot) = current.time_slot.as_deref() else {
        return Vec::new();
    };

    activities
        .iter()
        .filter(|a| a.name != current.name && a.time_slot.as_deref() == Some(slot))
        .map(|a| (a.name.clone(), !current.checked))
        .collect()
}

/// Sum, in cents, of the cost of every checked activity.
pub fn total_cost(activities: &[Activity]) -> Result<u64, FormError> {
    activities
        .iter()
        .filter(|a| a.checked)
        .filter_map(|a| a.cost)
        .try_fold(0u64, |total, cost| total.checked_add(cost))
        .ok_or(FormError::CostOverflow)
}

/// Parse a `data-cost` attribute (`"100"`, `"12.5"`, `"12.50"`) into cents.
///
/// At most two decimal places; anything else is `None`.
pub fn parse_cost(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if whole.is_empty() || !digits(whole) || fraction.len() > 2 || !digits(fraction) {
        return None;
    }
    if raw.ends_with('.') {
        return None;
    }

    let cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse::<u64>().ok()?,
    };
    whole.parse::<u64>().ok()?.checked_mul(100)?.checked_add(cents)
}

/// `Total: $N`, with cents only when there are any.
pub fn format_total(cents: u64) -> String {
    if cents % 100 == 0 {
        format!("Total: ${}", cents / 100)
    } else {
        format!("Total: ${}.{:02}", cents / 100, cents % 100)
    }
}
