//! Formatting helpers for chart labels and tooltips.

/// Percentage share of `value` in `total`, rounded to the nearest integer.
/// A zero (or non-finite) total yields `0` instead of dividing by zero.
pub fn percent_of(value: f64, total: f64) -> u32 {
    if total > 0.0 && total.is_finite() && value.is_finite() {
        (value / total * 100.0).round().max(0.0) as u32
    } else {
        0
    }
}

/// `"<label>: <value> (<percentage>%)"` for pie and doughnut wedges.
/// `data` is the rendered dataset the wedge belongs to.
pub fn proportion_label(label: &str, value: f64, data: &[f64]) -> String {
    let total: f64 = data.iter().copied().filter(|v| v.is_finite()).sum();
    format!(
        "{label}: {} ({}%)",
        format_count(value),
        percent_of(value, total)
    )
}

/// `"<unit>: <value>"` for line charts.
pub fn unit_label(unit: &str, value: f64) -> String {
    format!("{unit}: {}", format_count(value))
}

/// `"Impact: 80.0%"` for feature weights in `[0, 1]`.
pub fn impact_label(weight: f64) -> String {
    let weight = if weight.is_finite() { weight } else { 0.0 };
    format!("Impact: {:.1}%", weight * 100.0)
}

/// Feature keys arrive snake_cased from the model (`txn_amount`).
pub fn feature_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Counts are whole numbers; anything fractional keeps its decimals.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportions_follow_rendered_total() {
        let data = [1.0, 1.0, 2.0];
        assert_eq!(proportion_label("Low Risk", 1.0, &data), "Low Risk: 1 (25%)");
        assert_eq!(proportion_label("Medium Risk", 1.0, &data), "Medium Risk: 1 (25%)");
        assert_eq!(proportion_label("High Risk", 2.0, &data), "High Risk: 2 (50%)");
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let data = [0.0, 0.0, 0.0];
        for value in data {
            assert_eq!(percent_of(value, 0.0), 0);
        }
        assert_eq!(proportion_label("Low Risk", 0.0, &data), "Low Risk: 0 (0%)");
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of(1.0, 8.0), 13);
        assert_eq!(percent_of(1.0, 3.0), 33);
        assert_eq!(percent_of(2.0, 3.0), 67);
    }

    #[test]
    fn impact_uses_one_decimal() {
        assert_eq!(impact_label(0.8), "Impact: 80.0%");
        assert_eq!(impact_label(0.2), "Impact: 20.0%");
        assert_eq!(impact_label(0.355), "Impact: 35.5%");
        assert_eq!(impact_label(f64::NAN), "Impact: 0.0%");
    }

    #[test]
    fn feature_keys_lose_underscores() {
        assert_eq!(feature_label("txn_amount"), "txn amount");
        assert_eq!(feature_label("device__fingerprint"), "device  fingerprint");
        assert_eq!(unit_label("Transactions", 42.0), "Transactions: 42");
    }
}
