//! The normalized, render-safe view of one metrics payload.

use serde::Serialize;
use serde_json::Value;

use super::coerce;

pub const MONTHS: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl RiskDistribution {
    pub fn from_value(value: Option<&Value>) -> Self {
        let field = |name: &str| value.and_then(|v| v.get(name)).map(coerce::count).unwrap_or(0);
        Self {
            low: field("low"),
            medium: field("medium"),
            high: field("high"),
        }
    }

    pub fn from_attributes(low: Option<&str>, medium: Option<&str>, high: Option<&str>) -> Self {
        Self {
            low: coerce::attribute_count(low),
            medium: coerce::attribute_count(medium),
            high: coerce::attribute_count(high),
        }
    }

    pub fn total(&self) -> u64 {
        self.low.saturating_add(self.medium).saturating_add(self.high)
    }

    pub fn as_array(&self) -> [u64; 3] {
        [self.low, self.medium, self.high]
    }
}

/// Feature name to model weight, in payload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureImportance {
    entries: Vec<(String, f64)>,
}

impl FeatureImportance {
    /// Weights are clamped into `[0, 1]`; unusable weights become 0.
    pub fn from_value(value: &Value) -> Self {
        let entries = value
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .map(|(key, weight)| {
                        let weight = coerce::float(weight).unwrap_or(0.0).clamp(0.0, 1.0);
                        (key.clone(), weight)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    /// Parse the `data-features` attribute. Returns `None` when the text is
    /// not JSON at all so the caller can switch to the table fallback.
    pub fn from_attribute(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Some(Self::from_value(&value)),
            Err(err) => {
                tracing::error!("feature data parse error: {err}");
                None
            }
        }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, weight)| *weight)
    }

    /// Empty or all-zero weights plot nothing useful.
    pub fn is_blank(&self) -> bool {
        self.weights().all(|w| w == 0.0)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureImportance {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, w)| (k.into(), if w.is_finite() { w.clamp(0.0, 1.0) } else { 0.0 }))
                .collect(),
        }
    }
}

/// One point-in-time set of dashboard metrics.
///
/// Built only through the normalizing constructors, so every field holds a
/// usable number regardless of what the server or template sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Index 0 is January.
    pub monthly_transactions: [u64; MONTHS],
    pub risk_distribution: RiskDistribution,
    pub feature_importance: Option<FeatureImportance>,
    pub total: u64,
    pub flagged: u64,
}

impl MetricsSnapshot {
    /// Normalize a `/admin/dashboard-data` or `/user/dashboard-data` body.
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            monthly_transactions: monthly_from_value(payload.get("monthlyTransactions")),
            risk_distribution: RiskDistribution::from_value(payload.get("riskDistribution")),
            feature_importance: payload
                .get("featureImportance")
                .filter(|v| v.is_object())
                .map(FeatureImportance::from_value),
            total: payload.get("total").map(coerce::count).unwrap_or(0),
            flagged: payload.get("flagged").map(coerce::count).unwrap_or(0),
        }
    }

    /// Parse the `data-transactions` attribute of the monthly chart.
    pub fn monthly_from_attribute(raw: Option<&str>) -> [u64; MONTHS] {
        let Some(raw) = raw else {
            tracing::warn!("monthly transaction data is missing; using zeros");
            return [0; MONTHS];
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => monthly_from_value(Some(&value)),
            Err(err) => {
                tracing::error!("monthly transaction data parse error: {err}");
                [0; MONTHS]
            }
        }
    }
}

fn monthly_from_value(value: Option<&Value>) -> [u64; MONTHS] {
    let mut months = [0; MONTHS];
    match value.and_then(Value::as_array) {
        Some(entries) if entries.len() == MONTHS => {
            for (slot, entry) in months.iter_mut().zip(entries) {
                *slot = coerce::count(entry);
            }
        }
        Some(entries) => {
            tracing::warn!(
                "monthly transaction data has {} entries, expected {MONTHS}; using zeros",
                entries.len()
            );
        }
        None => {
            tracing::warn!("monthly transaction data is not an array; using zeros");
        }
    }
    months
}
