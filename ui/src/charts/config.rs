//! Per-role visual configuration and the dataset each role plots.

use serde::Serialize;
use serde_json::{json, Value};

use super::role::{ChartKind, ChartRole, MONTH_LABELS, RISK_LABELS};
use crate::core::format;
use crate::metrics::{MetricsSnapshot, RenderError};

const PRIMARY_FILL: &str = "rgba(106, 100, 241, 0.2)";
const PRIMARY_LINE: &str = "rgba(106, 100, 241, 1)";
const DARK: &str = "#343a40";
const GRID: &str = "rgba(0, 0, 0, 0.05)";

/// Low / medium / high wedge colours as `(fill, border)`.
const RISK_PALETTE: [(&str, &str); 3] = [
    ("rgba(75, 192, 192, 0.7)", "rgba(75, 192, 192, 1)"),
    ("rgba(255, 206, 86, 0.7)", "rgba(255, 206, 86, 1)"),
    ("rgba(255, 99, 132, 0.7)", "rgba(255, 99, 132, 1)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipFormat {
    /// `"<unit>: <value>"`
    Unit(&'static str),
    /// `"<label>: <value> (<pct>%)"`
    Proportional,
    /// `"Impact: <pct with one decimal>%"`
    Impact,
}

/// The single dataset a chart shows. Values are always finite and >= 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub background: Vec<String>,
    pub border: Vec<String>,
}

impl Dataset {
    /// Build the dataset `role` plots for `snapshot`.
    ///
    /// Proportional roles never come back all zero: an empty split is drawn
    /// as a single full wedge on the first category so the widget still
    /// paints. The feature chart refuses blank weights instead.
    pub fn for_role(role: ChartRole, snapshot: &MetricsSnapshot) -> Result<Self, RenderError> {
        let dataset = match role {
            ChartRole::MonthlyActivity => Self {
                labels: MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
                values: snapshot.monthly_transactions.iter().map(|&n| n as f64).collect(),
                background: vec![PRIMARY_FILL.to_string()],
                border: vec![PRIMARY_LINE.to_string()],
            },
            ChartRole::AdminRiskDistribution | ChartRole::UserRiskDistribution => {
                let mut values: Vec<f64> = snapshot
                    .risk_distribution
                    .as_array()
                    .iter()
                    .map(|&n| n as f64)
                    .collect();
                if values.iter().all(|&v| v == 0.0) {
                    tracing::warn!("all {role} values are 0; drawing a placeholder wedge");
                    values[0] = 1.0;
                }
                Self {
                    labels: RISK_LABELS.iter().map(|l| l.to_string()).collect(),
                    values,
                    background: RISK_PALETTE.iter().map(|(fill, _)| fill.to_string()).collect(),
                    border: RISK_PALETTE.iter().map(|(_, line)| line.to_string()).collect(),
                }
            }
            ChartRole::FeatureImportance => {
                let features = snapshot
                    .feature_importance
                    .as_ref()
                    .filter(|features| !features.is_blank())
                    .ok_or(RenderError::NoData(role))?;
                let values: Vec<f64> = features.weights().collect();
                Self {
                    labels: features
                        .entries()
                        .iter()
                        .map(|(key, _)| format::feature_label(key))
                        .collect(),
                    background: impact_colors(&values, 0.7),
                    border: impact_colors(&values, 1.0),
                    values,
                }
            }
        };
        Ok(dataset.sanitized())
    }

    /// Zero out anything a chart cannot plot.
    fn sanitized(mut self) -> Self {
        for value in &mut self.values {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
        self
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Red grows with weight, green shrinks: `rgba(r, g, 100, alpha)`.
fn impact_colors(values: &[f64], alpha: f64) -> Vec<String> {
    values
        .iter()
        .map(|&value| {
            let red = (value * 400.0).round().clamp(0.0, 255.0) as u8;
            let green = ((1.0 - value) * 300.0).round().clamp(0.0, 255.0) as u8;
            format!("rgba({red}, {green}, 100, {alpha})")
        })
        .collect()
}

/// Everything needed to instantiate one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub role: ChartRole,
    pub kind: ChartKind,
    pub dataset: Dataset,
    pub tooltip: TooltipFormat,
}

impl ChartConfig {
    pub fn for_role(role: ChartRole, snapshot: &MetricsSnapshot) -> Result<Self, RenderError> {
        let tooltip = match role.kind() {
            ChartKind::Line => TooltipFormat::Unit("Transactions"),
            ChartKind::Pie | ChartKind::Doughnut => TooltipFormat::Proportional,
            ChartKind::HorizontalBar => TooltipFormat::Impact,
        };
        Ok(Self {
            role,
            kind: role.kind(),
            dataset: Dataset::for_role(role, snapshot)?,
            tooltip,
        })
    }

    /// Chart.js configuration object. Tooltip callbacks are functions and
    /// cannot travel as JSON; backends attach them separately using
    /// [`TooltipFormat::label`].
    pub fn to_chartjs(&self) -> Value {
        json!({
            "type": self.kind.chartjs_type(),
            "data": {
                "labels": self.dataset.labels,
                "datasets": [self.dataset_json()],
            },
            "options": self.options_json(),
        })
    }

    pub fn dataset_json(&self) -> Value {
        let ds = &self.dataset;
        match self.role {
            ChartRole::MonthlyActivity => json!({
                "label": "Transactions",
                "data": ds.values,
                "backgroundColor": PRIMARY_FILL,
                "borderColor": PRIMARY_LINE,
                "borderWidth": 2,
                "tension": 0.3,
                "pointBackgroundColor": PRIMARY_LINE,
                "pointBorderColor": "#fff",
                "pointRadius": 4,
                "fill": true,
            }),
            ChartRole::AdminRiskDistribution => json!({
                "data": ds.values,
                "backgroundColor": ds.background,
                "borderColor": ds.border,
                "borderWidth": 1,
            }),
            ChartRole::UserRiskDistribution => json!({
                "data": ds.values,
                "backgroundColor": ds.background,
                "borderColor": ds.border,
                "borderWidth": 1,
                "cutout": "70%",
            }),
            ChartRole::FeatureImportance => json!({
                "label": "Feature Importance",
                "data": ds.values,
                "backgroundColor": ds.background,
                "borderColor": ds.border,
                "borderWidth": 1,
            }),
        }
    }

    fn options_json(&self) -> Value {
        match self.role {
            ChartRole::MonthlyActivity => json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "title": title("Monthly Transaction Activity"),
                },
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "ticks": { "precision": 0, "color": DARK },
                        "grid": { "color": GRID },
                    },
                    "x": {
                        "ticks": { "color": DARK },
                        "grid": { "color": GRID },
                    },
                },
            }),
            ChartRole::AdminRiskDistribution => json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": { "display": false },
                    "tooltip": {
                        "backgroundColor": "rgba(0, 0, 0, 0.8)",
                        "cornerRadius": 6,
                        "padding": 8,
                        "titleFont": { "size": 14 },
                        "bodyFont": { "size": 12 },
                    },
                    "title": title("Transaction Risk Distribution"),
                },
                "animation": {
                    "animateScale": true,
                    "animateRotate": true,
                    "duration": 500,
                    "easing": "easeOutQuart",
                },
            }),
            ChartRole::UserRiskDistribution => json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": { "legend": { "display": false } },
                "animation": { "animateScale": true, "animateRotate": true },
            }),
            ChartRole::FeatureImportance => {
                let peak = self.dataset.max() * 1.1;
                let x_max = if peak > 0.0 { peak } else { 1.0 };
                json!({
                    "indexAxis": "y",
                    "responsive": true,
                    "maintainAspectRatio": false,
                    "plugins": { "legend": { "display": false } },
                    "scales": {
                        "x": {
                            "beginAtZero": true,
                            "max": x_max,
                            "title": { "display": true, "text": "Importance Score" },
                        },
                        "y": {
                            "title": { "display": true, "text": "Feature" },
                        },
                    },
                })
            }
        }
    }

    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        self.tooltip.label(&self.dataset, index)
    }
}

impl TooltipFormat {
    /// Tooltip text for point `index` of `dataset`.
    pub fn label(&self, dataset: &Dataset, index: usize) -> Option<String> {
        let value = *dataset.values.get(index)?;
        let text = match self {
            TooltipFormat::Unit(unit) => format::unit_label(unit, value),
            TooltipFormat::Proportional => {
                let label = dataset.labels.get(index).map(String::as_str).unwrap_or_default();
                format::proportion_label(label, value, &dataset.values)
            }
            TooltipFormat::Impact => format::impact_label(value),
        };
        Some(text)
    }
}

fn title(text: &str) -> Value {
    json!({
        "display": true,
        "text": text,
        "font": { "size": 16 },
        "color": DARK,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FeatureImportance, RiskDistribution};

    fn risk(low: u64, medium: u64, high: u64) -> MetricsSnapshot {
        MetricsSnapshot {
            risk_distribution: RiskDistribution { low, medium, high },
            ..MetricsSnapshot::default()
        }
    }

    #[test]
    fn all_zero_split_gets_placeholder_wedge() {
        for role in [ChartRole::AdminRiskDistribution, ChartRole::UserRiskDistribution] {
            let ds = Dataset::for_role(role, &risk(0, 0, 0)).unwrap();
            assert_eq!(ds.values, [1.0, 0.0, 0.0]);
        }
        let ds = Dataset::for_role(ChartRole::AdminRiskDistribution, &risk(0, 0, 3)).unwrap();
        assert_eq!(ds.values, [0.0, 0.0, 3.0]);
    }

    #[test]
    fn proportional_tooltips() {
        let config = ChartConfig::for_role(ChartRole::AdminRiskDistribution, &risk(1, 1, 2)).unwrap();
        assert_eq!(config.tooltip_label(0).unwrap(), "Low Risk: 1 (25%)");
        assert_eq!(config.tooltip_label(1).unwrap(), "Medium Risk: 1 (25%)");
        assert_eq!(config.tooltip_label(2).unwrap(), "High Risk: 2 (50%)");
        assert!(config.tooltip_label(3).is_none());
    }

    #[test]
    fn zero_total_tooltip_never_divides() {
        let dataset = Dataset {
            labels: RISK_LABELS.iter().map(|l| l.to_string()).collect(),
            values: vec![0.0; 3],
            ..Dataset::default()
        };
        for index in 0..3 {
            let label = TooltipFormat::Proportional.label(&dataset, index).unwrap();
            assert!(label.ends_with("(0%)"), "{label}");
        }
    }

    #[test]
    fn monthly_line_config() {
        let mut snap = MetricsSnapshot::default();
        snap.monthly_transactions[2] = 40;
        let config = ChartConfig::for_role(ChartRole::MonthlyActivity, &snap).unwrap();
        let js = config.to_chartjs();
        assert_eq!(js["type"], "line");
        assert_eq!(js["data"]["labels"][2], "Mar");
        assert_eq!(js["data"]["datasets"][0]["data"][2], 40.0);
        assert_eq!(js["options"]["scales"]["y"]["ticks"]["precision"], 0);
        assert_eq!(config.tooltip_label(2).unwrap(), "Transactions: 40");
    }

    #[test]
    fn feature_bars() {
        let snap = MetricsSnapshot {
            feature_importance: Some(
                [("txn_amount", 0.8), ("user_age", 0.2)].into_iter().collect(),
            ),
            ..MetricsSnapshot::default()
        };
        let config = ChartConfig::for_role(ChartRole::FeatureImportance, &snap).unwrap();
        assert_eq!(config.dataset.labels, ["txn amount", "user age"]);
        assert_eq!(config.tooltip_label(0).unwrap(), "Impact: 80.0%");
        assert_eq!(config.tooltip_label(1).unwrap(), "Impact: 20.0%");
        assert_eq!(config.dataset.background[0], "rgba(255, 60, 100, 0.7)");
        assert_eq!(config.dataset.border[1], "rgba(80, 240, 100, 1)");

        let js = config.to_chartjs();
        assert_eq!(js["options"]["indexAxis"], "y");
        let max = js["options"]["scales"]["x"]["max"].as_f64().unwrap();
        assert!((max - 0.88).abs() < 1e-9);
    }

    #[test]
    fn blank_features_are_refused() {
        let blank = MetricsSnapshot {
            feature_importance: Some(FeatureImportance::default()),
            ..MetricsSnapshot::default()
        };
        let zeros = MetricsSnapshot {
            feature_importance: Some([("a", 0.0), ("b", 0.0)].into_iter().collect()),
            ..MetricsSnapshot::default()
        };
        for snap in [MetricsSnapshot::default(), blank, zeros] {
            assert_eq!(
                Dataset::for_role(ChartRole::FeatureImportance, &snap),
                Err(RenderError::NoData(ChartRole::FeatureImportance))
            );
        }
    }
}
