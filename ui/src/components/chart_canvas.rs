use dioxus::prelude::*;

use crate::charts::renderer::FEATURE_TABLE_ID;
use crate::charts::ChartRole;
use crate::core::format;
use crate::metrics::FeatureImportance;

/// Raw `data-*` values for a canvas, passed through untouched. The renderer
/// normalizes them when the chart is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineChartData {
    pub transactions: Option<String>,
    pub low: Option<String>,
    pub medium: Option<String>,
    pub high: Option<String>,
    pub total: Option<String>,
    pub flagged: Option<String>,
    pub features: Option<String>,
}

#[component]
pub fn ChartCanvas(role: ChartRole, title: String, data: InlineChartData) -> Element {
    rsx! {
        div { class: "chart-card",
            h3 { class: "chart-card__title", "{title}" }
            div { class: "chart-card__body",
                canvas {
                    id: role.canvas_id(),
                    "data-transactions": data.transactions,
                    "data-low": data.low,
                    "data-medium": data.medium,
                    "data-high": data.high,
                    "data-total": data.total,
                    "data-flagged": data.flagged,
                    "data-features": data.features,
                }
            }
        }
    }
}

/// Table shown in place of the feature chart when the weights are unusable.
/// Hidden until the renderer reveals it.
#[component]
pub fn FeatureTable(#[props(!optional)] features: Option<String>) -> Element {
    let rows: Vec<(String, String)> = FeatureImportance::from_attribute(features.as_deref())
        .map(|features| {
            features
                .entries()
                .iter()
                .map(|(key, weight)| (format::feature_label(key), format!("{:.1}%", weight * 100.0)))
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        table { id: FEATURE_TABLE_ID, class: "table feature-table", style: "display: none",
            thead {
                tr {
                    th { "Feature" }
                    th { "Impact" }
                }
            }
            tbody {
                if rows.is_empty() {
                    tr {
                        td { colspan: "2", "No feature data available" }
                    }
                }
                for (label, impact) in rows {
                    tr { key: "{label}",
                        td { "{label}" }
                        td { "{impact}" }
                    }
                }
            }
        }
    }
}
