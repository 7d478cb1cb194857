use dioxus::prelude::*;

use crate::charts::renderer::USER_TOTAL_ID;
use crate::charts::ChartRole;
use crate::components::{
    provide_toasts, use_dashboard, ChartCanvas, FeatureTable, InlineChartData, ToastHost,
    TransactionTable,
};
use crate::core::bootstrap::PageBootstrap;
use crate::metrics::RiskDistribution;

#[component]
pub fn UserDashboard() -> Element {
    let page = use_context::<PageBootstrap>();
    let config = use_context_provider(|| page.config.clone());
    provide_toasts(config.toast_lifetime_ms);
    use_dashboard(config);

    let user = page.user;
    let total = RiskDistribution::from_attributes(
        user.low.as_deref(),
        user.medium.as_deref(),
        user.high.as_deref(),
    )
    .total();
    let risk = InlineChartData {
        low: user.low.clone(),
        medium: user.medium.clone(),
        high: user.high.clone(),
        ..Default::default()
    };
    let features = InlineChartData {
        features: user.features.clone(),
        ..Default::default()
    };

    rsx! {
        section { class: "page page-user",
            h1 { "Your dashboard" }

            div { class: "stat-cards",
                div { class: "stat-card",
                    span { class: "stat-card__label", "Transactions" }
                    span { id: USER_TOTAL_ID, class: "stat-card__value", "{total}" }
                }
            }

            div { class: "chart-grid",
                ChartCanvas {
                    role: ChartRole::UserRiskDistribution,
                    title: "Fraud risk",
                    data: risk,
                }
                div {
                    ChartCanvas {
                        role: ChartRole::FeatureImportance,
                        title: "What drives your risk score",
                        data: features,
                    }
                    FeatureTable { features: user.features.clone() }
                }
            }

            h2 { "Transaction history" }
            TransactionTable { rows: user.transactions.clone(), actions: false }

            ToastHost {}
        }
    }
}
