use dioxus::prelude::*;

use crate::charts::renderer::{ADMIN_FLAGGED_ID, ADMIN_TOTAL_ID};
use crate::charts::ChartRole;
use crate::components::{
    provide_security_modal, provide_toasts, use_dashboard, ChartCanvas, FeatureTable,
    InlineChartData, SecurityModal, ToastHost, TransactionTable, UserTable,
};
use crate::core::bootstrap::PageBootstrap;

#[component]
pub fn AdminDashboard() -> Element {
    let page = use_context::<PageBootstrap>();
    let config = use_context_provider(|| page.config.clone());
    provide_toasts(config.toast_lifetime_ms);
    provide_security_modal();
    use_dashboard(config);

    let admin = page.admin;
    let monthly = InlineChartData {
        transactions: admin.transactions.clone(),
        ..Default::default()
    };
    let risk = InlineChartData {
        low: admin.low.clone(),
        medium: admin.medium.clone(),
        high: admin.high.clone(),
        total: admin.total.clone(),
        flagged: admin.flagged.clone(),
        ..Default::default()
    };
    let features = InlineChartData {
        features: admin.features.clone(),
        ..Default::default()
    };
    let total = admin.total.clone().unwrap_or_else(|| "0".into());
    let flagged = admin.flagged.clone().unwrap_or_else(|| "0".into());

    rsx! {
        section { class: "page page-admin",
            h1 { "Admin dashboard" }

            div { class: "stat-cards",
                div { class: "stat-card",
                    span { class: "stat-card__label", "Total transactions" }
                    span { id: ADMIN_TOTAL_ID, class: "stat-card__value", "{total}" }
                }
                div { class: "stat-card",
                    span { class: "stat-card__label", "Flagged" }
                    span { id: ADMIN_FLAGGED_ID, class: "stat-card__value", "{flagged}" }
                }
            }

            div { class: "chart-grid",
                ChartCanvas {
                    role: ChartRole::MonthlyActivity,
                    title: "Monthly transactions",
                    data: monthly,
                }
                ChartCanvas {
                    role: ChartRole::AdminRiskDistribution,
                    title: "Risk distribution",
                    data: risk,
                }
                div {
                    ChartCanvas {
                        role: ChartRole::FeatureImportance,
                        title: "Feature importance",
                        data: features,
                    }
                    FeatureTable { features: admin.features.clone() }
                }
            }

            h2 { "Flagged transactions" }
            TransactionTable { rows: admin.flagged_transactions.clone(), actions: true }

            h2 { "Users" }
            UserTable { users: admin.users.clone() }

            SecurityModal {}
            ToastHost {}
        }
    }
}
