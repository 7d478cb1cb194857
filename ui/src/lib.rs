//! Shared UI crate for FraudWatch: the chart synchronization layer behind
//! the admin and user dashboards, plus the views that host it.

pub mod charts;
pub mod core;
pub mod dashboard;
pub mod metrics;
pub mod page;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;

    mod chart_canvas;
    pub use chart_canvas::{ChartCanvas, FeatureTable, InlineChartData};

    mod dashboard;
    pub use dashboard::{use_dashboard, PageController};

    mod password_meter;
    pub use password_meter::PasswordField;

    mod security;
    pub use security::{provide_security_modal, OpenSecurityDetails, SecurityModal, UserTable};

    mod toasts;
    pub use toasts::{provide_toasts, use_toasts, ToastHost, Toasts};

    mod transaction_table;
    pub use transaction_table::TransactionTable;
}
