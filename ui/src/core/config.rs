//! Dashboard configuration. Every field has a default so a partial (or
//! missing) bootstrap block still yields a working page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every endpoint. Empty means same-origin relative URLs,
    /// which is what the browser build uses.
    pub base_url: String,
    pub admin_data_path: String,
    pub user_data_path: String,
    /// `{user_id}` is substituted per request.
    pub security_path: String,
    /// Admin user page opened by clicking a user row; `{user_id}` as above.
    pub user_detail_path: String,
    pub refresh_interval_ms: u64,
    /// Local copy of Chart.js injected when the CDN build never arrived.
    pub chart_library_src: String,
    pub toast_lifetime_ms: u64,
    pub filter_debounce_ms: u64,
    pub action_reload_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            admin_data_path: "/admin/dashboard-data".into(),
            user_data_path: "/user/dashboard-data".into(),
            security_path: "/admin/view-user-security/{user_id}".into(),
            user_detail_path: "/admin/users/{user_id}".into(),
            refresh_interval_ms: 30_000,
            chart_library_src: "/static/js/chart.min.js".into(),
            toast_lifetime_ms: 5_000,
            filter_debounce_ms: 300,
            action_reload_delay_ms: 1_500,
        }
    }
}

impl DashboardConfig {
    /// Join `base_url` and `path` without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn security_url(&self, user_id: &str) -> String {
        self.url(&self.security_path.replace("{user_id}", user_id))
    }

    pub fn user_detail_url(&self, user_id: &str) -> String {
        self.url(&self.user_detail_path.replace("{user_id}", user_id))
    }
}
