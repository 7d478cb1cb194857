use std::fmt;

use futures::future::LocalBoxFuture;

use super::{net, FetchError, MetricsSnapshot};
use crate::core::config::DashboardConfig;

/// Which aggregate a snapshot comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Site-wide monthly activity and risk split.
    Admin,
    /// Risk split for the signed-in user's dashboard.
    User,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Admin => f.write_str("admin dashboard data"),
            Endpoint::User => f.write_str("user dashboard data"),
        }
    }
}

/// Produces normalized snapshots. Injected into the refresh loop so tests
/// can script responses without a server.
pub trait MetricsSource {
    fn fetch(&self, endpoint: Endpoint) -> LocalBoxFuture<'_, Result<MetricsSnapshot, FetchError>>;
}

/// Fetches snapshots from the dashboard's JSON endpoints. One request per
/// call, no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    config: DashboardConfig,
}

impl HttpSource {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::Admin => self.config.url(&self.config.admin_data_path),
            Endpoint::User => self.config.url(&self.config.user_data_path),
        }
    }
}

impl MetricsSource for HttpSource {
    fn fetch(&self, endpoint: Endpoint) -> LocalBoxFuture<'_, Result<MetricsSnapshot, FetchError>> {
        let url = self.url(endpoint);
        Box::pin(async move {
            let payload = net::get_json(&url).await?;
            Ok(MetricsSnapshot::from_payload(&payload))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_against_config() {
        let source = HttpSource::new(DashboardConfig {
            base_url: "http://dash.local".into(),
            ..DashboardConfig::default()
        });
        assert_eq!(source.url(Endpoint::Admin), "http://dash.local/admin/dashboard-data");
        assert_eq!(source.url(Endpoint::User), "http://dash.local/user/dashboard-data");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn unreachable_host_is_a_transport_error() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let source = HttpSource::new(DashboardConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..DashboardConfig::default()
        });
        let result = runtime.block_on(source.fetch(Endpoint::Admin));
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
