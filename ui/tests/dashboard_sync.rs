//! End-to-end behaviour of the chart layer on the host target: inline data
//! in, charts created, refreshed from a scripted metrics source, torn down.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use serde_json::json;

use ui::charts::renderer::{ADMIN_FLAGGED_ID, ADMIN_TOTAL_ID, USER_TOTAL_ID};
use ui::charts::{ChartKind, ChartRole, HeadlessBackend, StaticPage};
use ui::core::config::DashboardConfig;
use ui::dashboard::DashboardController;
use ui::metrics::{DashboardError, Endpoint, FetchError, MetricsSnapshot, MetricsSource};

type Reply = Result<MetricsSnapshot, FetchError>;

#[derive(Default)]
struct Script {
    admin: RefCell<VecDeque<Reply>>,
    user: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<Endpoint>>,
}

/// Replies in order, then fails every further request.
#[derive(Clone, Default)]
struct ScriptedSource(Rc<Script>);

impl ScriptedSource {
    fn admin(self, reply: Reply) -> Self {
        self.0.admin.borrow_mut().push_back(reply);
        self
    }

    fn user(self, reply: Reply) -> Self {
        self.0.user.borrow_mut().push_back(reply);
        self
    }

    fn calls(&self) -> Vec<Endpoint> {
        self.0.calls.borrow().clone()
    }
}

impl MetricsSource for ScriptedSource {
    fn fetch(&self, endpoint: Endpoint) -> LocalBoxFuture<'_, Reply> {
        self.0.calls.borrow_mut().push(endpoint);
        let queue = match endpoint {
            Endpoint::Admin => &self.0.admin,
            Endpoint::User => &self.0.user,
        };
        let reply = queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".into())));
        Box::pin(async move { reply })
    }
}

type Controller = DashboardController<HeadlessBackend, StaticPage, ScriptedSource>;

fn controller(page: StaticPage, source: ScriptedSource) -> Controller {
    let config = DashboardConfig {
        refresh_interval_ms: 10,
        ..DashboardConfig::default()
    };
    DashboardController::new(config, HeadlessBackend::new(), page, source)
}

fn admin_page() -> StaticPage {
    StaticPage::new()
        .with_data(
            "transactionChart",
            "transactions",
            "[1,2,3,4,5,6,7,8,9,10,11,12]",
        )
        .with_data("riskDistributionChart", "low", "5")
        .with_data("riskDistributionChart", "medium", "3")
        .with_data("riskDistributionChart", "high", "2")
        .with_data("riskDistributionChart", "total", "10")
        .with_data("riskDistributionChart", "flagged", "2")
        .with_element(ADMIN_TOTAL_ID)
        .with_element(ADMIN_FLAGGED_ID)
}

fn values(controller: &Controller, role: ChartRole) -> Vec<f64> {
    controller
        .registry()
        .borrow()
        .get(role)
        .map(|handle| handle.raw().values().to_vec())
        .unwrap_or_default()
}

fn chart_id(controller: &Controller, role: ChartRole) -> Option<u64> {
    controller
        .registry()
        .borrow()
        .get(role)
        .map(|handle| handle.raw().id)
}

fn admin_payload(low: u64, medium: u64, high: u64) -> MetricsSnapshot {
    MetricsSnapshot::from_payload(&json!({
        "monthlyTransactions": [12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
        "riskDistribution": { "low": low, "medium": medium, "high": high },
        "total": low + medium + high,
        "flagged": high,
    }))
}

#[test]
fn feature_weights_render_as_labelled_bars() {
    let page = StaticPage::new().with_data(
        "featureImportanceChart",
        "features",
        r#"{"txn_amount": 0.8, "user_age": 0.2}"#,
    );
    let dashboard = controller(page, ScriptedSource::default());

    let mounted = block_on(dashboard.mount_charts());
    assert_eq!(mounted, vec![ChartRole::FeatureImportance]);

    let registry = dashboard.registry().borrow();
    let chart = registry
        .get(ChartRole::FeatureImportance)
        .expect("feature chart")
        .raw();
    assert_eq!(chart.kind(), ChartKind::HorizontalBar);
    assert_eq!(chart.labels(), ["txn amount", "user age"]);
    assert_eq!(chart.tooltip(0).as_deref(), Some("Impact: 80.0%"));
    assert_eq!(chart.tooltip(1).as_deref(), Some("Impact: 20.0%"));
}

#[test]
fn pages_without_canvases_mount_nothing() {
    let dashboard = controller(StaticPage::new(), ScriptedSource::default());
    assert!(block_on(dashboard.mount_charts()).is_empty());
    assert!(dashboard.registry().borrow().is_empty());
    assert_eq!(dashboard.renderer().borrow().backend().created(), 0);
}

#[test]
fn failed_refresh_keeps_previous_data() {
    let source = ScriptedSource::default().admin(Err(FetchError::BadStatus(500)));
    let dashboard = controller(admin_page(), source.clone());
    block_on(dashboard.mount_charts());
    let before = values(&dashboard, ChartRole::AdminRiskDistribution);

    let report = block_on(dashboard.refresh_loop().tick());

    assert_eq!(
        report.errors,
        vec![DashboardError::Fetch(FetchError::BadStatus(500))]
    );
    assert!(report.updated.is_empty());
    assert_eq!(values(&dashboard, ChartRole::AdminRiskDistribution), before);
    assert_eq!(before, vec![5.0, 3.0, 2.0]);
    // No user chart on the page, so only the admin endpoint was asked.
    assert_eq!(source.calls(), vec![Endpoint::Admin]);
}

#[test]
fn admin_refresh_updates_charts_in_place() {
    let source = ScriptedSource::default().admin(Ok(admin_payload(7, 2, 1)));
    let dashboard = controller(admin_page(), source);
    block_on(dashboard.mount_charts());
    let risk_id = chart_id(&dashboard, ChartRole::AdminRiskDistribution);
    let monthly_id = chart_id(&dashboard, ChartRole::MonthlyActivity);

    let report = block_on(dashboard.refresh_loop().tick());

    assert!(report.is_clean());
    assert_eq!(
        report.updated,
        vec![ChartRole::MonthlyActivity, ChartRole::AdminRiskDistribution]
    );
    assert_eq!(chart_id(&dashboard, ChartRole::AdminRiskDistribution), risk_id);
    assert_eq!(chart_id(&dashboard, ChartRole::MonthlyActivity), monthly_id);
    assert_eq!(values(&dashboard, ChartRole::AdminRiskDistribution), vec![7.0, 2.0, 1.0]);
    assert_eq!(values(&dashboard, ChartRole::MonthlyActivity)[0], 12.0);

    let renderer = dashboard.renderer().borrow();
    assert_eq!(renderer.page().text(ADMIN_TOTAL_ID).as_deref(), Some("10"));
    assert_eq!(renderer.page().text(ADMIN_FLAGGED_ID).as_deref(), Some("1"));
    assert_eq!(renderer.backend().created(), 2);
    assert_eq!(renderer.backend().destroyed(), 0);
}

#[test]
fn user_snapshot_feeds_user_chart() {
    let page = StaticPage::new()
        .with_data("fraudDistributionChart", "low", "0")
        .with_data("fraudDistributionChart", "medium", "0")
        .with_data("fraudDistributionChart", "high", "0")
        .with_element(USER_TOTAL_ID);
    let source = ScriptedSource::default().user(Ok(MetricsSnapshot::from_payload(&json!({
        "success": true,
        "riskDistribution": { "low": 1, "medium": 2, "high": 3 }
    }))));
    let dashboard = controller(page, source.clone());
    block_on(dashboard.mount_charts());
    // Empty distributions draw a placeholder slice.
    assert_eq!(values(&dashboard, ChartRole::UserRiskDistribution), vec![1.0, 0.0, 0.0]);

    let report = block_on(dashboard.refresh_loop().tick());

    assert_eq!(report.updated, vec![ChartRole::UserRiskDistribution]);
    assert_eq!(values(&dashboard, ChartRole::UserRiskDistribution), vec![1.0, 2.0, 3.0]);
    assert_eq!(source.calls(), vec![Endpoint::User]);
    let renderer = dashboard.renderer().borrow();
    assert_eq!(renderer.page().text(USER_TOTAL_ID).as_deref(), Some("6"));
}

#[test]
fn teardown_stops_the_refresh_loop() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async {
        let source = ScriptedSource::default()
            .admin(Ok(admin_payload(1, 1, 1)))
            .admin(Ok(admin_payload(2, 2, 2)));
        let dashboard = controller(admin_page(), source.clone());

        dashboard.start().await;
        assert!(dashboard.is_refreshing());

        tokio::time::sleep(Duration::from_millis(60)).await;
        let polled = source.calls().len();
        assert!(polled > 0, "refresh loop never ticked");

        dashboard.teardown();
        assert!(!dashboard.is_refreshing());
        assert!(dashboard.registry().borrow().is_empty());
        assert_eq!(dashboard.renderer().borrow().backend().destroyed(), 2);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(source.calls().len(), polled);
    });
}
