//! Creates charts from inline page data and keeps them in sync with fresh
//! snapshots.

use super::{ChartConfig, ChartHandle, ChartRegistry, ChartRole};
use crate::metrics::{FeatureImportance, MetricsSnapshot, RenderError, RiskDistribution};

/// Table shown in place of the feature chart when there is nothing to plot.
pub const FEATURE_TABLE_ID: &str = "featureImportanceTable";
/// Running total beside the user's doughnut.
pub const USER_TOTAL_ID: &str = "totalTransactions";
pub const ADMIN_TOTAL_ID: &str = "adminTotalTransactions";
pub const ADMIN_FLAGGED_ID: &str = "adminFlaggedTransactions";

/// Drawing surface for charts.
pub trait ChartBackend {
    type Chart;

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<Self::Chart, RenderError>;

    /// Swap the chart's labels, values and colours for `config`'s and redraw.
    /// The chart object itself must survive.
    fn replace_dataset(
        &mut self,
        chart: &mut Self::Chart,
        config: &ChartConfig,
    ) -> Result<(), RenderError>;

    fn destroy(&mut self, chart: Self::Chart);
}

/// The parts of the page the renderer reads from or writes to.
pub trait PageHost {
    fn has_element(&self, id: &str) -> bool;

    /// Value of `data-<name>` on element `id`.
    fn data_attribute(&self, id: &str, name: &str) -> Option<String>;

    /// Hide `chart_id` and reveal `table_id`.
    fn show_fallback_table(&self, chart_id: &str, table_id: &str);

    fn set_text(&self, id: &str, text: &str);
}

pub struct Renderer<B, P> {
    backend: B,
    page: P,
}

impl<B: ChartBackend, P: PageHost> Renderer<B, P> {
    pub fn new(backend: B, page: P) -> Self {
        Self { backend, page }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Snapshot described by the `data-*` attributes on `role`'s canvas.
    pub fn inline_snapshot(&self, role: ChartRole) -> Result<MetricsSnapshot, RenderError> {
        let canvas = role.canvas_id();
        if !self.page.has_element(canvas) {
            return Err(RenderError::MissingElement(canvas.to_string()));
        }
        let attr = |name: &str| self.page.data_attribute(canvas, name);

        let mut snapshot = MetricsSnapshot::default();
        match role {
            ChartRole::MonthlyActivity => {
                snapshot.monthly_transactions =
                    MetricsSnapshot::monthly_from_attribute(attr("transactions").as_deref());
            }
            ChartRole::AdminRiskDistribution | ChartRole::UserRiskDistribution => {
                snapshot.risk_distribution = RiskDistribution::from_attributes(
                    attr("low").as_deref(),
                    attr("medium").as_deref(),
                    attr("high").as_deref(),
                );
                snapshot.total = crate::metrics::coerce::attribute_count(attr("total").as_deref());
                snapshot.flagged =
                    crate::metrics::coerce::attribute_count(attr("flagged").as_deref());
                tracing::debug!(
                    "{role} inline data: {:?}, total {}, flagged {}",
                    snapshot.risk_distribution,
                    snapshot.total,
                    snapshot.flagged
                );
            }
            ChartRole::FeatureImportance => {
                snapshot.feature_importance =
                    FeatureImportance::from_attribute(attr("features").as_deref());
            }
        }
        Ok(snapshot)
    }

    /// Create the chart for `role`.
    pub fn render(
        &mut self,
        role: ChartRole,
        snapshot: &MetricsSnapshot,
    ) -> Result<ChartHandle<B::Chart>, RenderError> {
        let canvas = role.canvas_id();
        if !self.page.has_element(canvas) {
            return Err(RenderError::MissingElement(canvas.to_string()));
        }

        let config = match ChartConfig::for_role(role, snapshot) {
            Ok(config) => config,
            Err(err @ RenderError::NoData(ChartRole::FeatureImportance)) => {
                tracing::warn!("no valid feature importance data available");
                self.page.show_fallback_table(canvas, FEATURE_TABLE_ID);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let chart = self.backend.create(canvas, &config)?;
        self.write_totals(role, snapshot);
        Ok(ChartHandle::new(role, canvas, chart))
    }

    /// Push `snapshot` into an existing chart without recreating it.
    pub fn update(
        &mut self,
        handle: &mut ChartHandle<B::Chart>,
        snapshot: &MetricsSnapshot,
    ) -> Result<(), RenderError> {
        let role = handle.role();
        if role == ChartRole::FeatureImportance && snapshot.feature_importance.is_none() {
            return Ok(());
        }
        let config = ChartConfig::for_role(role, snapshot)?;
        self.backend.replace_dataset(handle.raw_mut(), &config)?;
        self.write_totals(role, snapshot);
        Ok(())
    }

    /// Render `role` from its inline data and register it. Anything already
    /// registered for the role is destroyed first.
    pub fn mount(
        &mut self,
        role: ChartRole,
        registry: &mut ChartRegistry<B::Chart>,
    ) -> Result<(), RenderError> {
        let handle = match self
            .inline_snapshot(role)
            .and_then(|snapshot| self.render(role, &snapshot))
        {
            Ok(handle) => handle,
            Err(err @ RenderError::NoData(_)) => return Err(err),
            Err(err) => {
                tracing::error!("{role} chart not created: {err}");
                return Err(err);
            }
        };
        if let Some(previous) = registry.set(handle) {
            self.backend.destroy(previous.into_raw());
        }
        Ok(())
    }

    pub fn teardown(&mut self, registry: &mut ChartRegistry<B::Chart>) {
        for handle in registry.drain() {
            self.backend.destroy(handle.into_raw());
        }
    }

    /// Counters shown next to the risk charts.
    fn write_totals(&self, role: ChartRole, snapshot: &MetricsSnapshot) {
        let write = |id: &str, value: u64| {
            if self.page.has_element(id) {
                self.page.set_text(id, &value.to_string());
            }
        };
        match role {
            ChartRole::UserRiskDistribution => {
                write(USER_TOTAL_ID, snapshot.risk_distribution.total());
            }
            ChartRole::AdminRiskDistribution => {
                write(ADMIN_TOTAL_ID, snapshot.total);
                write(ADMIN_FLAGGED_ID, snapshot.flagged);
            }
            ChartRole::MonthlyActivity | ChartRole::FeatureImportance => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{HeadlessBackend, StaticPage};
    use crate::metrics::RiskDistribution;

    fn renderer(page: StaticPage) -> Renderer<HeadlessBackend, StaticPage> {
        Renderer::new(HeadlessBackend::new(), page)
    }

    #[test]
    fn missing_canvas_creates_nothing() {
        let mut r = renderer(StaticPage::new());
        let mut registry = ChartRegistry::new();
        for role in ChartRole::ALL {
            assert_eq!(
                r.mount(role, &mut registry),
                Err(RenderError::MissingElement(role.canvas_id().to_string()))
            );
        }
        assert!(registry.is_empty());
        assert_eq!(r.backend().created(), 0);
    }

    #[test]
    fn inline_attributes_are_normalized() {
        let page = StaticPage::new()
            .with_data("transactionChart", "transactions", "[1, \"2\", null]")
            .with_data("fraudDistributionChart", "low", "3")
            .with_data("fraudDistributionChart", "medium", "oops")
            .with_data("fraudDistributionChart", "high", "4px")
            .with_element(USER_TOTAL_ID);
        let mut r = renderer(page);
        let mut registry = ChartRegistry::new();

        r.mount(ChartRole::MonthlyActivity, &mut registry).unwrap();
        r.mount(ChartRole::UserRiskDistribution, &mut registry).unwrap();

        let monthly = registry.get(ChartRole::MonthlyActivity).unwrap().raw();
        assert_eq!(monthly.values(), [0.0; 12]);
        let user = registry.get(ChartRole::UserRiskDistribution).unwrap().raw();
        assert_eq!(user.values(), [3.0, 0.0, 4.0]);
        assert_eq!(r.page().text(USER_TOTAL_ID).as_deref(), Some("7"));
    }

    #[test]
    fn unusable_features_fall_back_to_table() {
        let page = StaticPage::new()
            .with_data("featureImportanceChart", "features", "{\"a\": 0, \"b\": 0}")
            .with_element(FEATURE_TABLE_ID);
        let mut r = renderer(page);
        let mut registry = ChartRegistry::new();

        let result = r.mount(ChartRole::FeatureImportance, &mut registry);
        assert_eq!(result, Err(RenderError::NoData(ChartRole::FeatureImportance)));
        assert!(r.page().is_hidden("featureImportanceChart"));
        assert!(r.page().is_revealed(FEATURE_TABLE_ID));
        assert!(registry.is_empty());
    }

    #[test]
    fn update_mutates_in_place_and_is_idempotent() {
        let page = StaticPage::new().with_data("riskDistributionChart", "low", "1");
        let mut r = renderer(page);
        let mut registry = ChartRegistry::new();
        r.mount(ChartRole::AdminRiskDistribution, &mut registry).unwrap();

        let snapshot = MetricsSnapshot {
            risk_distribution: RiskDistribution {
                low: 5,
                medium: 3,
                high: 2,
            },
            ..MetricsSnapshot::default()
        };
        let handle = registry.get_mut(ChartRole::AdminRiskDistribution).unwrap();
        let id = handle.raw().id;

        r.update(handle, &snapshot).unwrap();
        let once = handle.raw().values().to_vec();
        r.update(handle, &snapshot).unwrap();

        assert_eq!(handle.raw().values(), once.as_slice());
        assert_eq!(once, [5.0, 3.0, 2.0]);
        assert_eq!(handle.raw().id, id);
        assert_eq!(handle.raw().redraws, 2);
        assert_eq!(r.backend().created(), 1);
        assert_eq!(r.backend().destroyed(), 0);
    }

    #[test]
    fn update_without_features_keeps_bars() {
        let page = StaticPage::new().with_data(
            "featureImportanceChart",
            "features",
            "{\"txn_amount\": 0.8, \"user_age\": 0.2}",
        );
        let mut r = renderer(page);
        let mut registry = ChartRegistry::new();
        r.mount(ChartRole::FeatureImportance, &mut registry).unwrap();

        let handle = registry.get_mut(ChartRole::FeatureImportance).unwrap();
        r.update(handle, &MetricsSnapshot::default()).unwrap();
        assert_eq!(handle.raw().labels(), ["txn amount", "user age"]);
        assert_eq!(handle.raw().redraws, 0);
    }

    #[test]
    fn teardown_destroys_everything() {
        let page = StaticPage::new()
            .with_element("transactionChart")
            .with_element("riskDistributionChart");
        let mut r = renderer(page);
        let mut registry = ChartRegistry::new();
        r.mount(ChartRole::MonthlyActivity, &mut registry).unwrap();
        r.mount(ChartRole::AdminRiskDistribution, &mut registry).unwrap();

        r.teardown(&mut registry);
        assert!(registry.is_empty());
        assert_eq!(r.backend().destroyed(), 2);
    }
}
