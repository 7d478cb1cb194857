//! Page controller: owns the chart registry, the renderer, the metrics source
//! and the refresh task for one dashboard page.

pub mod refresh;
pub use refresh::{RefreshHandle, RefreshLoop, TickReport};

use std::cell::RefCell;
use std::rc::Rc;

use crate::charts::{readiness, ChartBackend, ChartRegistry, ChartRole, PageHost, Renderer};
use crate::core::config::DashboardConfig;
use crate::metrics::MetricsSource;

pub struct DashboardController<B: ChartBackend, P, S> {
    config: DashboardConfig,
    renderer: Rc<RefCell<Renderer<B, P>>>,
    registry: Rc<RefCell<ChartRegistry<B::Chart>>>,
    source: Rc<S>,
    refresh: RefCell<Option<RefreshHandle>>,
}

impl<B, P, S> DashboardController<B, P, S>
where
    B: ChartBackend + 'static,
    P: PageHost + 'static,
    S: MetricsSource + 'static,
{
    pub fn new(config: DashboardConfig, backend: B, page: P, source: S) -> Self {
        Self {
            config,
            renderer: Rc::new(RefCell::new(Renderer::new(backend, page))),
            registry: Rc::new(RefCell::new(ChartRegistry::new())),
            source: Rc::new(source),
            refresh: RefCell::new(None),
        }
    }

    pub fn registry(&self) -> &Rc<RefCell<ChartRegistry<B::Chart>>> {
        &self.registry
    }

    pub fn renderer(&self) -> &Rc<RefCell<Renderer<B, P>>> {
        &self.renderer
    }

    /// Wait for the chart library, then create a chart for every role whose
    /// canvas is on the page. Returns the roles that now have a chart.
    pub async fn mount_charts(&self) -> Vec<ChartRole> {
        if let Err(err) = readiness::chart_library_ready(&self.config.chart_library_src).await {
            tracing::error!("charts disabled: {err}");
            return Vec::new();
        }

        let mut renderer = self.renderer.borrow_mut();
        let mut registry = self.registry.borrow_mut();
        for role in ChartRole::ALL {
            if !renderer.page().has_element(role.canvas_id()) {
                tracing::debug!("no #{} on this page; skipping {role}", role.canvas_id());
                continue;
            }
            // Failures are logged by the renderer and leave the role unregistered.
            let _ = renderer.mount(role, &mut registry);
        }
        registry.roles().collect()
    }

    pub fn refresh_loop(&self) -> RefreshLoop<B, P, S> {
        RefreshLoop::new(
            self.renderer.clone(),
            self.registry.clone(),
            self.source.clone(),
            self.config.refresh_interval_ms,
        )
    }

    /// Start polling unless a loop is already running.
    pub fn start_refresh(&self) {
        let mut slot = self.refresh.borrow_mut();
        if slot.as_ref().is_some_and(|handle| !handle.is_cancelled()) {
            return;
        }
        *slot = Some(self.refresh_loop().spawn());
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh
            .borrow()
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    /// Mount the charts and, when any of them has a refresh endpoint, start
    /// polling.
    pub async fn start(&self) {
        let mounted = self.mount_charts().await;
        if mounted.iter().any(|role| role.endpoint().is_some()) {
            self.start_refresh();
        }
    }

    /// Stop polling and destroy every chart.
    pub fn teardown(&self) {
        if let Some(handle) = self.refresh.borrow_mut().take() {
            handle.cancel();
        }
        let mut renderer = self.renderer.borrow_mut();
        renderer.teardown(&mut self.registry.borrow_mut());
    }
}
