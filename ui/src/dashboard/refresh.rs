//! Periodic chart refresh.
//!
//! Every `interval_ms` the loop asks the metrics source for the snapshots the
//! mounted charts need and pushes them through the renderer. A failed fetch
//! or update is logged and leaves the affected charts as they were; the next
//! tick tries again from scratch.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{self, AbortHandle, Abortable};

use crate::charts::{ChartBackend, ChartRegistry, ChartRole, PageHost, Renderer};
use crate::core::{platform, timing};
use crate::metrics::{DashboardError, Endpoint, MetricsSnapshot, MetricsSource};

/// What one tick did.
#[derive(Debug, Default, PartialEq)]
pub struct TickReport {
    pub updated: Vec<ChartRole>,
    pub errors: Vec<DashboardError>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn merge(mut self, other: TickReport) -> Self {
        self.updated.extend(other.updated);
        self.errors.extend(other.errors);
        self
    }
}

pub struct RefreshLoop<B: ChartBackend, P, S> {
    renderer: Rc<RefCell<Renderer<B, P>>>,
    registry: Rc<RefCell<ChartRegistry<B::Chart>>>,
    source: Rc<S>,
    interval_ms: u64,
}

impl<B: ChartBackend, P, S> Clone for RefreshLoop<B, P, S> {
    fn clone(&self) -> Self {
        Self {
            renderer: self.renderer.clone(),
            registry: self.registry.clone(),
            source: self.source.clone(),
            interval_ms: self.interval_ms,
        }
    }
}

impl<B, P, S> RefreshLoop<B, P, S>
where
    B: ChartBackend + 'static,
    P: PageHost + 'static,
    S: MetricsSource + 'static,
{
    pub fn new(
        renderer: Rc<RefCell<Renderer<B, P>>>,
        registry: Rc<RefCell<ChartRegistry<B::Chart>>>,
        source: Rc<S>,
        interval_ms: u64,
    ) -> Self {
        Self {
            renderer,
            registry,
            source,
            interval_ms,
        }
    }

    /// One refresh. Admin and user snapshots are requested together and each
    /// is applied as soon as it arrives.
    pub async fn tick(&self) -> TickReport {
        let (admin, user) = future::join(self.poll(Endpoint::Admin), self.poll(Endpoint::User)).await;
        admin.merge(user)
    }

    /// Sleep, tick, repeat. Never returns; stop it through [`RefreshHandle`].
    pub async fn run(self) {
        loop {
            timing::sleep_ms(self.interval_ms).await;
            let report = self.tick().await;
            tracing::debug!(
                "refresh tick: {} chart(s) updated, {} error(s)",
                report.updated.len(),
                report.errors.len()
            );
        }
    }

    /// Start [`run`](Self::run) on the page's event loop.
    pub fn spawn(self) -> RefreshHandle {
        let (abort, registration) = AbortHandle::new_pair();
        platform::spawn_future(async move {
            let _ = Abortable::new(self.run(), registration).await;
            tracing::debug!("refresh loop stopped");
        });
        RefreshHandle { abort }
    }

    fn wants(&self, endpoint: Endpoint) -> bool {
        let registry = self.registry.borrow();
        ChartRole::roles_for(endpoint).any(|role| registry.has(role))
    }

    async fn poll(&self, endpoint: Endpoint) -> TickReport {
        let mut report = TickReport::default();
        if !self.wants(endpoint) {
            return report;
        }
        match self.source.fetch(endpoint).await {
            Ok(snapshot) => report = self.apply(endpoint, &snapshot),
            Err(err) => {
                tracing::error!("failed to fetch {endpoint}: {err}");
                report.errors.push(err.into());
            }
        }
        report
    }

    fn apply(&self, endpoint: Endpoint, snapshot: &MetricsSnapshot) -> TickReport {
        let mut report = TickReport::default();
        let mut renderer = self.renderer.borrow_mut();
        let mut registry = self.registry.borrow_mut();

        for role in ChartRole::roles_for(endpoint) {
            let Some(handle) = registry.get_mut(role) else {
                continue;
            };
            match renderer.update(handle, snapshot) {
                Ok(()) => report.updated.push(role),
                Err(err) => {
                    tracing::error!("failed to update {role} chart: {err}");
                    report.errors.push(err.into());
                }
            }
        }
        report
    }
}

/// Owner of a running refresh loop. Cancelling (or dropping) the handle
/// stops the loop at its next suspension point; a request already in flight
/// is abandoned and its response ignored.
#[derive(Debug)]
pub struct RefreshHandle {
    abort: AbortHandle,
}

impl RefreshHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
