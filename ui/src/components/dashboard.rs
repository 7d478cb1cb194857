use std::rc::Rc;

use dioxus::prelude::*;

use crate::charts::{DefaultBackend, DefaultPage};
use crate::core::config::DashboardConfig;
use crate::dashboard::DashboardController;
use crate::metrics::HttpSource;

pub type PageController = DashboardController<DefaultBackend, DefaultPage, HttpSource>;

/// Bind a dashboard controller to the calling view. Charts are mounted once
/// the view's canvases are in the document; leaving the view stops the
/// refresh loop and destroys the charts.
pub fn use_dashboard(config: DashboardConfig) -> Rc<PageController> {
    let controller = use_hook(move || {
        let source = HttpSource::new(config.clone());
        Rc::new(DashboardController::new(
            config,
            DefaultBackend::default(),
            DefaultPage::default(),
            source,
        ))
    });

    let starter = controller.clone();
    use_effect(move || {
        let controller = starter.clone();
        spawn(async move {
            controller.start().await;
        });
    });

    let owner = controller.clone();
    use_drop(move || owner.teardown());

    controller
}
