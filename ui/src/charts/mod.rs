//! Chart synchronization layer: roles, per-role configuration, the registry of
//! live charts and the renderer that creates and updates them.

mod role;
pub use role::{ChartKind, ChartRole};

mod config;
pub use config::{ChartConfig, Dataset, TooltipFormat};

pub mod registry;
pub use registry::{ChartHandle, ChartRegistry};

pub mod renderer;
pub use renderer::{ChartBackend, PageHost, Renderer};

pub mod headless;
pub use headless::{HeadlessBackend, HeadlessChart, StaticPage};

#[cfg(target_arch = "wasm32")]
pub mod chartjs;
#[cfg(target_arch = "wasm32")]
pub mod dom;

pub mod readiness;

/// Backend and page bindings for the current target.
#[cfg(target_arch = "wasm32")]
pub type DefaultBackend = chartjs::ChartJsBackend;
#[cfg(target_arch = "wasm32")]
pub type DefaultPage = dom::DomPage;

#[cfg(not(target_arch = "wasm32"))]
pub type DefaultBackend = HeadlessBackend;
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultPage = StaticPage;
