//! Dashboard metrics: the normalized snapshot model and where snapshots come from.

mod error;
pub use error::{DashboardError, FetchError, RenderError};

mod snapshot;
pub use snapshot::{FeatureImportance, MetricsSnapshot, RiskDistribution, MONTHS};

pub(crate) mod coerce;

mod source;
pub use source::{Endpoint, HttpSource, MetricsSource};

pub mod net;
