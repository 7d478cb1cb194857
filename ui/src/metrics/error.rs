use thiserror::Error;

use crate::charts::ChartRole;

/// Failure of a single request. Terminal for that request only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server answered with status {0}")]
    BadStatus(u16),
}

/// Failure of a single chart create or update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("element #{0} is not on the page")]
    MissingElement(String),
    #[error("no data to plot for {0}")]
    NoData(ChartRole),
    #[error("chart backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
