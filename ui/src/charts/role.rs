use std::fmt;

use crate::metrics::Endpoint;

/// Fixed identity of one chart on the dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartRole {
    MonthlyActivity,
    AdminRiskDistribution,
    UserRiskDistribution,
    FeatureImportance,
}

/// Visual type; maps 1:1 onto Chart.js chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Pie,
    Doughnut,
    HorizontalBar,
}

impl ChartKind {
    pub fn chartjs_type(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::HorizontalBar => "bar",
        }
    }

    pub fn is_proportional(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const RISK_LABELS: [&str; 3] = ["Low Risk", "Medium Risk", "High Risk"];

impl ChartRole {
    pub const ALL: [ChartRole; 4] = [
        ChartRole::MonthlyActivity,
        ChartRole::AdminRiskDistribution,
        ChartRole::UserRiskDistribution,
        ChartRole::FeatureImportance,
    ];

    pub fn kind(self) -> ChartKind {
        match self {
            ChartRole::MonthlyActivity => ChartKind::Line,
            ChartRole::AdminRiskDistribution => ChartKind::Pie,
            ChartRole::UserRiskDistribution => ChartKind::Doughnut,
            ChartRole::FeatureImportance => ChartKind::HorizontalBar,
        }
    }

    /// Canvas element the chart binds to.
    pub fn canvas_id(self) -> &'static str {
        match self {
            ChartRole::MonthlyActivity => "transactionChart",
            ChartRole::AdminRiskDistribution => "riskDistributionChart",
            ChartRole::UserRiskDistribution => "fraudDistributionChart",
            ChartRole::FeatureImportance => "featureImportanceChart",
        }
    }

    /// Number of data points, `None` when it follows the payload.
    pub fn arity(self) -> Option<usize> {
        match self {
            ChartRole::MonthlyActivity => Some(MONTH_LABELS.len()),
            ChartRole::AdminRiskDistribution | ChartRole::UserRiskDistribution => {
                Some(RISK_LABELS.len())
            }
            ChartRole::FeatureImportance => None,
        }
    }

    /// Endpoint whose snapshots refresh this chart. Feature weights only come
    /// from the page.
    pub fn endpoint(self) -> Option<Endpoint> {
        match self {
            ChartRole::MonthlyActivity | ChartRole::AdminRiskDistribution => Some(Endpoint::Admin),
            ChartRole::UserRiskDistribution => Some(Endpoint::User),
            ChartRole::FeatureImportance => None,
        }
    }

    pub fn roles_for(endpoint: Endpoint) -> impl Iterator<Item = ChartRole> {
        Self::ALL
            .into_iter()
            .filter(move |role| role.endpoint() == Some(endpoint))
    }
}

impl fmt::Display for ChartRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartRole::MonthlyActivity => "monthly activity",
            ChartRole::AdminRiskDistribution => "admin risk distribution",
            ChartRole::UserRiskDistribution => "user risk distribution",
            ChartRole::FeatureImportance => "feature importance",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_have_fixed_types() {
        assert_eq!(ChartRole::MonthlyActivity.kind().chartjs_type(), "line");
        assert_eq!(ChartRole::AdminRiskDistribution.kind().chartjs_type(), "pie");
        assert_eq!(ChartRole::UserRiskDistribution.kind().chartjs_type(), "doughnut");
        assert_eq!(ChartRole::FeatureImportance.kind().chartjs_type(), "bar");
    }

    #[test]
    fn endpoints_feed_the_right_roles() {
        let admin: Vec<_> = ChartRole::roles_for(Endpoint::Admin).collect();
        assert_eq!(
            admin,
            [ChartRole::MonthlyActivity, ChartRole::AdminRiskDistribution]
        );
        let user: Vec<_> = ChartRole::roles_for(Endpoint::User).collect();
        assert_eq!(user, [ChartRole::UserRiskDistribution]);
    }
}
