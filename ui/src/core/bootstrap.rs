//! Server-provided page data.
//!
//! The host page embeds one JSON block:
//!
//! ```html
//! <script id="fraudwatch-bootstrap" type="application/json">{ ... }</script>
//! ```
//!
//! Chart inputs stay raw strings here. They are written verbatim into the
//! canvases' `data-*` attributes and normalized only when a chart reads them,
//! so a bad value from the template degrades the same way a bad refresh
//! payload does. Templates may emit them as JSON numbers, arrays or objects;
//! those are kept in their JSON text form.
//!
//! Each top-level section is decoded on its own, so one unusable section
//! falls back to defaults without taking the others with it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{config::DashboardConfig, platform};
use crate::metrics::coerce;

pub const BOOTSTRAP_ELEMENT_ID: &str = "fraudwatch-bootstrap";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBootstrap {
    pub config: DashboardConfig,
    pub admin: AdminPageData,
    pub user: UserPageData,
}

/// Inline values for the admin dashboard charts and tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminPageData {
    /// JSON array of twelve monthly counts.
    #[serde(deserialize_with = "raw_text")]
    pub transactions: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub low: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub medium: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub high: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub total: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub flagged: Option<String>,
    /// JSON object of feature weights.
    #[serde(deserialize_with = "raw_text")]
    pub features: Option<String>,
    pub flagged_transactions: Vec<TransactionRow>,
    pub users: Vec<UserRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPageData {
    #[serde(deserialize_with = "raw_text")]
    pub low: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub medium: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub high: Option<String>,
    #[serde(deserialize_with = "raw_text")]
    pub features: Option<String>,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRow {
    /// Database id used in action URLs.
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub transaction_id: String,
    #[serde(deserialize_with = "text")]
    pub amount: String,
    #[serde(deserialize_with = "text")]
    pub recipient: String,
    /// Badge text: `Low`, `Medium` or `High`.
    pub risk_level: String,
    /// RFC 3339.
    #[serde(deserialize_with = "raw_text")]
    pub timestamp: Option<String>,
    pub is_flagged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRow {
    #[serde(deserialize_with = "text")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(deserialize_with = "lenient_count")]
    pub transaction_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub flagged_count: u64,
}

impl PageBootstrap {
    /// Read the bootstrap block from the current page, falling back to
    /// defaults when it is missing or unparsable.
    pub fn load() -> Self {
        match platform::inline_text(BOOTSTRAP_ELEMENT_ID) {
            Some(raw) => Self::parse(&raw),
            None => {
                tracing::debug!("no #{BOOTSTRAP_ELEMENT_ID} block; using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Self {
        let root: Value = match serde_json::from_str(raw) {
            Ok(root) => root,
            Err(err) => {
                tracing::error!("bootstrap block is malformed ({err}); using defaults");
                return Self::default();
            }
        };
        Self {
            config: section(&root, "config"),
            admin: section(&root, "admin"),
            user: section(&root, "user"),
        }
    }
}

fn section<T: Default + serde::de::DeserializeOwned>(root: &Value, name: &str) -> T {
    let Some(value) = root.get(name).filter(|value| !value.is_null()) else {
        return T::default();
    };
    T::deserialize(value).unwrap_or_else(|err| {
        tracing::error!("bootstrap `{name}` is malformed ({err}); using defaults");
        T::default()
    })
}

/// Strings as-is, `null` as `None`, anything else as its JSON text.
fn raw_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    raw_text(deserializer).map(Option::unwrap_or_default)
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Value::deserialize(deserializer).map(|value| coerce::count(&value))
}
