//! Moderation actions on flagged transactions.
//!
//! The admin table submits each action form as a flat JSON object and shows
//! the `{success, message}` reply as a toast. A successful action reloads the
//! page shortly afterwards so the tables reflect the change.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::toast::ToastLevel;
use crate::metrics::{net, FetchError};

pub const ACTION_FAILED: &str = "Action failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionAction {
    Flag,
    Unflag,
    Delete,
}

impl TransactionAction {
    pub fn path(self, transaction_id: &str) -> String {
        match self {
            TransactionAction::Flag => format!("/admin/flag-transaction/{transaction_id}"),
            TransactionAction::Unflag => format!("/admin/unflag-transaction/{transaction_id}"),
            TransactionAction::Delete => format!("/admin/delete-transaction/{transaction_id}"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionAction::Flag => "Flag",
            TransactionAction::Unflag => "Unflag",
            TransactionAction::Delete => "Delete",
        }
    }

    pub fn button_class(self) -> &'static str {
        match self {
            TransactionAction::Flag => "btn btn-sm btn-outline-warning",
            TransactionAction::Unflag => "btn btn-sm btn-outline-success unflag-btn",
            TransactionAction::Delete => "btn btn-sm btn-outline-danger",
        }
    }
}

/// Reply body of an action endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

/// What the page should do after an action settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub level: ToastLevel,
    pub message: String,
    pub reload: bool,
}

impl ActionOutcome {
    fn failed() -> Self {
        Self {
            level: ToastLevel::Danger,
            message: ACTION_FAILED.to_string(),
            reload: false,
        }
    }

    /// Interpret an action reply. The status code is ignored; only the body's
    /// `success` flag decides the toast level.
    pub fn from_response(response: Result<Value, FetchError>) -> Self {
        let body = match response {
            Ok(body) => body,
            Err(err) => {
                tracing::error!("transaction action error: {err}");
                return Self::failed();
            }
        };
        let result: ActionResult = match serde_json::from_value(body) {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("transaction action reply unreadable: {err}");
                return Self::failed();
            }
        };

        let message = if result.message.is_empty() {
            if result.success {
                "Action completed".to_string()
            } else {
                ACTION_FAILED.to_string()
            }
        } else {
            result.message
        };
        Self {
            level: ToastLevel::from_success(result.success),
            message,
            reload: result.success,
        }
    }
}

/// Form fields as a JSON object. Later duplicates overwrite earlier ones.
pub fn form_body<'a, I>(fields: I) -> Value
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let map: Map<String, Value> = fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect();
    Value::Object(map)
}

/// POST the form to `url` and interpret the reply.
pub async fn submit(url: &str, body: &Value) -> ActionOutcome {
    let response = net::post_json(url, body).await.map(|(status, body)| {
        tracing::debug!("transaction action {url} answered {status}");
        body
    });
    ActionOutcome::from_response(response)
}
