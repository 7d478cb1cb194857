//! Per-user security details for the admin user table.

use serde::Deserialize;
use serde_json::Value;

use crate::core::config::DashboardConfig;
use crate::metrics::{net, FetchError};

pub const PERMISSION_DENIED: &str = "You do not have permission to view this data";
pub const LOAD_FAILED: &str =
    "Failed to load security details. Please check console for details.";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SecurityDetails {
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub last_login: String,
    pub security_question: String,
    pub security_answer: String,
    pub password_hash: String,
}

impl SecurityDetails {
    /// `(input id, label, value)` rows in display order.
    pub fn fields(&self) -> [(&'static str, &'static str, &str); 7] {
        [
            ("modalUsername", "Username", self.username.as_str()),
            ("modalEmail", "Email", self.email.as_str()),
            ("modalCreatedAt", "Created", self.created_at.as_str()),
            ("modalLastLogin", "Last login", self.last_login.as_str()),
            ("modalSecurityQuestion", "Security question", self.security_question.as_str()),
            ("modalSecurityAnswer", "Security answer", self.security_answer.as_str()),
            ("modalPasswordHash", "Password hash", self.password_hash.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityOutcome {
    Show(SecurityDetails),
    Alert(String),
}

impl SecurityOutcome {
    pub fn from_response(response: Result<Value, FetchError>) -> Self {
        let body = match response {
            Ok(body) => body,
            Err(err) => {
                tracing::error!("security details request failed: {err}");
                return SecurityOutcome::Alert(LOAD_FAILED.to_string());
            }
        };

        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !success {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or(PERMISSION_DENIED);
            return SecurityOutcome::Alert(message.to_string());
        }

        match serde_json::from_value(body) {
            Ok(details) => SecurityOutcome::Show(details),
            Err(err) => {
                tracing::error!("security details unreadable: {err}");
                SecurityOutcome::Alert(LOAD_FAILED.to_string())
            }
        }
    }
}

pub async fn fetch(config: &DashboardConfig, user_id: &str) -> SecurityOutcome {
    let url = config.security_url(user_id);
    SecurityOutcome::from_response(net::get_json(&url).await)
}
