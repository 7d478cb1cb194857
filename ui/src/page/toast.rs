use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Danger,
}

impl ToastLevel {
    pub fn from_success(success: bool) -> Self {
        if success {
            ToastLevel::Success
        } else {
            ToastLevel::Danger
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn class(&self) -> String {
        format!("toast toast--{}", self.level)
    }
}

/// Visible toasts in arrival order. Ids are never reused, so a late
/// dismissal timer cannot remove a newer toast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    /// Remove toast `id`. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
