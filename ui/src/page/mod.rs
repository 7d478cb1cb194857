//! Page collaborators that sit next to the charts: toasts, transaction
//! moderation actions and the user security viewer.

pub mod actions;
pub mod security;
pub mod toast;

pub use actions::{ActionOutcome, ActionResult, TransactionAction};
pub use security::{SecurityDetails, SecurityOutcome};
pub use toast::{Toast, ToastLevel, ToastQueue};
