use dioxus::prelude::*;

use crate::core::bootstrap::UserRow;
use crate::core::config::DashboardConfig;
use crate::core::platform;
use crate::page::{security, SecurityDetails, SecurityOutcome};

/// Details currently shown in the security modal, shared between the user
/// table buttons and [`SecurityModal`].
pub type OpenSecurityDetails = Signal<Option<SecurityDetails>>;

pub fn provide_security_modal() -> OpenSecurityDetails {
    let open = use_signal(|| Option::<SecurityDetails>::None);
    use_context_provider(|| open)
}

#[component]
pub fn UserTable(users: Vec<UserRow>) -> Element {
    let config = use_context::<DashboardConfig>();

    rsx! {
        table { class: "table user-table",
            thead {
                tr {
                    th { "Username" }
                    th { "Email" }
                    th { "Transactions" }
                    th { "Flagged" }
                    th { "" }
                }
            }
            tbody {
                for user in users {
                    tr {
                        key: "{user.id}",
                        class: "user-row",
                        "data-user-id": "{user.id}",
                        onclick: {
                            let url = config.user_detail_url(&user.id);
                            move |_: MouseEvent| platform::navigate_to(&url)
                        },
                        td { "{user.username}" }
                        td { "{user.email}" }
                        td { "{user.transaction_count}" }
                        td { "{user.flagged_count}" }
                        td {
                            SecurityButton { user_id: user.id.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SecurityButton(user_id: String) -> Element {
    let config = use_context::<DashboardConfig>();
    let mut open = use_context::<OpenSecurityDetails>();
    let mut loading = use_signal(|| false);

    rsx! {
        button {
            class: "btn btn-sm btn-outline-info view-security-btn",
            r#type: "button",
            disabled: loading(),
            onclick: move |evt| {
                // Keep the click away from the row's navigation handler.
                evt.stop_propagation();
                let config = config.clone();
                let user_id = user_id.clone();
                loading.set(true);
                spawn(async move {
                    let outcome = security::fetch(&config, &user_id).await;
                    loading.set(false);
                    match outcome {
                        SecurityOutcome::Show(details) => open.set(Some(details)),
                        SecurityOutcome::Alert(message) => platform::alert(&message),
                    }
                });
            },
            if loading() {
                "Loading..."
            } else {
                "Security"
            }
        }
    }
}

#[component]
pub fn SecurityModal() -> Element {
    let mut open = use_context::<OpenSecurityDetails>();
    let Some(details) = open.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div { id: "securityModal", class: "modal-backdrop",
            div { class: "modal", role: "dialog", aria_modal: "true",
                div { class: "modal__header",
                    h2 { "Security details" }
                    button {
                        class: "modal__close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| open.set(None),
                        "×"
                    }
                }
                div { class: "modal__body",
                    for (id, label, value) in details.fields() {
                        div { key: "{id}", class: "form-field",
                            label { r#for: id, "{label}" }
                            input { id: id, r#type: "text", readonly: true, value: value }
                        }
                    }
                }
            }
        }
    }
}
