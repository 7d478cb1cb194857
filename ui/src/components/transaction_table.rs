use dioxus::prelude::*;
use time::OffsetDateTime;

use super::toasts::use_toasts;
use crate::core::bootstrap::TransactionRow;
use crate::core::config::DashboardConfig;
use crate::core::filter::TableFilter;
use crate::core::{platform, timing};
use crate::page::{actions, TransactionAction};

/// Transaction history with search, risk and date filters. Filter input is
/// debounced; with `actions` set each row carries the moderation forms.
#[component]
pub fn TransactionTable(rows: Vec<TransactionRow>, actions: bool) -> Element {
    let config = use_context::<DashboardConfig>();
    let debounce_ms = config.filter_debounce_ms;

    let mut search = use_signal(String::new);
    let mut risk = use_signal(|| "all".to_string());
    let mut range = use_signal(|| "all".to_string());
    let filter = use_signal(TableFilter::default);
    let generation = use_signal(|| 0_u64);

    let inputs = FilterInputs {
        search,
        risk,
        range,
        filter,
        generation,
        debounce_ms,
    };

    let now = OffsetDateTime::now_utc();
    let active = filter.read().clone();
    let visible: Vec<TransactionRow> = rows
        .iter()
        .filter(|row| active.matches(row, now))
        .cloned()
        .collect();

    rsx! {
        div { class: "transaction-table",
            div { class: "table-filters",
                input {
                    id: "transactionSearch",
                    r#type: "search",
                    placeholder: "Search transactions",
                    value: "{search}",
                    oninput: move |evt| {
                        search.set(evt.value());
                        inputs.schedule();
                    },
                }
                select {
                    id: "riskFilter",
                    value: "{risk}",
                    onchange: move |evt| {
                        risk.set(evt.value());
                        inputs.schedule();
                    },
                    option { value: "all", "All risk levels" }
                    option { value: "low", "Low" }
                    option { value: "medium", "Medium" }
                    option { value: "high", "High" }
                }
                select {
                    id: "dateFilter",
                    value: "{range}",
                    onchange: move |evt| {
                        range.set(evt.value());
                        inputs.schedule();
                    },
                    option { value: "all", "All time" }
                    option { value: "today", "Today" }
                    option { value: "week", "Last 7 days" }
                    option { value: "month", "Last 30 days" }
                }
            }
            table { class: "table",
                thead {
                    tr {
                        th { "Transaction" }
                        th { "Amount" }
                        th { "Recipient" }
                        th { "Risk" }
                        th { "Date" }
                        if actions {
                            th { "Actions" }
                        }
                    }
                }
                tbody {
                    if visible.is_empty() {
                        tr {
                            td { colspan: if actions { "6" } else { "5" }, "No matching transactions" }
                        }
                    }
                    for row in visible {
                        TransactionRowView { key: "{row.id}", row: row.clone(), actions }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
struct FilterInputs {
    search: Signal<String>,
    risk: Signal<String>,
    range: Signal<String>,
    filter: Signal<TableFilter>,
    generation: Signal<u64>,
    debounce_ms: u64,
}

impl FilterInputs {
    /// Apply the current inputs once they have been quiet for the debounce
    /// window. Superseded schedules do nothing.
    fn schedule(self) {
        let Self {
            search,
            risk,
            range,
            mut filter,
            mut generation,
            debounce_ms,
        } = self;
        let ticket = generation.with_mut(|generation| {
            *generation += 1;
            *generation
        });
        spawn(async move {
            timing::sleep_ms(debounce_ms).await;
            if *generation.peek() != ticket {
                return;
            }
            filter.set(TableFilter::new(&search.peek(), &risk.peek(), &range.peek()));
        });
    }
}

fn risk_badge_class(risk_level: &str) -> &'static str {
    match risk_level.to_ascii_lowercase().as_str() {
        "high" => "badge bg-danger",
        "medium" => "badge bg-warning",
        "low" => "badge bg-success",
        _ => "badge bg-secondary",
    }
}

#[component]
fn TransactionRowView(row: TransactionRow, actions: bool) -> Element {
    let timestamp = row.timestamp.clone().unwrap_or_default();
    let available = if row.is_flagged {
        vec![TransactionAction::Unflag, TransactionAction::Delete]
    } else {
        vec![TransactionAction::Flag, TransactionAction::Delete]
    };

    rsx! {
        tr { class: if row.is_flagged { "table-warning" } else { "" },
            td { "{row.transaction_id}" }
            td { "{row.amount}" }
            td { "{row.recipient}" }
            td {
                span { class: risk_badge_class(&row.risk_level), "{row.risk_level}" }
            }
            td { "{timestamp}" }
            if actions {
                td { class: "transaction-actions",
                    for action in available {
                        ActionForm { key: "{action:?}", transaction_id: row.id.clone(), action }
                    }
                }
            }
        }
    }
}

#[component]
fn ActionForm(transaction_id: String, action: TransactionAction) -> Element {
    let config = use_context::<DashboardConfig>();
    let toasts = use_toasts();
    let url = config.url(&action.path(&transaction_id));
    let submit_url = url.clone();
    let reload_delay_ms = config.action_reload_delay_ms;

    rsx! {
        form {
            class: "d-inline",
            method: "post",
            action: "{url}",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let fields: Vec<(String, String)> = evt
                    .values()
                    .into_iter()
                    .map(|(name, value)| (name, value.as_value()))
                    .collect();
                let body = actions::form_body(
                    fields.iter().map(|(name, value)| (name.as_str(), value.as_str())),
                );
                let url = submit_url.clone();
                spawn(async move {
                    let outcome = actions::submit(&url, &body).await;
                    toasts.show(outcome.level, outcome.message);
                    if outcome.reload {
                        timing::sleep_ms(reload_delay_ms).await;
                        platform::reload_page();
                    }
                });
            },
            input { r#type: "hidden", name: "transaction_id", value: "{transaction_id}" }
            button { class: action.button_class(), r#type: "submit", {action.label()} }
        }
    }
}
