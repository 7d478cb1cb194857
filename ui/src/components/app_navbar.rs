use dioxus::prelude::*;

/// Site header. Platforms pass their own `Link`s as children so this crate
/// does not need to know each platform's `Route` enum.
#[component]
pub fn AppNavbar(children: Element) -> Element {
    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "FraudWatch" }
                    span { class: "navbar__brand-subtitle", "Transaction risk monitoring" }
                }
                nav { class: "navbar__links", {children} }
            }
        }
    }
}
