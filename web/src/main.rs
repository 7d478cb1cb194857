use dioxus::prelude::*;

use ui::components::AppNavbar;
use ui::core::bootstrap::PageBootstrap;
use ui::views::{AdminDashboard, Register, UserDashboard};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/dashboard")]
    UserDashboard {},
    #[route("/admin/dashboard")]
    AdminDashboard {},
    #[route("/register")]
    Register {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logger unavailable: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // The server renders the page data into the bootstrap block; read it once.
    use_context_provider(PageBootstrap::load);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared navbar so the links can use the
/// web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {
            Link { class: "navbar__link", to: Route::UserDashboard {}, "My dashboard" }
            Link { class: "navbar__link", to: Route::AdminDashboard {}, "Admin" }
            Link { class: "navbar__link", to: Route::Register {}, "Register" }
        }
        Outlet::<Route> {}
    }
}
