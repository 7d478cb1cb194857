//! Toast lifetime inside a live virtual DOM.

use std::cell::Cell;
use std::time::Duration;

use dioxus::dioxus_core::{NoOpMutations, VirtualDom};
use dioxus::prelude::*;

use ui::components::{provide_toasts, use_toasts};
use ui::core::timing;
use ui::page::ToastLevel;

thread_local! {
    static VISIBLE: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Mounts a row that raises a toast, then removes the row well before the
/// toast's lifetime is up.
#[component]
fn Page() -> Element {
    let toasts = provide_toasts(40);
    let mut row_mounted = use_signal(|| true);
    VISIBLE.with(|visible| visible.set(Some(toasts.items().len())));

    use_future(move || async move {
        timing::sleep_ms(10).await;
        row_mounted.set(false);
    });

    rsx! {
        if row_mounted() {
            ActionRow {}
        }
    }
}

#[component]
fn ActionRow() -> Element {
    let toasts = use_toasts();
    use_effect(move || toasts.show(ToastLevel::Success, "Transaction flagged successfully"));
    rsx! { span { "row" } }
}

#[test]
fn toast_expires_after_its_row_unmounts() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    runtime.block_on(async {
        let mut dom = VirtualDom::new(Page);
        dom.rebuild_in_place();

        let mut shown = false;
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while tokio::time::Instant::now() < deadline {
            let _ = tokio::time::timeout(Duration::from_millis(20), dom.wait_for_work()).await;
            dom.render_immediate(&mut NoOpMutations);
            match VISIBLE.with(Cell::get) {
                Some(1) => shown = true,
                Some(0) if shown => break,
                _ => {}
            }
        }

        assert!(shown, "toast never appeared");
        assert_eq!(VISIBLE.with(Cell::get), Some(0), "toast outlived its lifetime");
    });
}
