//! Browser glue with host-target stand-ins.
//!
//! On wasm32 these talk to `window`/`document`. On the host target (tests and
//! headless tooling) they log instead of touching a page.

use std::future::Future;

/// Spawn a `!Send` future on the page's event loop.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Spawn a `!Send` future on the current tokio `LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(future);
}

/// Blocking `window.alert`, used only by the security viewer.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                tracing::warn!("alert suppressed: {message}");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("alert: {message}");
}

pub fn reload_page() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().reload() {
                tracing::error!("page reload failed: {err:?}");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("page reload requested");
}

/// Full page navigation to a server-rendered URL.
pub fn navigate_to(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(url) {
                tracing::error!("navigation to {url} failed: {err:?}");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("navigation to {url} requested");
}

/// Text content of an inline element, e.g. a `<script type="application/json">`.
pub fn inline_text(id: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .and_then(|element| element.text_content())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        None
    }
}
