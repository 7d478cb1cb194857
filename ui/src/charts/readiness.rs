//! One-shot readiness signal for the charting library.
//!
//! The page normally loads Chart.js from a CDN. When that never arrived, a
//! local copy is injected once and every caller awaits the same outcome.

use crate::metrics::RenderError;

/// Resolves once the chart library can be used.
#[cfg(target_arch = "wasm32")]
pub async fn chart_library_ready(fallback_src: &str) -> Result<(), RenderError> {
    use std::cell::RefCell;

    use futures::future::{FutureExt, LocalBoxFuture, Shared};

    type Readiness = Shared<LocalBoxFuture<'static, Result<(), RenderError>>>;

    thread_local! {
        static READY: RefCell<Option<Readiness>> = const { RefCell::new(None) };
    }

    let ready = READY.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| load_chart_library(fallback_src.to_string()).boxed_local().shared())
            .clone()
    });
    ready.await
}

#[cfg(target_arch = "wasm32")]
fn library_present() -> bool {
    web_sys::window()
        .map(|window| js_sys::Reflect::has(&window, &"Chart".into()).unwrap_or(false))
        .unwrap_or(false)
}

#[cfg(target_arch = "wasm32")]
async fn load_chart_library(src: String) -> Result<(), RenderError> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures_channel::oneshot;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    if library_present() {
        return Ok(());
    }
    tracing::warn!("Chart.js not loaded from CDN, loading local fallback {src}");

    let backend_error = |err: JsValue| RenderError::Backend(format!("{err:?}"));
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| RenderError::Backend("no document".into()))?;
    let script = document
        .create_element("script")
        .map_err(backend_error)?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|_| RenderError::Backend("script element has the wrong type".into()))?;
    script.set_src(&src);

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let notify = |loaded: bool| {
        let tx = tx.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(loaded);
            }
        })
    };
    let on_load = notify(true);
    let on_error = notify(false);
    script.set_onload(Some(on_load.as_ref().unchecked_ref()));
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let head = document
        .head()
        .ok_or_else(|| RenderError::Backend("document has no <head>".into()))?;
    head.append_child(&script).map_err(backend_error)?;

    let loaded = rx.await.unwrap_or(false);
    drop((on_load, on_error));

    if loaded && library_present() {
        tracing::debug!("local Chart.js loaded");
        Ok(())
    } else {
        tracing::error!("failed to load local Chart.js from {src}");
        Err(RenderError::Backend(format!("chart library unavailable ({src})")))
    }
}

/// The headless backend has nothing to wait for.
#[cfg(not(target_arch = "wasm32"))]
pub async fn chart_library_ready(_fallback_src: &str) -> Result<(), RenderError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_is_ready_immediately() {
        assert!(futures::executor::block_on(chart_library_ready("/unused.js")).is_ok());
    }
}
