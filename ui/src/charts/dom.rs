//! [`PageHost`] over the live document.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::PageHost;

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Option<Document>,
}

impl Default for DomPage {
    fn default() -> Self {
        Self {
            document: web_sys::window().and_then(|window| window.document()),
        }
    }
}

impl DomPage {
    fn element(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn set_display(&self, id: &str, display: &str) {
        let Some(element) = self.element(id) else {
            return;
        };
        match element.dyn_into::<HtmlElement>() {
            Ok(element) => {
                if let Err(err) = element.style().set_property("display", display) {
                    tracing::error!("could not set display on #{id}: {err:?}");
                }
            }
            Err(_) => tracing::warn!("#{id} is not an HTML element"),
        }
    }
}

impl PageHost for DomPage {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn data_attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id)?.get_attribute(&format!("data-{name}"))
    }

    fn show_fallback_table(&self, chart_id: &str, table_id: &str) {
        self.set_display(chart_id, "none");
        self.set_display(table_id, "block");
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }
}
