use dioxus::prelude::*;

use crate::core::timing;
use crate::page::{Toast, ToastLevel, ToastQueue};

/// Handle for raising toasts from anywhere below [`provide_toasts`].
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
    lifetime_ms: u64,
}

impl Toasts {
    /// Show `message` and dismiss it after the configured lifetime.
    ///
    /// The timer runs at the root scope, not the caller's, so it still fires
    /// when the component that raised the toast is gone by then.
    pub fn show(&self, level: ToastLevel, message: impl Into<String>) {
        let mut queue = self.queue;
        let lifetime_ms = self.lifetime_ms;
        let id = queue.with_mut(|queue| queue.push(level, message));
        spawn_forever(async move {
            timing::sleep_ms(lifetime_ms).await;
            // The provider may have unmounted in the meantime.
            if let Ok(mut queue) = queue.try_write() {
                queue.dismiss(id);
            }
        });
    }

    pub fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.with_mut(|queue| queue.dismiss(id));
    }

    pub fn items(&self) -> Vec<Toast> {
        self.queue.read().items().to_vec()
    }
}

pub fn provide_toasts(lifetime_ms: u64) -> Toasts {
    let queue = use_signal(ToastQueue::new);
    use_context_provider(|| Toasts { queue, lifetime_ms })
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();
    let items = toasts.items();

    rsx! {
        div { class: "toast-container", role: "status",
            for toast in items {
                div { key: "{toast.id}", class: toast.class(),
                    span { class: "toast__message", "{toast.message}" }
                    button {
                        class: "toast__close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
