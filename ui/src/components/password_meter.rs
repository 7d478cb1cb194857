use dioxus::prelude::*;

use crate::core::strength::{self, MAX_SCORE};

/// Password input with a live strength meter underneath.
#[component]
pub fn PasswordField(name: String, label: String) -> Element {
    let mut password = use_signal(String::new);
    let strength = strength::evaluate(&password.read());

    rsx! {
        div { class: "form-field",
            label { r#for: "{name}", "{label}" }
            input {
                id: "{name}",
                name: "{name}",
                r#type: "password",
                autocomplete: "new-password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            meter {
                class: strength.meter_class(),
                min: "0",
                max: "{MAX_SCORE}",
                value: "{strength.score}",
            }
            small { class: strength.text_class(), "{strength.message}" }
        }
    }
}
