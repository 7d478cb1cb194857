use dioxus::prelude::*;

use crate::components::PasswordField;

#[component]
pub fn Register() -> Element {
    rsx! {
        section { class: "page page-register",
            h1 { "Create an account" }
            form { class: "register-form", method: "post", action: "/register",
                div { class: "form-field",
                    label { r#for: "username", "Username" }
                    input { id: "username", name: "username", r#type: "text", required: true }
                }
                div { class: "form-field",
                    label { r#for: "email", "Email" }
                    input { id: "email", name: "email", r#type: "email", required: true }
                }
                PasswordField { name: "password", label: "Password" }
                button { class: "btn btn-primary", r#type: "submit", "Register" }
            }
        }
    }
}
