use dioxus::prelude::*;

use crate::Route;

/// Public landing page.
#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "hero",
            h1 { class: "hero-title", "Daily Diet" }
            p { class: "hero-subtitle", "Track your meals and keep a healthy diet." }
            div { class: "hero-actions",
                Link { class: "button primary", to: Route::Login {}, "Sign in" }
                Link { class: "button secondary", to: Route::Register {}, "Create account" }
            }
        }
    }
}
