use dioxus::prelude::*;

use crate::Route;

/// Catch-all for unknown paths.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div { class: "hero",
            h1 { class: "hero-title", "Page not found" }
            p { class: "hero-subtitle", "There is nothing at /{path}." }
            Link { class: "button secondary", to: Route::Home {}, "Back home" }
        }
    }
}
