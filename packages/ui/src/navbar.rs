use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::LogoutButton;

/// Top bar for protected pages: brand, navigation links, user name, sign-out.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let name = auth.read().user().map(|u| u.display_name());

    rsx! {
        div {
            class: "navbar",
            span { class: "navbar-brand", "Daily Diet" }
            div { class: "navbar-links", {children} }
            div { class: "navbar-user",
                if let Some(name) = name {
                    span { class: "navbar-name", "{name}" }
                }
                LogoutButton { class: "secondary" }
            }
        }
    }
}
