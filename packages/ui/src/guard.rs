//! Route guard for protected views.

use dioxus::prelude::*;

use crate::auth::{redirect, use_auth};

/// Gate children on the session state.
///
/// The render outcome is a pure function of the session: a placeholder while
/// the initial check is in flight, a redirect to `/login` for anonymous
/// visitors, the children once authenticated. The checking state is
/// transient — once it resolves one way there is no path back without a full
/// reload. Rendering the placeholder (never a redirect) while `loading` is
/// true is what prevents the flash of logged-out state on page load.
#[component]
pub fn RequireAuth(children: Element) -> Element {
    let auth = use_auth();

    if auth.read().is_loading() {
        return rsx! {
            div { class: "guard-placeholder", "Checking your session..." }
        };
    }

    if auth.read().user().is_none() {
        redirect("/login");
        return rsx! {};
    }

    rsx! {
        {children}
    }
}
