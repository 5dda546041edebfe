//! Authentication context and hooks for the UI.
//!
//! The [`SessionStore`] lives in a context signal provided by
//! [`AuthProvider`]. Views never mutate the signal while a request is in
//! flight: each operation clones the store, runs on the clone, and publishes
//! the result with `set` — with the loading flag published *before* dispatch
//! so the route guard holds its placeholder for the whole round trip.

use api::HttpApi;
use dioxus::prelude::*;
use store::{AuthError, NewAccount, SessionStore};

/// The app-wide session type: the store over the real HTTP backend.
pub type Session = SessionStore<HttpApi>;

/// Get the current session signal.
/// Updates when the user signs in or out.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Provider component that owns the session state.
/// Wrap the router with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth = use_signal(|| Session::new(HttpApi::from_env()));
    use_context_provider(|| auth);

    // Ask the server who is signed in, once, on mount. The session starts
    // with `loading = true`, so guards show their placeholder until this
    // resolves.
    let _ = use_resource(move || async move {
        let mut session = auth.peek().clone();
        if let Err(err) = session.load_current_user().await {
            tracing::warn!("session check failed: {err}");
        }
        auth.set(session);
    });

    rsx! {
        {children}
    }
}

/// Sign in and publish the updated session.
pub async fn sign_in(
    mut auth: Signal<Session>,
    email: String,
    password: String,
) -> Result<(), AuthError> {
    let mut session = auth.peek().clone();
    session.start_loading();
    auth.set(session.clone());

    let result = session.sign_in(&email, &password).await;
    auth.set(session);
    if let Err(err) = &result {
        tracing::warn!("sign-in failed: {err}");
    }
    result
}

/// Create an account, sign in with the same credentials, and publish the
/// updated session.
pub async fn sign_up(mut auth: Signal<Session>, account: NewAccount) -> Result<(), AuthError> {
    let mut session = auth.peek().clone();
    session.start_loading();
    auth.set(session.clone());

    let result = session.sign_up(account).await;
    auth.set(session);
    if let Err(err) = &result {
        tracing::warn!("sign-up failed: {err}");
    }
    result
}

/// Sign out. The local session is cleared even when the server call fails.
pub async fn sign_out(mut auth: Signal<Session>) -> Result<(), AuthError> {
    let mut session = auth.peek().clone();
    session.start_loading();
    auth.set(session.clone());

    let result = session.sign_out().await;
    auth.set(session);
    if let Err(err) = &result {
        tracing::warn!("server logout failed: {err}");
    }
    result
}

/// Delete the signed-in account. On failure the session is left in place so
/// the user can retry.
pub async fn delete_account(mut auth: Signal<Session>) -> Result<(), AuthError> {
    let mut session = auth.peek().clone();
    session.start_loading();
    auth.set(session.clone());

    let result = session.delete_account().await;
    auth.set(session);
    if let Err(err) = &result {
        tracing::warn!("account deletion failed: {err}");
    }
    result
}

/// Navigate by setting the browser location. No-op off the web.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = path;
    }
}

/// Button that signs the user out and returns to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();

    let onclick = move |_| async move {
        let _ = sign_out(auth).await;
        redirect("/login");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
