//! Login page view with the email/password form.

use dioxus::prelude::*;
use ui::{redirect, use_auth};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    // If already logged in, go straight to the meals page.
    if !auth.read().is_loading() && auth.read().user().is_some() {
        redirect("/meals");
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            submitting.set(true);
            match ui::sign_in(auth, e, p).await {
                Ok(()) => redirect("/meals"),
                Err(err) => {
                    submitting.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "auth-page",
            h1 { "Daily Diet" }
            p { class: "auth-subtitle", "Sign in to continue" }

            form { class: "auth-form", onsubmit: handle_submit,
                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }

            p { class: "auth-switch",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
