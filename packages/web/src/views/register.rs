//! Registration page view.

use dioxus::prelude::*;
use store::NewAccount;
use ui::{redirect, use_auth};

use crate::Route;

/// Register page component. A successful sign-up signs the user in with the
/// same credentials and lands on the meals page.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut photo_url = use_signal(String::new);
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

            let first = first_name().trim().to_string();
            let last = last_name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let photo = photo_url().trim().to_string();

            if first.is_empty() {
                error.set(Some("First name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if p != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            submitting.set(true);
            let account = NewAccount {
                email: e,
                password: p,
                first_name: first,
                last_name: last,
                photo_url: if photo.is_empty() { None } else { Some(photo) },
            };
            match ui::sign_up(auth, account).await {
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
            h1 { "Create account" }
            p { class: "auth-subtitle", "Sign up for Daily Diet" }

            form { class: "auth-form", onsubmit: handle_submit,
                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                div { class: "form-row",
                    input {
                        r#type: "text",
                        placeholder: "First name",
                        value: first_name(),
                        oninput: move |evt| first_name.set(evt.value()),
                    }
                    input {
                        r#type: "text",
                        placeholder: "Last name",
                        value: last_name(),
                        oninput: move |evt| last_name.set(evt.value()),
                    }
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (min 8 characters)",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt| confirm_password.set(evt.value()),
                }
                input {
                    r#type: "url",
                    placeholder: "Photo URL (optional)",
                    value: photo_url(),
                    oninput: move |evt| photo_url.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating account..." } else { "Sign up" }
                }
            }

            p { class: "auth-switch",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
