//! Profile page: account details and the delete-account action.

use dioxus::prelude::*;
use ui::{redirect, use_auth, Navbar, RequireAuth};

use crate::Route;

#[component]
pub fn Profile() -> Element {
    rsx! {
        RequireAuth {
            ProfilePage {}
        }
    }
}

#[component]
fn ProfilePage() -> Element {
    let auth = use_auth();
    let mut error = use_signal(|| Option::<String>::None);
    let mut deleting = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    // RequireAuth only renders this with a signed-in user.
    let Some(user) = auth.read().user().cloned() else {
        return rsx! {};
    };

    let handle_delete = move |_| {
        spawn(async move {
            deleting.set(true);
            match ui::delete_account(auth).await {
                Ok(()) => redirect("/login"),
                Err(err) => {
                    deleting.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        Navbar {
            Link { class: "navbar-link", to: Route::Meals {}, "Meals" }
            Link { class: "navbar-link active", to: Route::Profile {}, "Profile" }
        }

        div { class: "page page-narrow",
            h1 { "My profile" }

            if let Some(err) = error() {
                div { class: "page-error", "{err}" }
            }

            div { class: "profile-card",
                if let Some(photo) = user.photo_url.clone() {
                    img { class: "profile-photo", src: "{photo}", alt: "Profile photo" }
                }
                dl { class: "profile-fields",
                    dt { "Name" }
                    dd { {user.display_name()} }
                    dt { "Email" }
                    dd { "{user.email}" }
                    if let Some(weight) = user.weight {
                        dt { "Weight" }
                        dd { "{weight} kg" }
                    }
                    if let Some(height) = user.height {
                        dt { "Height" }
                        dd { "{height} cm" }
                    }
                    if let Some(goal) = user.goal.clone() {
                        dt { "Goal" }
                        dd { "{goal}" }
                    }
                }
            }

            div { class: "danger-zone",
                h2 { "Delete account" }
                p { "Removes your account and every meal you have recorded." }
                if confirm_delete() {
                    div { class: "form-actions",
                        button {
                            class: "danger",
                            disabled: deleting(),
                            onclick: handle_delete,
                            if deleting() { "Deleting..." } else { "Yes, delete everything" }
                        }
                        button {
                            class: "secondary",
                            onclick: move |_| confirm_delete.set(false),
                            "Keep my account"
                        }
                    }
                } else {
                    button {
                        class: "danger",
                        onclick: move |_| confirm_delete.set(true),
                        "Delete my account"
                    }
                }
            }
        }
    }
}
