//! The weekly meal browser — the app's main protected page.
//!
//! State lives in a single `MealStore` signal. Mutations clone the store, run
//! the operation on the clone, and publish the result with `set`, so a failed
//! request never leaves half-applied local state. The server is hit once on
//! mount and again only on the explicit refresh action; moving the week
//! window just re-projects the loaded list.

use api::HttpApi;
use dioxus::prelude::*;
use store::{Meal, MealDraft, MealStore};
use ui::{HistoryPanel, HistoryToggle, MealForm, Navbar, RequireAuth, WeekNav, WeekView};

use crate::Route;

#[component]
pub fn Meals() -> Element {
    rsx! {
        RequireAuth {
            MealsPage {}
        }
    }
}

/// Fetch the meal list into the store. Results of a superseded refresh are
/// dropped so a slow response cannot overwrite a newer one.
async fn refresh(
    mut meal_store: Signal<MealStore<HttpApi>>,
    mut page_error: Signal<Option<String>>,
    mut generation: Signal<u32>,
) {
    let ticket = generation.peek().wrapping_add(1);
    generation.set(ticket);

    let mut store = meal_store.peek().clone();
    let offset = store.week_offset();
    let result = store.load_week(offset).await;
    if *generation.peek() != ticket {
        return;
    }
    match result {
        Ok(()) => {
            meal_store.set(store);
            page_error.set(None);
        }
        Err(err) => page_error.set(Some(err.to_string())),
    }
}

#[component]
fn MealsPage() -> Element {
    let mut meal_store = use_signal(|| MealStore::new(HttpApi::from_env()));
    let mut page_error = use_signal(|| Option::<String>::None);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| Option::<Meal>::None);
    let mut show_history = use_signal(|| false);
    let generation = use_signal(|| 0u32);

    // Initial fetch on mount.
    let _loader = use_resource(move || async move {
        refresh(meal_store, page_error, generation).await;
    });

    let handle_week_change = move |offset: i32| {
        meal_store.write().set_week_offset(offset);
    };

    let handle_refresh = move |_| {
        spawn(async move {
            refresh(meal_store, page_error, generation).await;
        });
    };

    let handle_submit = move |draft: MealDraft| {
        spawn(async move {
            busy.set(true);
            form_error.set(None);
            let mut store = meal_store.peek().clone();
            let result = match editing.peek().clone() {
                Some(meal) => store.update_meal(meal.id, draft).await.map(|_| ()),
                None => store.add_meal(draft).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    meal_store.set(store);
                    show_form.set(false);
                    editing.set(None);
                }
                Err(err) => form_error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    let handle_delete = move |meal: Meal| {
        spawn(async move {
            busy.set(true);
            let mut store = meal_store.peek().clone();
            match store.delete_meal(&meal).await {
                Ok(()) => {
                    meal_store.set(store);
                    page_error.set(None);
                }
                Err(err) => page_error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    let handle_edit = move |meal: Meal| {
        editing.set(Some(meal));
        form_error.set(None);
        show_form.set(true);
    };

    let view = meal_store.read().weekly_view();
    let offset = meal_store.read().week_offset();
    let history = meal_store.read().history().to_vec();
    let form_key = editing
        .read()
        .as_ref()
        .map(|m| m.id.to_string())
        .unwrap_or_else(|| "new".to_string());

    rsx! {
        Navbar {
            Link { class: "navbar-link active", to: Route::Meals {}, "Meals" }
            Link { class: "navbar-link", to: Route::Profile {}, "Profile" }
        }

        div { class: "page",
            div { class: "page-header",
                h1 { "My meals" }
                div { class: "page-actions",
                    HistoryToggle {
                        count: history.len(),
                        on_toggle: move |_| {
                            let visible = *show_history.peek();
                            show_history.set(!visible);
                        },
                    }
                    button {
                        class: "primary",
                        disabled: busy(),
                        onclick: move |_| {
                            editing.set(None);
                            form_error.set(None);
                            show_form.set(true);
                        },
                        "New meal"
                    }
                }
            }

            if let Some(err) = page_error() {
                div { class: "page-error", "{err}" }
            }

            WeekNav {
                offset,
                view: view.clone(),
                busy: busy(),
                on_change: handle_week_change,
                on_refresh: handle_refresh,
            }

            if show_form() {
                MealForm {
                    key: "{form_key}",
                    initial: editing(),
                    busy: busy(),
                    error: form_error(),
                    on_submit: handle_submit,
                    on_cancel: move |_| {
                        show_form.set(false);
                        editing.set(None);
                    },
                }
            }

            WeekView {
                view,
                busy: busy(),
                on_edit: handle_edit,
                on_delete: handle_delete,
            }

            if show_history() {
                HistoryPanel {
                    entries: history,
                    on_clear: move |_| meal_store.write().clear_history(),
                    on_close: move |_| show_history.set(false),
                }
            }
        }
    }
}
