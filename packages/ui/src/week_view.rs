//! The weekly meal browser: navigation header and the seven day cards.

use dioxus::prelude::*;
use store::{DayBucket, Meal, WeeklyView};

/// Week navigation: previous/next week, the window's date range, refresh.
#[component]
pub fn WeekNav(
    offset: i32,
    view: WeeklyView,
    busy: bool,
    on_change: EventHandler<i32>,
    on_refresh: EventHandler<()>,
) -> Element {
    let label = match offset {
        0 => "This week".to_string(),
        -1 => "Last week".to_string(),
        1 => "Next week".to_string(),
        n if n < 0 => format!("{} weeks ago", -n),
        n => format!("{n} weeks ahead"),
    };
    let range = format!(
        "{} – {}",
        view.first_day().format("%b %-d"),
        view.last_day().format("%b %-d")
    );

    rsx! {
        div { class: "week-nav",
            button {
                class: "secondary",
                disabled: busy,
                onclick: move |_| on_change.call(offset - 1),
                "Previous"
            }
            div { class: "week-nav-label",
                span { class: "week-nav-title", "{label}" }
                span { class: "week-nav-range", "{range}" }
            }
            button {
                class: "secondary",
                disabled: busy,
                onclick: move |_| on_change.call(offset + 1),
                "Next"
            }
            button {
                class: "secondary week-nav-refresh",
                disabled: busy,
                onclick: move |_| on_refresh.call(()),
                "Refresh"
            }
        }
    }
}

/// The seven day cards of the current window.
#[component]
pub fn WeekView(
    view: WeeklyView,
    busy: bool,
    on_edit: EventHandler<Meal>,
    on_delete: EventHandler<Meal>,
) -> Element {
    rsx! {
        div { class: "week-grid",
            for day in view.days.iter() {
                DayCard {
                    key: "{day.date}",
                    day: day.clone(),
                    busy,
                    on_edit,
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn DayCard(
    day: DayBucket,
    busy: bool,
    on_edit: EventHandler<Meal>,
    on_delete: EventHandler<Meal>,
) -> Element {
    rsx! {
        div { class: "day-card",
            div { class: "day-card-header",
                span { class: "day-card-name", {day.date.format("%A").to_string()} }
                span { class: "day-card-date", {day.date.format("%b %-d").to_string()} }
            }
            if day.meals.is_empty() {
                p { class: "day-card-empty", "No meals" }
            } else {
                ul { class: "meal-list",
                    for meal in day.meals.iter() {
                        MealRow {
                            key: "{meal.id}",
                            meal: meal.clone(),
                            busy,
                            on_edit,
                            on_delete,
                        }
                    }
                }
                div { class: "day-card-footer",
                    span { "{day.on_diet_count()}/{day.meals.len()} on diet" }
                    if day.total_calories() > 0 {
                        span { "{day.total_calories()} kcal" }
                    }
                }
            }
        }
    }
}

#[component]
fn MealRow(
    meal: Meal,
    busy: bool,
    on_edit: EventHandler<Meal>,
    on_delete: EventHandler<Meal>,
) -> Element {
    let edit_meal = meal.clone();
    let delete_meal = meal.clone();

    rsx! {
        li {
            class: if meal.on_diet { "meal-row on-diet" } else { "meal-row off-diet" },
            span { class: "meal-time", {meal.time.format("%H:%M").to_string()} }
            div { class: "meal-body",
                span { class: "meal-name", "{meal.name}" }
                if !meal.description.is_empty() {
                    span { class: "meal-description", "{meal.description}" }
                }
            }
            if let Some(calories) = meal.calories {
                span { class: "meal-calories", "{calories} kcal" }
            }
            div { class: "meal-actions",
                button {
                    class: "link",
                    disabled: busy,
                    onclick: move |_| on_edit.call(edit_meal.clone()),
                    "Edit"
                }
                button {
                    class: "link danger",
                    disabled: busy,
                    onclick: move |_| on_delete.call(delete_meal.clone()),
                    "Delete"
                }
            }
        }
    }
}
