use chrono::{NaiveDate, NaiveTime};
use dioxus::prelude::*;
use store::{Meal, MealDraft};

/// Inline form for creating or editing a meal.
///
/// Parents should key this component on the meal being edited so the field
/// signals reset when a different meal is opened. Parse problems stay local;
/// server-side rejections arrive through the `error` prop.
#[component]
pub fn MealForm(
    initial: Option<Meal>,
    busy: bool,
    error: Option<String>,
    on_submit: EventHandler<MealDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let editing = initial.is_some();
    let init = initial.clone();
    let mut name = use_signal({
        let init = init.clone();
        move || init.as_ref().map(|m| m.name.clone()).unwrap_or_default()
    });
    let mut description = use_signal({
        let init = init.clone();
        move || init.as_ref().map(|m| m.description.clone()).unwrap_or_default()
    });
    let mut date = use_signal({
        let init = init.clone();
        move || {
            init.as_ref()
                .map(|m| m.date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        }
    });
    let mut time = use_signal({
        let init = init.clone();
        move || {
            init.as_ref()
                .map(|m| m.time.format("%H:%M").to_string())
                .unwrap_or_default()
        }
    });
    let mut calories = use_signal({
        let init = init.clone();
        move || {
            init.as_ref()
                .and_then(|m| m.calories)
                .map(|c| c.to_string())
                .unwrap_or_default()
        }
    });
    let mut on_diet = use_signal(move || init.as_ref().map(|m| m.on_diet).unwrap_or(true));
    let mut parse_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();

        let meal_name = name().trim().to_string();
        if meal_name.is_empty() {
            parse_error.set(Some("Name is required".to_string()));
            return;
        }
        let Ok(meal_date) = NaiveDate::parse_from_str(&date(), "%Y-%m-%d") else {
            parse_error.set(Some("Please pick a date".to_string()));
            return;
        };
        let Ok(meal_time) = NaiveTime::parse_from_str(&time(), "%H:%M") else {
            parse_error.set(Some("Please pick a time".to_string()));
            return;
        };
        let meal_calories = {
            let raw = calories().trim().to_string();
            if raw.is_empty() {
                None
            } else {
                match raw.parse::<u32>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        parse_error.set(Some("Calories must be a whole number".to_string()));
                        return;
                    }
                }
            }
        };

        parse_error.set(None);
        on_submit.call(MealDraft {
            name: meal_name,
            description: description().trim().to_string(),
            date: meal_date,
            time: meal_time,
            on_diet: on_diet(),
            calories: meal_calories,
        });
    };

    rsx! {
        form {
            class: "meal-form",
            onsubmit: handle_submit,

            h2 { if editing { "Edit meal" } else { "New meal" } }

            if let Some(message) = parse_error().or(error.clone()) {
                div { class: "form-error", "{message}" }
            }

            div { class: "form-field",
                label { r#for: "meal-name", "Name" }
                input {
                    id: "meal-name",
                    r#type: "text",
                    placeholder: "Lunch",
                    value: name(),
                    oninput: move |evt| name.set(evt.value()),
                }
            }

            div { class: "form-field",
                label { r#for: "meal-description", "Description" }
                input {
                    id: "meal-description",
                    r#type: "text",
                    placeholder: "What was it?",
                    value: description(),
                    oninput: move |evt| description.set(evt.value()),
                }
            }

            div { class: "form-row",
                div { class: "form-field",
                    label { r#for: "meal-date", "Date" }
                    input {
                        id: "meal-date",
                        r#type: "date",
                        value: date(),
                        oninput: move |evt| date.set(evt.value()),
                    }
                }
                div { class: "form-field",
                    label { r#for: "meal-time", "Time" }
                    input {
                        id: "meal-time",
                        r#type: "time",
                        value: time(),
                        oninput: move |evt| time.set(evt.value()),
                    }
                }
                div { class: "form-field",
                    label { r#for: "meal-calories", "Calories" }
                    input {
                        id: "meal-calories",
                        r#type: "number",
                        min: "0",
                        placeholder: "optional",
                        value: calories(),
                        oninput: move |evt| calories.set(evt.value()),
                    }
                }
            }

            label { class: "form-checkbox",
                input {
                    r#type: "checkbox",
                    checked: on_diet(),
                    onchange: move |evt| on_diet.set(evt.checked()),
                }
                "Within my diet"
            }

            div { class: "form-actions",
                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: busy,
                    if busy { "Saving..." } else if editing { "Save" } else { "Add meal" }
                }
                button {
                    class: "secondary",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
