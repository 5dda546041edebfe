use dioxus::prelude::*;
use store::{ChangeKind, HistoryEntry};

/// Panel listing the meal changes made in this session, newest first.
#[component]
pub fn HistoryPanel(
    entries: Vec<HistoryEntry>,
    on_clear: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "history-panel",
            div { class: "history-header",
                span { "Changes this session" }
                div { class: "history-header-actions",
                    button { onclick: move |_| on_clear.call(()), "Clear" }
                    button { onclick: move |_| on_close.call(()), "Close" }
                }
            }
            div { class: "history-entries",
                if entries.is_empty() {
                    p { class: "history-empty", "No changes yet." }
                }
                for entry in entries.iter().rev() {
                    div {
                        class: match entry.kind {
                            ChangeKind::Created => "history-entry created",
                            ChangeKind::Updated => "history-entry updated",
                            ChangeKind::Deleted => "history-entry deleted",
                        },
                        span { class: "history-time", {entry.at.format("%H:%M:%S").to_string()} }
                        span { " {entry.meal.name} " }
                        span { class: "history-kind", {entry.kind.label()} }
                    }
                }
            }
        }
    }
}

/// Button that opens the history panel, badged with the entry count.
#[component]
pub fn HistoryToggle(count: usize, on_toggle: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "secondary history-toggle",
            onclick: move |_| on_toggle.call(()),
            if count > 0 {
                "History ({count})"
            } else {
                "History"
            }
        }
    }
}
