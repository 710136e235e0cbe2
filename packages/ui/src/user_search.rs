use api::{Backend, UserSummary};
use dioxus::prelude::*;
use forms::form::run_cancellable;
use forms::{Debouncer, Submission};

use crate::client::use_client;
use crate::numeric_input::INPUT_CLASS;
use crate::task::{sleep, use_cancellation};

/// Search other users by display name.
///
/// Requests start once typing pauses for the configured debounce; a response
/// for anything but the latest query is dropped.
#[component]
pub fn UserSearch(#[props(default)] on_select: EventHandler<UserSummary>) -> Element {
    let ctx = use_client();
    let token = use_cancellation();
    let mut query = use_signal(String::new);
    let mut results = use_signal(Vec::<UserSummary>::new);
    let mut debouncer = use_signal(Debouncer::default);
    let mut searching = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let debounce = ctx.settings.timing.search_debounce();

    let handle_input = move |evt: FormEvent| {
        let text = evt.value();
        query.set(text.clone());
        let ticket = debouncer.with_mut(|d| d.bump());
        if text.trim().is_empty() {
            results.set(Vec::new());
            searching.set(false);
            return;
        }
        let client = ctx.client.clone();
        let token = token.clone();
        spawn(async move {
            sleep(debounce).await;
            if !debouncer.read().is_latest(ticket) {
                return;
            }
            searching.set(true);
            let Submission::Completed(result) =
                run_cancellable(&token, client.search_users(&text)).await
            else {
                return;
            };
            if !debouncer.read().is_latest(ticket) {
                tracing::debug!(ticket, "stale search response dropped");
                return;
            }
            searching.set(false);
            match result {
                Ok(users) => {
                    error.set(None);
                    results.set(users);
                }
                Err(e) => {
                    tracing::error!("User search failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        section {
            class: "flex flex-col gap-2 w-full max-w-[360px]",
            h2 { class: "mb-2 text-neutral-800 font-bold text-xl", "Find friends" }

            input {
                class: INPUT_CLASS,
                r#type: "search",
                placeholder: "Search by name",
                value: query(),
                oninput: handle_input,
            }

            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }

            if searching() {
                p { class: "text-sm text-neutral-500", "Searching..." }
            } else if !query().trim().is_empty() && results.read().is_empty() {
                p { class: "text-sm text-neutral-500", "No users found" }
            }

            ul {
                class: "flex flex-col gap-1",
                for user in results.read().iter().cloned() {
                    li {
                        key: "{user.id}",
                        button {
                            r#type: "button",
                            class: "w-full text-left px-3 py-2 border border-neutral-200 rounded text-sm hover:bg-neutral-50",
                            onclick: {
                                let user = user.clone();
                                move |_| on_select.call(user.clone())
                            },
                            {user.display_name().to_string()}
                        }
                    }
                }
            }
        }
    }
}
