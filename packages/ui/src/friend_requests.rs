use api::{Backend, FriendRequestDisplay, FriendRequestStatus, RequestDirection};
use dioxus::prelude::*;
use forms::form::run_cancellable;
use forms::Submission;

use crate::client::use_client;
use crate::task::use_cancellation;

/// Friend requests involving the signed-in user.
///
/// Rows are projected for the viewer before rendering, so an outgoing request
/// only ever shows "Request sent".
#[component]
pub fn FriendRequestList() -> Element {
    let ctx = use_client();
    let token = use_cancellation();
    let mut requests = use_signal(Vec::<FriendRequestDisplay>::new);
    let mut error = use_signal(|| Option::<String>::None);

    let loader = ctx.clone();
    use_effect(move || {
        let Some(viewer) = loader.user_id() else {
            requests.set(Vec::new());
            return;
        };
        let client = loader.client.clone();
        let token = token.clone();
        spawn(async move {
            match run_cancellable(&token, client.list_friend_requests(&viewer)).await {
                Submission::Completed(Ok(rows)) => {
                    error.set(None);
                    requests.set(FriendRequestDisplay::project_all(&rows, &viewer));
                }
                Submission::Completed(Err(e)) => {
                    tracing::error!("Failed to load friend requests: {}", e);
                    error.set(Some(e.to_string()));
                }
                Submission::Cancelled => {}
            }
        });
    });

    let signed_in = ctx.user.read().is_some();

    rsx! {
        section {
            class: "flex flex-col gap-2 w-full max-w-[360px]",
            h2 { class: "mb-2 text-neutral-800 font-bold text-xl", "Friend requests" }

            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }

            if !signed_in {
                p { class: "text-sm text-neutral-600", "Sign in to see your friend requests." }
            } else if requests.read().is_empty() {
                p { class: "text-sm text-neutral-600", "No friend requests yet." }
            }

            ul {
                class: "flex flex-col gap-1",
                for request in requests.read().iter() {
                    li {
                        key: "{request.id}",
                        class: "flex items-center justify-between px-3 py-2 border border-neutral-200 rounded",
                        span {
                            class: if request.direction == RequestDirection::Incoming { "text-sm font-medium text-neutral-800" } else { "text-sm text-neutral-600" },
                            {request.title.clone()}
                        }
                        span {
                            class: "text-xs text-neutral-500",
                            {status_label(request.status)}
                        }
                    }
                }
            }
        }
    }
}

fn status_label(status: FriendRequestStatus) -> &'static str {
    match status {
        FriendRequestStatus::Pending => "Pending",
        FriendRequestStatus::Accepted => "Accepted",
        FriendRequestStatus::Declined => "Declined",
    }
}
