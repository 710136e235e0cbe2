//! Account registration form with a live password checklist.

use api::{Backend, UserInfo};
use dioxus::prelude::*;
use forms::form::run_cancellable;
use forms::{FormState, RegistrationDraft, Submission};

use crate::client::use_client;
use crate::form_status::{edit, settle, FormStatus};
use crate::numeric_input::{INPUT_CLASS, LABEL_CLASS};
use crate::task::use_cancellation;

#[component]
pub fn RegisterForm(#[props(default)] on_registered: EventHandler<UserInfo>) -> Element {
    let ctx = use_client();
    let token = use_cancellation();
    let draft = use_signal(RegistrationDraft::default);
    let mut state = use_signal(FormState::new);

    let report = draft.read().password_report();
    let mismatch = draft.read().confirmation_mismatch();
    let show_checklist = !draft.read().password.is_empty();
    let submitting = state.read().is_submitting();

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(payload) = state.with_mut(|s| s.begin_submit(|| draft.read().validate())) else {
            return;
        };
        let client = ctx.client.clone();
        let token = token.clone();
        let mut user = ctx.user;
        spawn(async move {
            let Submission::Completed(result) = run_cancellable(&token, client.register(&payload)).await
            else {
                return;
            };
            settle(state, &result);
            if let Ok(info) = result {
                tracing::info!(user = %info.id, "registration complete");
                user.set(Some(info.clone()));
                on_registered.call(info);
            }
        });
    };

    rsx! {
        form {
            onsubmit: handle_register,
            class: "flex flex-col gap-3 w-full max-w-[320px]",

            h2 { class: "mb-2 text-neutral-800 font-bold text-xl", "Create Account" }

            FormStatus { state, success: "Account created. Check your inbox to confirm your email." }

            div {
                label { class: LABEL_CLASS, r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    class: INPUT_CLASS,
                    r#type: "email",
                    autocomplete: "email",
                    value: draft.read().email.clone(),
                    oninput: move |evt: FormEvent| {
                        let value = evt.value();
                        edit(draft, state, move |d| d.email = value);
                    },
                }
            }

            div {
                label { class: LABEL_CLASS, r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    class: INPUT_CLASS,
                    r#type: "password",
                    autocomplete: "new-password",
                    value: draft.read().password.clone(),
                    oninput: move |evt: FormEvent| {
                        let value = evt.value();
                        edit(draft, state, move |d| d.password = value);
                    },
                }
            }

            if show_checklist {
                ul {
                    class: "flex flex-col gap-1 text-[0.8125rem]",
                    for (rule, ok) in report.checklist() {
                        li {
                            key: "{rule:?}",
                            class: if ok { "text-green-700" } else { "text-neutral-500" },
                            if ok { "✓ " } else { "○ " }
                            {rule.label()}
                        }
                    }
                }
            }

            div {
                label { class: LABEL_CLASS, r#for: "register-confirm", "Confirm password" }
                input {
                    id: "register-confirm",
                    class: INPUT_CLASS,
                    r#type: "password",
                    autocomplete: "new-password",
                    value: draft.read().confirm_password.clone(),
                    oninput: move |evt: FormEvent| {
                        let value = evt.value();
                        edit(draft, state, move |d| d.confirm_password = value);
                    },
                }
                if mismatch {
                    p { class: "mt-1 text-red-600 text-[0.8125rem]", "Passwords do not match" }
                }
            }

            button {
                class: "w-full px-4 py-2 rounded bg-primary-500 text-white text-[0.9375rem] font-medium disabled:opacity-50",
                r#type: "submit",
                disabled: submitting,
                if submitting { "Creating account..." } else { "Sign up" }
            }
        }
    }
}
