//! Profile editor: height, weight, step goal and date of birth in the user's
//! preferred units. Values are converted to cm / lb before they are sent.

use api::Backend;
use chrono::NaiveDate;
use dioxus::prelude::*;
use forms::form::run_cancellable;
use forms::{
    DistanceUnit, Field, FormState, HeightUnit, ProfileDraft, Submission, Weight, WeightUnit,
};

use crate::client::use_client;
use crate::form_status::{edit, settle, FormStatus};
use crate::numeric_input::{NumericInput, INPUT_CLASS, LABEL_CLASS};
use crate::task::{today, use_cancellation};

const TOGGLE_CLASS: &str = "px-3 py-1 text-sm border border-neutral-300 first:rounded-l last:rounded-r";
const TOGGLE_ACTIVE_CLASS: &str = "px-3 py-1 text-sm border border-primary-500 bg-primary-500 text-white first:rounded-l last:rounded-r";

pub(crate) fn toggle_class(active: bool) -> &'static str {
    if active {
        TOGGLE_ACTIVE_CLASS
    } else {
        TOGGLE_CLASS
    }
}

#[component]
pub fn ProfileForm() -> Element {
    let ctx = use_client();
    let token = use_cancellation();
    let mut draft = use_signal(ProfileDraft::default);
    let mut state = use_signal(FormState::new);

    // Prefill from the stored profile whenever the signed-in user changes.
    let loader = ctx.clone();
    let load_token = token.clone();
    use_effect(move || {
        let Some(user_id) = loader.user_id() else {
            return;
        };
        let client = loader.client.clone();
        let token = load_token.clone();
        spawn(async move {
            match run_cancellable(&token, client.get_profile(&user_id)).await {
                Submission::Completed(Ok(Some(row))) => {
                    if let Some(payload) = row.to_payload() {
                        draft.set(ProfileDraft::from_payload(&payload));
                    }
                }
                Submission::Completed(Ok(None)) | Submission::Cancelled => {}
                Submission::Completed(Err(e)) => {
                    tracing::error!("Failed to load profile: {}", e);
                }
            }
        });
    });

    let signed_in = ctx.user.read().is_some();
    let current = draft();
    let submitting = state.read().is_submitting();
    let weight_max = Weight::from_lb(ctx.settings.bounds.weight_lb.max, current.weight_unit).magnitude;

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(user_id) = ctx.user_id() else {
            return;
        };
        let bounds = ctx.settings.bounds.clone();
        let Some(payload) =
            state.with_mut(|s| s.begin_submit(|| draft.read().validate(&bounds, today())))
        else {
            return;
        };
        let client = ctx.client.clone();
        let token = token.clone();
        spawn(async move {
            let Submission::Completed(result) =
                run_cancellable(&token, client.update_profile(&user_id, &payload)).await
            else {
                return;
            };
            settle(state, &result);
            if let Some(saved) = result.ok().and_then(|row| row.to_payload()) {
                draft.set(ProfileDraft::from_payload(&saved));
            }
        });
    };

    rsx! {
        form {
            onsubmit: handle_save,
            class: "flex flex-col gap-3 w-full max-w-[360px]",

            h2 { class: "mb-2 text-neutral-800 font-bold text-xl", "Profile" }

            if !signed_in {
                p { class: "text-sm text-neutral-600", "Sign up or sign in to edit your profile." }
            }

            FormStatus { state, success: "Profile saved" }

            div {
                class: "flex items-center justify-between",
                span { class: LABEL_CLASS, "Height unit" }
                div {
                    class: "flex",
                    button {
                        r#type: "button",
                        class: toggle_class(current.height_unit == HeightUnit::Cm),
                        onclick: move |_| edit(draft, state, |d| d.switch_height_unit(HeightUnit::Cm)),
                        "cm"
                    }
                    button {
                        r#type: "button",
                        class: toggle_class(current.height_unit == HeightUnit::FtIn),
                        onclick: move |_| edit(draft, state, |d| d.switch_height_unit(HeightUnit::FtIn)),
                        "ft / in"
                    }
                }
            }

            if current.height_unit == HeightUnit::Cm {
                NumericInput {
                    id: "profile-height-cm",
                    field: Field::Height,
                    unit: "cm",
                    value: current.height_cm.clone(),
                    on_input: move |v: String| edit(draft, state, move |d| d.height_cm = v),
                }
            } else {
                div {
                    class: "flex gap-3",
                    NumericInput {
                        id: "profile-height-feet",
                        field: Field::HeightFeet,
                        unit: "ft",
                        value: current.height_feet.clone(),
                        on_input: move |v: String| edit(draft, state, move |d| d.height_feet = v),
                    }
                    NumericInput {
                        id: "profile-height-inches",
                        field: Field::HeightInches,
                        unit: "in",
                        value: current.height_inches.clone(),
                        on_input: move |v: String| edit(draft, state, move |d| d.height_inches = v),
                    }
                }
            }

            div {
                class: "flex items-center justify-between",
                span { class: LABEL_CLASS, "Weight unit" }
                div {
                    class: "flex",
                    button {
                        r#type: "button",
                        class: toggle_class(current.weight_unit == WeightUnit::Lb),
                        onclick: move |_| edit(draft, state, |d| d.switch_weight_unit(WeightUnit::Lb)),
                        "lb"
                    }
                    button {
                        r#type: "button",
                        class: toggle_class(current.weight_unit == WeightUnit::Kg),
                        onclick: move |_| edit(draft, state, |d| d.switch_weight_unit(WeightUnit::Kg)),
                        "kg"
                    }
                }
            }

            NumericInput {
                id: "profile-weight",
                field: Field::Weight,
                unit: current.weight_unit.to_string(),
                max: weight_max,
                value: current.weight.clone(),
                on_input: move |v: String| edit(draft, state, move |d| d.weight = v),
            }

            div {
                class: "flex items-center justify-between",
                span { class: LABEL_CLASS, "Distance unit" }
                div {
                    class: "flex",
                    button {
                        r#type: "button",
                        class: toggle_class(current.distance_unit == DistanceUnit::Km),
                        onclick: move |_| edit(draft, state, |d| d.distance_unit = DistanceUnit::Km),
                        "km"
                    }
                    button {
                        r#type: "button",
                        class: toggle_class(current.distance_unit == DistanceUnit::Mi),
                        onclick: move |_| edit(draft, state, |d| d.distance_unit = DistanceUnit::Mi),
                        "mi"
                    }
                }
            }

            NumericInput {
                id: "profile-steps",
                field: Field::DailySteps,
                unit: "steps",
                value: current.daily_step_goal.clone(),
                on_input: move |v: String| edit(draft, state, move |d| d.daily_step_goal = v),
            }

            div {
                class: "mb-4",
                label { class: LABEL_CLASS, r#for: "profile-dob", "Date of birth" }
                input {
                    id: "profile-dob",
                    class: INPUT_CLASS,
                    r#type: "date",
                    value: current.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                    oninput: move |evt: FormEvent| {
                        let dob = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d").ok();
                        edit(draft, state, move |d| d.date_of_birth = dob);
                    },
                }
            }

            button {
                class: "w-full px-4 py-2 rounded bg-primary-500 text-white text-[0.9375rem] font-medium disabled:opacity-50",
                r#type: "submit",
                disabled: submitting || !signed_in,
                if submitting { "Saving..." } else { "Save profile" }
            }
        }
    }
}
