//! Exercise log form, used both for new entries and for editing a saved log.
//!
//! The category toggle decides which inputs are shown; inputs of the other
//! category keep their text but are never sent. "Quick add" saves a new entry
//! and is then disabled for the configured cooldown.

use api::{Backend, ExerciseLogRow};
use dioxus::prelude::*;
use forms::form::run_cancellable;
use forms::{
    Cooldown, Distance, DistanceUnit, ExerciseCategory, ExerciseLogDraft, Field, FormState,
    Intensity, Submission,
};

use crate::client::use_client;
use crate::form_status::{edit, settle, FormStatus};
use crate::numeric_input::{NumericInput, INPUT_CLASS, LABEL_CLASS};
use crate::profile_form::toggle_class;
use crate::task::{now_ms, sleep, use_cancellation};

fn intensity_value(intensity: Option<Intensity>) -> &'static str {
    match intensity {
        None => "",
        Some(Intensity::Low) => "low",
        Some(Intensity::Moderate) => "moderate",
        Some(Intensity::High) => "high",
    }
}

fn parse_intensity(value: &str) -> Option<Intensity> {
    match value {
        "low" => Some(Intensity::Low),
        "moderate" => Some(Intensity::Moderate),
        "high" => Some(Intensity::High),
        _ => None,
    }
}

#[component]
pub fn ExerciseLogForm(
    /// Saved log to edit. A new entry is created when absent.
    #[props(default)]
    editing: Option<ExerciseLogRow>,
    #[props(default)] distance_unit: DistanceUnit,
    #[props(default)] on_saved: EventHandler<ExerciseLogRow>,
) -> Element {
    let ctx = use_client();
    let token = use_cancellation();
    let editing_id = editing.as_ref().map(|row| row.id.clone());
    let mut draft = use_signal(move || match &editing {
        Some(row) => ExerciseLogDraft::from_payload(&row.to_payload(), distance_unit),
        None => ExerciseLogDraft {
            distance_unit,
            ..ExerciseLogDraft::default()
        },
    });
    let mut state = use_signal(FormState::new);
    let cooldown_window = ctx.settings.timing.quick_add_cooldown();
    let mut cooldown = use_signal(move || Cooldown::new(cooldown_window));
    let mut cooling = use_signal(|| false);

    let signed_in = ctx.user.read().is_some();
    let current = draft();
    let submitting = state.read().is_submitting();
    let strength = current.category == ExerciseCategory::Strength;
    let distance_max =
        Distance::from_km(ctx.settings.bounds.distance_km.max, current.distance_unit).magnitude;

    // Validate, then create (or update when `target` is a saved log id).
    // Returns whether a backend call was started.
    let save = use_callback(move |(target, quick): (Option<String>, bool)| {
        let Some(user_id) = ctx.user_id() else {
            return false;
        };
        let bounds = ctx.settings.bounds.clone();
        let Some(payload) = state.with_mut(|s| s.begin_submit(|| draft.read().validate(&bounds)))
        else {
            return false;
        };
        let client = ctx.client.clone();
        let token = token.clone();
        spawn(async move {
            let call = async {
                match &target {
                    Some(log_id) => client.update_exercise_log(log_id, &payload).await,
                    None => client.create_exercise_log(&user_id, &payload).await,
                }
            };
            let Submission::Completed(result) = run_cancellable(&token, call).await else {
                return;
            };
            settle(state, &result);
            if let Ok(row) = result {
                tracing::info!(log = %row.id, quick, "exercise saved");
                if quick {
                    let category = draft.read().category;
                    let unit = draft.read().distance_unit;
                    draft.set(ExerciseLogDraft {
                        distance_unit: unit,
                        ..ExerciseLogDraft::new(category)
                    });
                }
                on_saved.call(row);
            }
        });
        true
    });

    let target = editing_id.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        save.call((target.clone(), false));
    };

    let handle_quick_add = move |_| {
        if !cooldown.with_mut(|c| c.run_if_ready(now_ms(), || save.call((None, true)))) {
            return;
        }
        cooling.set(true);
        spawn(async move {
            sleep(cooldown_window).await;
            if !cooldown.read().is_active(now_ms()) {
                cooling.set(false);
            }
        });
    };

    rsx! {
        form {
            onsubmit: handle_submit,
            class: "flex flex-col gap-3 w-full max-w-[360px]",

            h2 {
                class: "mb-2 text-neutral-800 font-bold text-xl",
                if editing_id.is_some() { "Edit exercise" } else { "Log exercise" }
            }

            FormStatus { state, success: "Exercise saved" }

            div {
                class: "flex",
                button {
                    r#type: "button",
                    class: toggle_class(!strength),
                    onclick: move |_| edit(draft, state, |d| d.category = ExerciseCategory::CardioMindBody),
                    "Cardio / mind-body"
                }
                button {
                    r#type: "button",
                    class: toggle_class(strength),
                    onclick: move |_| edit(draft, state, |d| d.category = ExerciseCategory::Strength),
                    "Strength"
                }
            }

            div {
                class: "mb-4",
                label { class: LABEL_CLASS, r#for: "exercise-name", "Exercise name" }
                input {
                    id: "exercise-name",
                    class: INPUT_CLASS,
                    r#type: "text",
                    placeholder: if strength { "Bench press" } else { "Morning run" },
                    value: current.name.clone(),
                    oninput: move |evt: FormEvent| {
                        let name = evt.value();
                        edit(draft, state, move |d| d.name = name);
                    },
                }
            }

            if strength {
                NumericInput {
                    id: "exercise-sets",
                    field: Field::ExerciseSets,
                    value: current.sets.clone(),
                    on_input: move |v: String| edit(draft, state, move |d| d.sets = v),
                }
                div {
                    class: "flex gap-3",
                    NumericInput {
                        id: "exercise-reps-min",
                        field: Field::RepsMin,
                        value: current.reps_min.clone(),
                        on_input: move |v: String| edit(draft, state, move |d| d.reps_min = v),
                    }
                    NumericInput {
                        id: "exercise-reps-max",
                        field: Field::RepsMax,
                        value: current.reps_max.clone(),
                        on_input: move |v: String| edit(draft, state, move |d| d.reps_max = v),
                    }
                }
            } else {
                NumericInput {
                    id: "exercise-minutes",
                    field: Field::ExerciseMinutes,
                    unit: "min",
                    value: current.minutes.clone(),
                    on_input: move |v: String| edit(draft, state, move |d| d.minutes = v),
                }
                div {
                    class: "flex items-end gap-3",
                    NumericInput {
                        id: "exercise-distance",
                        field: Field::Distance,
                        unit: current.distance_unit.to_string(),
                        max: distance_max,
                        value: current.distance.clone(),
                        on_input: move |v: String| edit(draft, state, move |d| d.distance = v),
                    }
                    div {
                        class: "flex mb-4",
                        button {
                            r#type: "button",
                            class: toggle_class(current.distance_unit == DistanceUnit::Km),
                            onclick: move |_| edit(draft, state, |d| d.switch_distance_unit(DistanceUnit::Km)),
                            "km"
                        }
                        button {
                            r#type: "button",
                            class: toggle_class(current.distance_unit == DistanceUnit::Mi),
                            onclick: move |_| edit(draft, state, |d| d.switch_distance_unit(DistanceUnit::Mi)),
                            "mi"
                        }
                    }
                }
            }

            div {
                class: "mb-4",
                label { class: LABEL_CLASS, r#for: "exercise-intensity", "Intensity" }
                select {
                    id: "exercise-intensity",
                    class: INPUT_CLASS,
                    value: intensity_value(current.intensity),
                    onchange: move |evt| {
                        let intensity = parse_intensity(&evt.value());
                        edit(draft, state, move |d| d.intensity = intensity);
                    },
                    option { value: "", "Not set" }
                    option { value: "low", "Low" }
                    option { value: "moderate", "Moderate" }
                    option { value: "high", "High" }
                }
            }

            div {
                class: "mb-4",
                label { class: LABEL_CLASS, r#for: "exercise-notes", "Notes" }
                textarea {
                    id: "exercise-notes",
                    class: INPUT_CLASS,
                    rows: "3",
                    value: current.notes.clone(),
                    oninput: move |evt: FormEvent| {
                        let notes = evt.value();
                        edit(draft, state, move |d| d.notes = notes);
                    },
                }
            }

            div {
                class: "flex gap-2",
                button {
                    class: "flex-1 px-4 py-2 rounded bg-primary-500 text-white text-[0.9375rem] font-medium disabled:opacity-50",
                    r#type: "submit",
                    disabled: submitting || !signed_in,
                    if submitting { "Saving..." } else if editing_id.is_some() { "Save changes" } else { "Save" }
                }
                if editing_id.is_none() {
                    button {
                        class: "px-4 py-2 rounded border border-neutral-300 text-[0.9375rem] disabled:opacity-50",
                        r#type: "button",
                        disabled: submitting || cooling() || !signed_in,
                        onclick: handle_quick_add,
                        "Quick add"
                    }
                }
            }
        }
    }
}
