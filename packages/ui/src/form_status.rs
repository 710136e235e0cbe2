use api::ApiError;
use dioxus::prelude::*;
use forms::{FormPhase, FormState};

/// Apply a field change to a draft and return a finished form to editing.
pub fn edit<D: 'static>(
    mut draft: Signal<D>,
    mut state: Signal<FormState>,
    apply: impl FnOnce(&mut D),
) {
    draft.with_mut(apply);
    state.with_mut(|s| s.edit());
}

/// Record a finished backend call on the form state.
pub fn settle<T>(mut state: Signal<FormState>, result: &Result<T, ApiError>) {
    state.with_mut(|s| s.finish(result.as_ref().map(|_| ())));
}

/// Error or success line under a form.
#[component]
pub fn FormStatus(state: Signal<FormState>, success: String) -> Element {
    let error = state.read().error().cloned();
    let saved = state.read().phase() == FormPhase::Success;

    rsx! {
        if let Some(err) = error {
            div {
                class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                role: "alert",
                "{err}"
            }
        } else if saved {
            div {
                class: "px-2.5 py-2.5 bg-green-50 border border-green-200 rounded text-green-700 text-[0.8125rem]",
                "{success}"
            }
        }
    }
}
