use dioxus::prelude::*;
use forms::range::{clamp_to_max, clamp_while_typing};
use forms::Field;

use crate::client::use_client;

pub(crate) const INPUT_CLASS: &str = "w-full bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none mt-1.5 focus:border-primary-500";
pub(crate) const LABEL_CLASS: &str = "text-sm font-medium text-neutral-700";

/// Text box that only accepts what `field` can hold.
///
/// Every keystroke is filtered (digits, plus one decimal point for decimal
/// fields) and values above the field maximum are replaced by the maximum.
/// Values below the minimum are left for submit-time validation.
#[component]
pub fn NumericInput(
    field: Field,
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] id: String,
    /// Unit shown after the box, in the unit the user is typing.
    #[props(default)] unit: String,
    /// Maximum in the typed unit, when that is not the canonical unit.
    #[props(default)] max: Option<f64>,
    #[props(default)] placeholder: String,
    #[props(default)] disabled: bool,
) -> Element {
    let ctx = use_client();
    let bounds = ctx.settings.bounds.clone();
    let policy = ctx.settings.input.dot_policy;

    rsx! {
        div {
            class: "mb-4",
            label { class: LABEL_CLASS, r#for: "{id}", {field.label()} }
            div {
                class: "flex items-center gap-2",
                input {
                    id: "{id}",
                    class: INPUT_CLASS,
                    r#type: "text",
                    placeholder: "{placeholder}",
                    disabled,
                    value,
                    oninput: move |evt: FormEvent| {
                        let raw = evt.value();
                        let cleaned = match max {
                            Some(max) => clamp_to_max(field, &raw, Some(max), policy),
                            None => clamp_while_typing(&bounds, field, &raw, policy),
                        };
                        on_input.call(cleaned);
                    },
                }
                if !unit.is_empty() {
                    span { class: "text-sm text-neutral-500", "{unit}" }
                }
            }
        }
    }
}
