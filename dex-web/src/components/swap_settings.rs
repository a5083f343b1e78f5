use leptos::prelude::*;
use shared::forms::swap::{SwapAction, SwapForm, SLIPPAGE_PRESETS};
use shared::validation::{parse_custom_slippage, validate_deadline};

use crate::utils::format::format_percentage;

/// Slippage presets, custom slippage and transaction deadline.
#[component]
pub fn SwapSettings(form: RwSignal<SwapForm>) -> impl IntoView {
    let custom = RwSignal::new(String::new());
    let slippage_error = RwSignal::new(None::<String>);
    let deadline = RwSignal::new(form.with_untracked(|f| f.deadline_minutes.to_string()));
    let deadline_error = RwSignal::new(None::<String>);

    let set_slippage = move |percent: f64| {
        form.update(|f| {
            f.dispatch(SwapAction::SetSlippage(percent));
        });
    };

    let on_custom = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        custom.set(value.clone());
        match parse_custom_slippage(&value) {
            Ok(Some(percent)) => {
                slippage_error.set(None);
                set_slippage(percent);
            }
            Ok(None) => slippage_error.set(None),
            Err(e) => slippage_error.set(Some(e.to_string())),
        }
    };

    let on_deadline = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        deadline.set(value.clone());
        match validate_deadline(&value) {
            Ok(_) => {
                deadline_error.set(None);
                form.update(|f| {
                    f.dispatch(SwapAction::SetDeadline(value));
                });
            }
            Err(e) => deadline_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="swap-settings">
            <div class="settings-row">
                <span class="muted">"Slippage tolerance"</span>
                <div class="chips">
                    {SLIPPAGE_PRESETS
                        .iter()
                        .map(|&preset| {
                            view! {
                                <button
                                    class="chip"
                                    class:active=move || {
                                        custom.with(|c| c.is_empty())
                                            && form.with(|f| f.slippage == preset)
                                    }
                                    on:click=move |_| {
                                        custom.set(String::new());
                                        slippage_error.set(None);
                                        set_slippage(preset);
                                    }
                                >
                                    {format_percentage(preset)}
                                </button>
                            }
                        })
                        .collect_view()}
                    <input
                        class="input chip-input"
                        type="text"
                        inputmode="decimal"
                        placeholder="Custom"
                        prop:value=move || custom.get()
                        on:input=on_custom
                    />
                </div>
                {move || slippage_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </div>

            <div class="settings-row">
                <span class="muted">"Transaction deadline"</span>
                <div class="deadline">
                    <input
                        class="input chip-input"
                        type="text"
                        inputmode="numeric"
                        prop:value=move || deadline.get()
                        on:input=on_deadline
                    />
                    <span class="muted">"minutes"</span>
                </div>
                {move || deadline_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </div>
        </div>
    }
}
