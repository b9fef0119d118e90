//! Shared pieces of the create forms.

use leptos::*;

use super::WebDashboard;
use crate::forms::FormField;
use crate::types::Tab;

/// A labelled, required text input bound to one form field.
pub fn text_input(
    label: &'static str,
    value: impl Fn() -> String + 'static,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label">{label} ":"</label>
            <input
                type="text"
                class="form-input"
                required=true
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

/// One [`text_input`] per field, in the given order.
pub fn text_fields<F: FormField>(
    fields: &'static [F],
    value: impl Fn(F) -> String + Clone + 'static,
    on_input: impl Fn(F, String) + Clone + 'static,
) -> View {
    fields
        .iter()
        .map(|&field| {
            let value = value.clone();
            let on_input = on_input.clone();
            text_input(field.key(), move || value(field), move |text| on_input(field, text))
        })
        .collect_view()
}

/// `submit` handler running the tab's submitter in the background.
pub fn submit_handler(dashboard: WebDashboard, tab: Tab) -> impl Fn(ev::SubmitEvent) + 'static {
    move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let dashboard = dashboard.clone();
        spawn_local(async move {
            let outcome = match tab {
                Tab::Master => dashboard.submit_master().await,
                Tab::Info => dashboard.submit_info().await,
                Tab::Offers => dashboard.submit_offer().await,
            };
            log::debug!("{} submit finished: {:?}", tab.label(), outcome);
        });
    }
}

#[component]
pub fn SubmitButton(tab: Tab) -> impl IntoView {
    view! {
        <div class="form-button-container">
            <button type="submit" class="form-button">
                {tab.submit_label()}
            </button>
        </div>
    }
}
