//! JSON-backed create forms: liquor info and offers.

use leptos::*;

use super::form_fields::{submit_handler, text_fields, SubmitButton};
use super::WebDashboard;
use crate::forms::{InfoField, InfoForm, OfferField, OfferForm, TextForm};
use crate::types::Tab;

#[component]
pub fn InfoFormView(dashboard: WebDashboard) -> impl IntoView {
    let state = *dashboard.store();
    let on_input = {
        let dashboard = dashboard.clone();
        move |field: InfoField, text: String| dashboard.set_info_field(field, text)
    };

    view! {
        <form class="form-grid" on:submit=submit_handler(dashboard, Tab::Info)>
            {text_fields(
                InfoForm::FIELDS,
                move |field| state.with(|s| s.info_form.value(field).to_string()),
                on_input,
            )}
            <SubmitButton tab=Tab::Info/>
        </form>
    }
}

#[component]
pub fn OfferFormView(dashboard: WebDashboard) -> impl IntoView {
    let state = *dashboard.store();
    let on_input = {
        let dashboard = dashboard.clone();
        move |field: OfferField, text: String| dashboard.set_offer_field(field, text)
    };

    view! {
        <form class="form-grid" on:submit=submit_handler(dashboard, Tab::Offers)>
            {text_fields(
                OfferForm::FIELDS,
                move |field| state.with(|s| s.offer_form.value(field).to_string()),
                on_input,
            )}
            <SubmitButton tab=Tab::Offers/>
        </form>
    }
}
