//! The dashboard page: tab navigation, banner, active form and table.

use leptos::*;
use web_sys::File;

use super::{DataTable, InfoFormView, MasterFormView, MessageBanner, OfferFormView, TabNav, WebDashboard};
use crate::config::LOADING_TEXT;
use crate::controller::Dashboard;
use crate::services::HttpBackend;
use crate::state::DashboardState;
use crate::types::Tab;
use crate::view;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = create_rw_signal(DashboardState::<File>::new());
    let dashboard: WebDashboard = Dashboard::new(HttpBackend::default(), state);

    // Initial load, once per mount
    let initial = dashboard.clone();
    spawn_local(async move {
        initial.load().await;
    });

    let tab = create_memo(move |_| state.with(|s| s.tab));
    let loading = create_memo(move |_| state.with(|s| s.loading));
    let message = create_memo(move |_| state.with(|s| s.message.clone()));
    let table = create_memo(move |_| state.with(view::active_table));

    let content = {
        let dashboard = dashboard.clone();
        move || {
            if loading.get() {
                return view! { <div class="loading-text">{LOADING_TEXT}</div> }.into_view();
            }

            let form = match tab.get() {
                Tab::Master => view! { <MasterFormView dashboard=dashboard.clone()/> }.into_view(),
                Tab::Info => view! { <InfoFormView dashboard=dashboard.clone()/> }.into_view(),
                Tab::Offers => view! { <OfferFormView dashboard=dashboard.clone()/> }.into_view(),
            };

            view! {
                <div class="form-section">
                    <h2 class="sub-heading">"Add New Record"</h2>
                    {form}
                </div>
                <div>
                    <h2 class="sub-heading">"Current Data"</h2>
                    <DataTable table=table/>
                </div>
            }
            .into_view()
        }
    };

    view! {
        <div class="dashboard-container">
            <TabNav dashboard=dashboard active=tab/>
            <MessageBanner message=message/>
            <div class="content-card">
                <h1 class="heading">{move || view::heading(tab.get())}</h1>
                {content}
            </div>
        </div>
    }
}
