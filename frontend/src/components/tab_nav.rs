//! Tab navigation between the three collections.

use leptos::*;

use super::WebDashboard;
use crate::types::Tab;
use crate::view::tab_class;

#[component]
pub fn TabNav(dashboard: WebDashboard, active: Memo<Tab>) -> impl IntoView {
    view! {
        <div class="tab-nav">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    let dashboard = dashboard.clone();
                    view! {
                        <button
                            type="button"
                            class=move || tab_class(tab, active.get())
                            on:click=move |_| dashboard.select_tab(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
