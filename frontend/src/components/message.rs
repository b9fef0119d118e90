//! Success / error banner.

use leptos::*;

use crate::types::Message;

#[component]
pub fn MessageBanner(#[prop(into)] message: Signal<Option<Message>>) -> impl IntoView {
    move || {
        message.get().map(|message| {
            view! { <div class=message.css_class()>{message.text}</div> }
        })
    }
}
