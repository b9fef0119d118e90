//! Liquor master create form with image picker and local preview.

use leptos::*;
use web_sys::{HtmlInputElement, Url};

use super::form_fields::{submit_handler, text_input, SubmitButton};
use super::WebDashboard;
use crate::config::IMAGE_ACCEPT;
use crate::forms::{FormField, MasterField, MasterInput, TextForm, IMAGE_KEY, MASTER_LAYOUT};
use crate::types::Tab;

#[component]
pub fn MasterFormView(dashboard: WebDashboard) -> impl IntoView {
    let state = *dashboard.store();
    let file_input = create_node_ref::<html::Input>();

    let image = create_memo(move |_| state.with(|s| s.master_form.image.clone()));

    // Object URL for the selected file; never stored in dashboard state.
    let preview = create_memo(move |_| {
        image
            .get()
            .and_then(|file| Url::create_object_url_with_blob(&file).ok())
    });

    create_effect(move |previous: Option<Option<String>>| {
        let current = preview.get();
        if let Some(old) = superseded_url(previous.flatten().as_deref(), current.as_deref()) {
            let _ = Url::revoke_object_url(old);
        }
        current
    });

    on_cleanup(move || {
        if let Some(url) = preview.get_untracked() {
            let _ = Url::revoke_object_url(&url);
        }
    });

    // A reset form must also empty the native picker.
    create_effect(move |_| {
        if image.with(Option::is_none) {
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
        }
    });

    let on_image = {
        let dashboard = dashboard.clone();
        move |ev: ev::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                log::debug!("Selected image {} ({} bytes)", file.name(), file.size());
                dashboard.set_master_image(Some(file));
            }
        }
    };

    let on_input = {
        let dashboard = dashboard.clone();
        move |field: MasterField, text: String| dashboard.set_master_field(field, text)
    };

    let inputs = MASTER_LAYOUT
        .into_iter()
        .map(|input| match input {
            MasterInput::Text(field) => {
                let on_input = on_input.clone();
                text_input(
                    field.key(),
                    move || state.with(|s| s.master_form.value(field).to_string()),
                    move |text| on_input(field, text),
                )
                .into_view()
            }
            MasterInput::Image => {
                let on_image = on_image.clone();
                view! {
                    <div class="form-group">
                        <label class="form-label">{IMAGE_KEY} ":"</label>
                        <input
                            type="file"
                            accept=IMAGE_ACCEPT
                            class="form-input"
                            required=true
                            node_ref=file_input
                            on:change=on_image
                        />
                        {move || {
                            preview.get().map(|src| {
                                view! {
                                    <img
                                        src=src
                                        alt="Preview"
                                        class="table-image"
                                        style="margin-top: 0.5rem;"
                                    />
                                }
                            })
                        }}
                    </div>
                }
                .into_view()
            }
        })
        .collect_view();

    view! {
        <form class="form-grid" on:submit=submit_handler(dashboard, Tab::Master)>
            {inputs}
            <SubmitButton tab=Tab::Master/>
        </form>
    }
}

/// The previous preview URL once a different one (or none) has replaced it.
fn superseded_url<'a>(previous: Option<&'a str>, current: Option<&str>) -> Option<&'a str> {
    previous.filter(|old| current != Some(*old))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_url() {
        assert_eq!(superseded_url(Some("blob:a"), Some("blob:b")), Some("blob:a"));
        assert_eq!(superseded_url(Some("blob:a"), None), Some("blob:a"));
        assert_eq!(superseded_url(Some("blob:a"), Some("blob:a")), None);
        assert_eq!(superseded_url(None, Some("blob:b")), None);
    }
}
