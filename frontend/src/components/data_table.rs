//! Read-only table of the active collection.

use leptos::*;

use crate::view::{Cell, TableView};

fn render_cell(cell: Cell) -> impl IntoView {
    match cell {
        Cell::Text(text) => view! { <td class="table-cell">{text}</td> }.into_view(),
        Cell::Image { src, alt } => view! {
            <td class="table-cell">
                <img src=src alt=alt class="table-image"/>
            </td>
        }
        .into_view(),
    }
}

#[component]
pub fn DataTable(#[prop(into)] table: Signal<TableView>) -> impl IntoView {
    view! {
        <div class="table-container">
            <table class="data-table">
                <thead class="table-head">
                    <tr>
                        {move || {
                            table.with(|t| {
                                t.headers
                                    .iter()
                                    .map(|header| view! { <th class="table-cell">{*header}</th> })
                                    .collect_view()
                            })
                        }}
                    </tr>
                </thead>
                <tbody class="table-body">
                    <For
                        each=move || table.get().rows
                        key=|row| row.key.clone()
                        children=|row| {
                            view! { <tr>{row.cells.into_iter().map(render_cell).collect_view()}</tr> }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
