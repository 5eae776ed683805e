use super::primitives::{Badge, Tone};
use leptos::*;

/// One rendered row: display strings plus what the action column needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
    pub status: Option<String>,
    pub busy: bool,
}

#[component]
pub fn DataTable(
    columns: &'static [&'static str],
    #[prop(into)] rows: Signal<Vec<TableRow>>,
    #[prop(into)] loading: Signal<bool>,
    on_edit: Option<Callback<String>>,
    on_delete: Option<Callback<String>>,
    /// Statuses a row may be moved to; shown as a badge plus a selector.
    statuses: Option<&'static [&'static str]>,
    on_status: Option<Callback<(String, String)>>,
) -> impl IntoView {
    let has_actions = on_edit.is_some() || on_delete.is_some() || on_status.is_some();
    let span = columns.len() + usize::from(has_actions);

    let render_row = move |row: TableRow| {
        let TableRow { id, cells, status, busy } = row;
        let status_control = match (statuses, on_status, status) {
            (Some(options), Some(on_status), Some(current)) => {
                let row_id = id.clone();
                Some(view! {
                    <Badge text=current.clone() tone=Tone::for_status(&current) />
                    <select
                        class="status-select"
                        disabled=busy
                        on:change=move |ev| on_status.call((row_id.clone(), event_target_value(&ev)))
                    >
                        {options
                            .iter()
                            .map(|option| {
                                let selected = option.eq_ignore_ascii_case(&current);
                                view! { <option value=*option selected=selected>{*option}</option> }
                            })
                            .collect_view()}
                    </select>
                })
            }
            _ => None,
        };
        let edit = on_edit.map(|on_edit| {
            let row_id = id.clone();
            view! {
                <button type="button" class="btn btn-secondary" disabled=busy on:click=move |_| on_edit.call(row_id.clone())>
                    "Edit"
                </button>
            }
        });
        let delete = on_delete.map(|on_delete| {
            let row_id = id.clone();
            view! {
                <button
                    type="button"
                    class="btn btn-danger"
                    disabled=busy
                    on:click=move |_| {
                        let confirmed = window()
                            .confirm_with_message("Delete this record? This cannot be undone.")
                            .unwrap_or(false);
                        if confirmed {
                            on_delete.call(row_id.clone());
                        }
                    }
                >
                    {if busy { "Deleting…" } else { "Delete" }}
                </button>
            }
        });

        view! {
            <tr class:busy=busy>
                {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                {has_actions.then(|| view! { <td class="actions">{status_control}{edit}{delete}</td> })}
            </tr>
        }
    };

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    {columns.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                    {has_actions.then(|| view! { <th>"Actions"</th> })}
                </tr>
            </thead>
            <tbody>
                {move || {
                    let rows = rows.get();
                    if rows.is_empty() {
                        let text = if loading.get() { "Loading…" } else { "No records found" };
                        view! { <tr><td class="empty" colspan=span>{text}</td></tr> }.into_view()
                    } else {
                        rows.into_iter().map(render_row).collect_view()
                    }
                }}
            </tbody>
        </table>
    }
}
