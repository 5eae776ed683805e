//! The one CRUD page every resource is rendered with.

use super::data_table::{DataTable, TableRow};
use super::primitives::{Banner, Button, Modal, SearchBar, Tone};
use super::schema_form::SchemaForm;
use super::shell::api_client;
use crate::client::GlooTransport;
use crate::controller::{Debouncer, InFlight, Modal as ModalState, PageController, PageState, Resource, SubmitOutcome};
use crate::forms::FormDraft;
use crate::utils::panic_hook;
use leptos::*;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Extra form content a resource needs beyond its schema, e.g. the
/// subscription image strip.
pub struct FormExtension<R> {
    /// Schema fields the extension renders itself.
    pub fields: &'static [&'static str],
    pub render: ViewFn,
    /// Called as the modal opens, with the row being edited if any.
    pub on_open: Rc<dyn Fn(Option<&R>)>,
    /// Writes the extension's state into the draft before it is submitted.
    pub prepare: Rc<dyn Fn(&mut FormDraft)>,
}

pub struct PageOptions<R> {
    pub title: &'static str,
    pub statuses: Option<&'static [&'static str]>,
    pub extension: Option<FormExtension<R>>,
}

impl<R> PageOptions<R> {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            statuses: None,
            extension: None,
        }
    }

    /// Adds a status filter and a per-row status selector.
    pub fn statuses(mut self, statuses: &'static [&'static str]) -> Self {
        self.statuses = Some(statuses);
        self
    }

    pub fn extension(mut self, extension: FormExtension<R>) -> Self {
        self.extension = Some(extension);
        self
    }
}

type Controller<R> = PageController<R, GlooTransport, RwSignal<PageState<R>>>;

fn run<F: Future<Output = ()> + 'static>(in_flight: &Rc<RefCell<InFlight>>, task: F) {
    let task = in_flight.borrow_mut().track(task);
    spawn_local(async move {
        // an aborted load was superseded, nothing to report
        let _ = task.await;
    });
}

pub fn resource_page<R: Resource>(options: PageOptions<R>) -> impl IntoView {
    let PageOptions {
        title,
        statuses,
        extension,
    } = options;

    let state = create_rw_signal(PageState::<R>::new());
    let controller: Controller<R> = PageController::new(api_client(), state);
    let draft = create_rw_signal(FormDraft::new());
    let debouncer = Debouncer::new();
    let in_flight = Rc::new(RefCell::new(InFlight::new()));
    let search_flight = Rc::new(RefCell::new(InFlight::new()));

    panic_hook::page_mounted(R::LABEL);
    {
        let in_flight = Rc::clone(&in_flight);
        let search_flight = Rc::clone(&search_flight);
        on_cleanup(move || {
            in_flight.borrow_mut().abort();
            search_flight.borrow_mut().abort();
            state.try_update(PageState::unmount);
            panic_hook::page_unmounted(R::LABEL);
        });
    }

    {
        let controller = controller.clone();
        run(&in_flight, async move { controller.fetch_list().await });
    }

    let on_search = {
        let controller = controller.clone();
        Callback::new(move |query: String| {
            let controller = controller.clone();
            let debouncer = debouncer.clone();
            run(&search_flight, async move {
                controller.search_debounced(&debouncer, &query).await
            });
        })
    };

    let on_load_more = {
        let controller = controller.clone();
        Callback::new(move |_| {
            let controller = controller.clone();
            spawn_local(async move { controller.load_more().await });
        })
    };

    let on_delete = {
        let controller = controller.clone();
        Callback::new(move |id: String| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.delete(&id).await;
            });
        })
    };

    let on_status = statuses.map(|_| {
        let controller = controller.clone();
        Callback::new(move |(id, status): (String, String)| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.update_status(&id, &status).await;
            });
        })
    });

    let on_open = extension.as_ref().map(|e| Rc::clone(&e.on_open));
    let prepare = extension.as_ref().map(|e| Rc::clone(&e.prepare));
    let custom_fields = extension.as_ref().map(|e| e.fields).unwrap_or(&[]);
    let extras = extension.map(|e| e.render);

    let open_create = {
        let on_open = on_open.clone();
        Callback::new(move |_| {
            state.update(PageState::open_create);
            draft.set(FormDraft::new());
            if let Some(on_open) = &on_open {
                on_open(None);
            }
        })
    };

    let on_edit = R::EDITABLE.then(|| {
        Callback::new(move |id: String| {
            let Some(row) = state.with_untracked(|s| s.find(&id).cloned()) else {
                return;
            };
            if state.try_update(|s| s.open_edit(&id)) == Some(true) {
                draft.set(row.to_draft());
                if let Some(on_open) = &on_open {
                    on_open(Some(&row));
                }
            }
        })
    });

    let close = Callback::new(move |_| {
        state.update(PageState::close_modal);
        draft.set(FormDraft::new());
    });

    let submit = {
        let controller = controller.clone();
        Callback::new(move |_| {
            let mut submission = draft.get_untracked();
            if let Some(prepare) = &prepare {
                prepare(&mut submission);
            }
            let controller = controller.clone();
            spawn_local(async move {
                let outcome = controller.submit(submission).await;
                if matches!(outcome, SubmitOutcome::Saved | SubmitOutcome::SavedNeedsRefetch) {
                    draft.try_set(FormDraft::new());
                }
            });
        })
    };

    let rows = Signal::derive(move || {
        state.with(|s| {
            s.visible()
                .into_iter()
                .map(|row| TableRow {
                    id: row.id().to_string(),
                    cells: row.cells(),
                    status: row.status().map(str::to_string),
                    busy: s.is_busy(row.id()),
                })
                .collect::<Vec<_>>()
        })
    });
    let query = Signal::derive(move || state.with(|s| s.query().to_string()));
    let loading = Signal::derive(move || state.with(PageState::is_fetching));
    let banner = Signal::derive(move || state.with(|s| s.banner().map(str::to_string)));
    let modal_open = Signal::derive(move || state.with(|s| *s.modal() != ModalState::Closed));
    let modal_title = Signal::derive(move || {
        state.with(|s| match s.modal() {
            ModalState::Edit(_) => format!("Edit {}", R::LABEL),
            _ => format!("Add {}", R::LABEL),
        })
    });
    let field_errors = Signal::derive(move || state.with(|s| s.field_errors().clone()));
    let form_error = Signal::derive(move || state.with(|s| s.form_error().map(str::to_string)));
    let submitting = Signal::derive(move || state.with(PageState::is_submitting));
    let has_more = Signal::derive(move || state.with(PageState::has_more));

    let status_filter = statuses.map(|options| {
        view! {
            <select
                class="status-filter"
                on:change=move |ev| state.update(|s| s.set_status_filter(Some(event_target_value(&ev))))
            >
                <option value="">"All statuses"</option>
                {options.iter().map(|o| view! { <option value=*o>{*o}</option> }).collect_view()}
            </select>
        }
    });

    view! {
        <div class="resource-page">
            <div class="page-header">
                <h1>{title}</h1>
                <Button label=format!("Add {}", R::LABEL) on_click=open_create />
            </div>
            <Banner message=banner on_dismiss=Callback::new(move |_| state.update(PageState::dismiss_banner)) />
            <div class="page-toolbar">
                <SearchBar value=query on_input=on_search placeholder=format!("Search {}…", title.to_lowercase()) />
                {status_filter}
            </div>
            <DataTable
                columns=R::COLUMNS
                rows=rows
                loading=loading
                on_edit=on_edit
                on_delete=Some(on_delete)
                statuses=statuses
                on_status=on_status
            />
            {move || {
                has_more
                    .get()
                    .then(|| {
                        view! {
                            <div class="load-more">
                                <Button
                                    label="Load more"
                                    tone=Tone::Secondary
                                    disabled=loading
                                    on_click=on_load_more
                                />
                            </div>
                        }
                    })
            }}
            <Modal title=modal_title open=modal_open on_close=close>
                {
                    let extras = extras.clone();
                    move || {
                        let schema = state.with_untracked(|s| match s.modal() {
                            ModalState::Edit(_) => R::edit_schema(),
                            _ => R::schema(),
                        });
                        view! {
                            <SchemaForm
                                schema=schema
                                draft=draft
                                field_errors=field_errors
                                form_error=form_error
                                submitting=submitting
                                on_submit=submit
                                on_cancel=close
                                custom_fields=custom_fields
                                extras=extras.clone()
                            />
                        }
                    }
                }
            </Modal>
        </div>
    }
}
