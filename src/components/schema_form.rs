use crate::forms::{FieldErrors, FieldKind, FieldSpec, FileUpload, FormDraft, Schema};
use leptos::logging::warn;
use leptos::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// Reads every file picked in `input` into memory.
pub async fn read_input_files(input: &HtmlInputElement) -> Vec<FileUpload> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let mut uploads = Vec::new();
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => uploads.push(FileUpload::new(
                file.name(),
                file.type_(),
                js_sys::Uint8Array::new(&buffer).to_vec(),
            )),
            Err(err) => warn!("[FORM] Could not read {}: {:?}", file.name(), err),
        }
    }
    uploads
}

fn field_input(spec: FieldSpec, draft: RwSignal<FormDraft>) -> View {
    let name = spec.name;
    let value = move || draft.with(|d| d.value(name).to_string());
    let set = move |ev: web_sys::Event| draft.update(|d| d.set(name, event_target_value(&ev)));

    match spec.kind {
        FieldKind::TextArea => view! {
            <textarea id=name name=name rows="4" prop:value=value on:input=set></textarea>
        }
        .into_view(),
        FieldKind::Select(options) => view! {
            <select id=name name=name on:change=set>
                <option value="" selected=move || value().is_empty()>"Select…"</option>
                {options
                    .iter()
                    .map(|option| {
                        view! {
                            <option value=*option selected=move || value() == *option>{*option}</option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_view(),
        FieldKind::Image | FieldKind::Images => {
            let multiple = spec.kind == FieldKind::Images;
            let on_change = move |ev: web_sys::Event| {
                let input = event_target::<HtmlInputElement>(&ev);
                spawn_local(async move {
                    let files = read_input_files(&input).await;
                    draft.try_update(|d| d.replace_files(name, files));
                });
            };
            let chosen = move || {
                draft.with(|d| {
                    d.files(name)
                        .iter()
                        .map(|f| f.file_name.clone())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
            };
            view! {
                <input id=name name=name type="file" accept="image/*" multiple=multiple on:change=on_change />
                <small class="file-names">{chosen}</small>
            }
            .into_view()
        }
        kind => view! {
            <input id=name name=name type=kind.input_type() prop:value=value on:input=set />
        }
        .into_view(),
    }
}

/// Renders a [`Schema`] as a form bound to `draft`. Fields listed in
/// `custom_fields` are left to `extras`.
#[component]
pub fn SchemaForm(
    schema: Schema,
    draft: RwSignal<FormDraft>,
    #[prop(into)] field_errors: Signal<FieldErrors>,
    #[prop(into)] form_error: Signal<Option<String>>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(optional)] custom_fields: &'static [&'static str],
    extras: Option<ViewFn>,
) -> impl IntoView {
    let fields = schema
        .fields()
        .iter()
        .filter(|spec| !custom_fields.contains(&spec.name))
        .cloned()
        .map(|spec| {
            let name = spec.name;
            let label = spec.label;
            let required = spec.is_required();
            view! {
                <div class="form-field" class:invalid=move || field_errors.with(|e| e.get(name).is_some())>
                    <label for=name>{label}{required.then_some(" *")}</label>
                    {field_input(spec, draft)}
                    {move || {
                        field_errors
                            .with(|e| e.get(name).map(str::to_string))
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
            }
        })
        .collect_view();

    view! {
        <form
            class="schema-form"
            novalidate=true
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            {fields}
            {extras.map(|extras| extras.run())}
            {move || form_error.get().map(|message| view! { <p class="form-error" role="alert">{message}</p> })}
            <div class="form-actions">
                <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.call(())>
                    "Cancel"
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving…" } else { "Save" }}
                </button>
            </div>
        </form>
    }
}
