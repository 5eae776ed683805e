//! Image previews and the franchise multi-select on the subscription form.

use super::resource_page::FormExtension;
use super::schema_form::read_input_files;
use super::shell::api_client;
use crate::controller::Resource;
use crate::forms::subscription::MAX_SUBSCRIPTION_IMAGES;
use crate::forms::{FormDraft, FranchiseSelection, ImagePreviews, PreviewImage};
use crate::models::{Franchise, Subscription};
use leptos::logging::warn;
use leptos::*;
use std::rc::Rc;
use web_sys::HtmlInputElement;

pub fn subscription_extension() -> FormExtension<Subscription> {
    let previews = create_rw_signal(ImagePreviews::default());
    let selection = create_rw_signal(FranchiseSelection::default());
    let franchises = create_rw_signal(Vec::<Franchise>::new());
    let notice = create_rw_signal(None::<String>);

    let client = api_client();
    spawn_local(async move {
        match client.list::<Franchise>(Franchise::PATH, Franchise::KEYS).await {
            Ok(list) => {
                franchises.try_set(list);
            }
            Err(err) => {
                warn!("[SUBSCRIPTIONS] Could not load franchises: {}", err);
                notice.try_set(Some(err.banner_message()));
            }
        }
    });

    let on_files = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        spawn_local(async move {
            let files = read_input_files(&input).await;
            input.set_value("");
            let rejected = previews.try_update(|p| p.add(files)).unwrap_or(0);
            notice.try_set((rejected > 0).then(|| {
                format!("Only {MAX_SUBSCRIPTION_IMAGES} images are allowed, {rejected} skipped")
            }));
        });
    };

    let preview_strip = move || {
        previews.with(|p| {
            p.images()
                .iter()
                .enumerate()
                .map(|(index, image)| {
                    let thumb = match image {
                        PreviewImage::Existing(url) => view! { <img src=url.clone() alt="" /> }.into_view(),
                        PreviewImage::New(_) => view! { <span class="pending-upload">"New"</span> }.into_view(),
                    };
                    view! {
                        <figure class="preview">
                            {thumb}
                            <figcaption>{image.label().to_string()}</figcaption>
                            <button
                                type="button"
                                class="preview-remove"
                                on:click=move |_| previews.update(|p| {
                                    p.remove(index);
                                })
                            >
                                "×"
                            </button>
                        </figure>
                    }
                })
                .collect_view()
        })
    };

    let franchise_options = move || {
        franchises.with(|list| {
            list.iter()
                .map(|franchise| {
                    let id = franchise.id.clone();
                    let checked_id = id.clone();
                    view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || selection.with(|s| s.is_selected(&checked_id))
                                on:change=move |_| selection.update(|s| s.toggle(&id))
                            />
                            {franchise.name.clone()}
                        </label>
                    }
                })
                .collect_view()
        })
    };

    let select_all = move |_| {
        franchises.with_untracked(|list| {
            selection.update(|s| s.select_all(list.iter().map(|f| f.id.as_str())));
        });
    };

    let render = ViewFn::from(move || {
        view! {
            <div class="form-field">
                <label>"Images"</label>
                <div class="preview-strip">{preview_strip}</div>
                <input
                    type="file"
                    accept="image/*"
                    multiple=true
                    disabled=move || previews.with(ImagePreviews::is_full)
                    on:change=on_files
                />
                <small>{format!("Up to {MAX_SUBSCRIPTION_IMAGES} images")}</small>
                {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
            </div>
            <div class="form-field">
                <label>"Franchises"</label>
                <div class="checkbox-actions">
                    <button type="button" class="btn btn-secondary" on:click=select_all>"Select all"</button>
                    <button type="button" class="btn btn-secondary" on:click=move |_| selection.update(FranchiseSelection::clear)>
                        "Clear"
                    </button>
                    <small>{move || format!("{} selected", selection.with(FranchiseSelection::len))}</small>
                </div>
                <div class="checkbox-list">{franchise_options}</div>
            </div>
        }
    });

    FormExtension {
        fields: &["images", "franchises"],
        render,
        on_open: Rc::new(move |row: Option<&Subscription>| {
            previews.set(row.map(|r| ImagePreviews::from_existing(&r.images)).unwrap_or_default());
            selection.set(
                row.map(|r| FranchiseSelection::from_ids(&r.franchise_ids()))
                    .unwrap_or_default(),
            );
            notice.set(None);
        }),
        prepare: Rc::new(move |draft: &mut FormDraft| {
            previews.with_untracked(|p| p.apply_to(draft, "images"));
            selection.with_untracked(|s| s.apply_to(draft, "franchises"));
        }),
    }
}
