//! Small building blocks every page is assembled from.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Neutral,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Primary => "primary",
            Tone::Secondary => "secondary",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Neutral => "neutral",
        }
    }

    /// Colour for a status value as the API spells it.
    pub fn for_status(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "approved" | "active" | "paid" | "delivered" | "available" => Tone::Success,
            "pending" | "processing" | "scheduled" | "assigned" | "in-transit" | "dispatched" => {
                Tone::Warning
            }
            "rejected" | "failed" | "cancelled" | "damaged" => Tone::Danger,
            _ => Tone::Neutral,
        }
    }
}

#[component]
pub fn Button(
    #[prop(into)] label: MaybeSignal<String>,
    #[prop(into)] on_click: Callback<()>,
    #[prop(optional)] tone: Tone,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=format!("btn btn-{}", tone.class())
            disabled=move || disabled.get()
            on:click=move |_| on_click.call(())
        >
            {move || label.get()}
        </button>
    }
}

#[component]
pub fn Card(#[prop(optional, into)] title: Option<String>, children: Children) -> impl IntoView {
    view! {
        <section class="card">
            {title.map(|t| view! { <h2 class="card-title">{t}</h2> })}
            <div class="card-body">{children()}</div>
        </section>
    }
}

#[component]
pub fn Badge(#[prop(into)] text: String, #[prop(optional)] tone: Tone) -> impl IntoView {
    view! { <span class=format!("badge badge-{}", tone.class())>{text}</span> }
}

/// Dismissible page-level error message. Renders nothing while `message` is
/// `None`.
#[component]
pub fn Banner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="banner banner-error" role="alert">
                    <span>{text}</span>
                    <button type="button" class="banner-close" on:click=move |_| on_dismiss.call(())>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    move || {
        open.get().then(|| {
            let children = children.clone();
            view! {
                <div class="modal-backdrop" on:click=move |_| on_close.call(())></div>
                <div class="modal" role="dialog">
                    <header class="modal-header">
                        <h3>{move || title.get()}</h3>
                        <button type="button" class="modal-close" on:click=move |_| on_close.call(())>
                            "×"
                        </button>
                    </header>
                    <div class="modal-body">{children()}</div>
                </div>
            }
        })
    }
}

#[component]
pub fn SearchBar(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    view! {
        <input
            type="search"
            class="search-bar"
            placeholder=placeholder.unwrap_or_else(|| "Search…".to_string())
            prop:value=move || value.get()
            on:input=move |ev| on_input.call(event_target_value(&ev))
        />
    }
}
