use super::primitives::Banner;
use crate::client::{ApiClient, ApiConfig, GlooTransport};
use crate::session::{Dashboard, LocalStorageStore, SessionManager};
use leptos::logging::{log, warn};
use leptos::*;
use leptos_router::use_navigate;
use serde_json::{Map, Value};

#[component]
pub fn LoginPage(dashboard: Dashboard) -> impl IntoView {
    let identifier = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);
    let navigate = use_navigate();

    let field = dashboard.credential_field();
    let field_label = match field {
        "email" => "Email",
        _ => "Username",
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let id = identifier.get_untracked().trim().to_string();
        let secret = password.get_untracked();
        if id.is_empty() || secret.is_empty() {
            error.set(Some(format!("{field_label} and password are required")));
            return;
        }

        let mut credentials = Map::new();
        credentials.insert(field.to_string(), Value::String(id));
        credentials.insert("password".to_string(), Value::String(secret));

        pending.set(true);
        error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            let client = ApiClient::new(ApiConfig::from_env(), GlooTransport);
            let manager = SessionManager::new(dashboard, LocalStorageStore);
            match manager.sign_in(&client, &Value::Object(credentials)).await {
                Ok(_) => {
                    log!("[LOGIN] {} login succeeded", dashboard.title());
                    navigate(dashboard.base_route(), Default::default());
                }
                Err(err) => {
                    warn!("[LOGIN] {} login failed: {}", dashboard.title(), err);
                    error.try_set(Some(err.banner_message()));
                }
            }
            pending.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=submit>
                <h1>{format!("{} sign in", dashboard.title())}</h1>
                <Banner message=error on_dismiss=Callback::new(move |_| error.set(None)) />
                <div class="form-field">
                    <label for="identifier">{field_label}</label>
                    <input
                        id="identifier"
                        type=if field == "email" { "email" } else { "text" }
                        autocomplete="username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-field">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in…" } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
