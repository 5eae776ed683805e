//! Layout shared by both dashboards: session guard, sidebar and top bar.

use super::primitives::Card;
use crate::client::{ApiClient, ApiConfig, GlooTransport};
use crate::routes::{full_path, routes_for, PageKind, Sidebar};
use crate::session::{Dashboard, LocalStorageStore, Session, SessionManager};
use leptos::logging::log;
use leptos::*;
use leptos_router::*;
use std::rc::Rc;

/// Provided by [`DashboardShell`] to every page below it.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub dashboard: Dashboard,
    pub session: RwSignal<Session>,
}

/// A client carrying the current session's token, if any.
pub fn api_client() -> Rc<ApiClient<GlooTransport>> {
    let token = use_context::<SessionContext>()
        .and_then(|ctx| ctx.session.with_untracked(|s| s.token().map(str::to_string)));
    Rc::new(ApiClient::new(ApiConfig::from_env(), GlooTransport).with_token(token))
}

fn window_width() -> Option<f64> {
    window().inner_width().ok().and_then(|w| w.as_f64())
}

#[component]
pub fn DashboardShell(dashboard: Dashboard) -> impl IntoView {
    let session = create_rw_signal(Session::Anonymous);
    let restored = create_rw_signal(false);
    let sidebar = create_rw_signal(Sidebar::default());
    provide_context(SessionContext { dashboard, session });

    // storage and window only exist in the browser
    create_effect(move |_| {
        session.set(SessionManager::new(dashboard, LocalStorageStore).restore());
        if let Some(width) = window_width() {
            sidebar.set(Sidebar::for_width(width));
        }
        restored.set(true);
    });

    let resize = window_event_listener(ev::resize, move |_| {
        if let Some(width) = window_width() {
            sidebar.update(|s| s.resize(width));
        }
    });
    on_cleanup(move || resize.remove());

    let location = use_location();
    create_effect(move |_| {
        location.pathname.track();
        sidebar.update(Sidebar::navigated);
    });

    move || {
        if !restored.get() {
            view! { <p class="loading">"Loading…"</p> }.into_view()
        } else if !session.with(Session::is_authenticated) {
            log!("[SESSION] No {} session, redirecting to login", dashboard.title());
            view! { <Redirect path=dashboard.login_route() /> }.into_view()
        } else {
            shell_layout(dashboard, session, sidebar)
        }
    }
}

fn shell_layout(dashboard: Dashboard, session: RwSignal<Session>, sidebar: RwSignal<Sidebar>) -> View {
    let navigate = use_navigate();
    let logout = move |_| {
        session.set(SessionManager::new(dashboard, LocalStorageStore).logout());
        navigate(&dashboard.login_route(), Default::default());
    };

    let links = routes_for(dashboard)
        .iter()
        .map(|entry| {
            view! {
                <A href=full_path(dashboard, entry) exact=true class="nav-link">
                    {entry.label}
                </A>
            }
        })
        .collect_view();

    view! {
        <div class="dashboard" class:sidebar-open=move || sidebar.with(Sidebar::is_open)>
            <aside class="sidebar">
                <div class="brand">{format!("DeliveryDesk {}", dashboard.title())}</div>
                <nav>{links}</nav>
            </aside>
            {move || {
                sidebar
                    .with(|s| s.is_narrow() && s.is_open())
                    .then(|| view! { <div class="sidebar-scrim" on:click=move |_| sidebar.update(Sidebar::close)></div> })
            }}
            <div class="main">
                <header class="topbar">
                    <button type="button" class="sidebar-toggle" on:click=move |_| sidebar.update(Sidebar::toggle)>
                        "☰"
                    </button>
                    <span class="user">{move || session.with(|s| s.display_name().to_string())}</span>
                    <button type="button" class="btn btn-secondary" on:click=logout>
                        "Log out"
                    </button>
                </header>
                <main class="content">
                    <Outlet />
                </main>
            </div>
        </div>
    }
    .into_view()
}

/// Landing page of a dashboard: one card per section.
#[component]
pub fn Overview() -> impl IntoView {
    let ctx = use_context::<SessionContext>();
    let dashboard = ctx.map(|c| c.dashboard).unwrap_or(Dashboard::Admin);
    let greeting = move || {
        ctx.map(|c| c.session.with(|s| s.display_name().to_string()))
            .filter(|name| !name.is_empty())
            .map(|name| format!("Welcome, {name}"))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    let cards = routes_for(dashboard)
        .iter()
        .filter(|entry| entry.page != PageKind::Overview)
        .map(|entry| {
            view! {
                <Card title=entry.label.to_string()>
                    <A href=full_path(dashboard, entry)>{format!("Manage {}", entry.label.to_lowercase())}</A>
                </Card>
            }
        })
        .collect_view();

    view! {
        <div class="overview">
            <h1>{greeting}</h1>
            <div class="card-grid">{cards}</div>
        </div>
    }
}
