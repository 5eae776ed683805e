/// Root component for DeliveryDesk.
/// Mounts both dashboards under their own base routes, each behind its login page.
use crate::components::login::LoginPage;
use crate::components::pages::page_view;
use crate::components::shell::DashboardShell;
use crate::routes::resolve;
use crate::session::Dashboard;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

/// Renders whichever entry of the dashboard's route table matches the
/// current location.
fn dashboard_page(dashboard: Dashboard) -> View {
    let location = use_location();
    let page = create_memo(move |_| {
        location.pathname.with(|path| {
            resolve(path)
                .filter(|(found, _)| *found == dashboard)
                .map(|(_, entry)| entry.page)
        })
    });
    (move || match page.get() {
        Some(kind) => page_view(dashboard, kind),
        None => view! { <NotFound /> }.into_view(),
    })
    .into_view()
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/deliverydesk.css" />
        <Title text="DeliveryDesk" />
        <Router>
            <Routes>
                <Route path="/" view=Landing />
                <Route path="/admin/login" view=|| view! { <LoginPage dashboard=Dashboard::Admin /> } />
                <Route path="/vendor/login" view=|| view! { <LoginPage dashboard=Dashboard::Vendor /> } />
                <Route path="/admin" view=|| view! { <DashboardShell dashboard=Dashboard::Admin /> }>
                    <Route path="" view=|| dashboard_page(Dashboard::Admin) />
                    <Route path="/*page" view=|| dashboard_page(Dashboard::Admin) />
                </Route>
                <Route path="/vendor" view=|| view! { <DashboardShell dashboard=Dashboard::Vendor /> }>
                    <Route path="" view=|| dashboard_page(Dashboard::Vendor) />
                    <Route path="/*page" view=|| dashboard_page(Dashboard::Vendor) />
                </Route>
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

#[component]
fn Landing() -> impl IntoView {
    view! {
        <div class="landing">
            <h1>"DeliveryDesk"</h1>
            <nav>
                <A href="/admin/login" class="btn btn-primary">"Admin dashboard"</A>
                <A href="/vendor/login" class="btn btn-secondary">"Vendor dashboard"</A>
            </nav>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <A href="/">"Back to start"</A>
        </div>
    }
}
