#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use deliverydesk::api;
    use deliverydesk::app::*;
    use deliverydesk::config::ServerConfig;
    use deliverydesk::db::Database;
    use leptos::logging::log;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use std::io;

    let config = ServerConfig::load();
    let storage_error = |err: rusqlite::Error| io::Error::new(io::ErrorKind::Other, err);

    // Initialize the database
    let db = Database::new(&config.database_path).map_err(storage_error)?;
    db.create_schema().await.map_err(storage_error)?;
    log!("[DB] Schema ready at {}", config.database_path);
    if config.seed_demo_data {
        db.seed_demo().await.map_err(storage_error)?;
        log!("[DB] Demo partners, subscriptions, users and franchises seeded");
    }
    let db = web::Data::new(db);

    // Load configuration
    let conf = get_configuration(None)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    log!("listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            // Register the review API BEFORE the Leptos routes
            .app_data(db.clone())
            .configure(api::configure)
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --features csr`
    use deliverydesk::app::*;

    console_error_panic_hook::set_once();
    deliverydesk::utils::panic_hook::init();

    leptos::mount_to_body(App);
}
