use super::resource::{Resource, SearchMode};
use super::search::Debouncer;
use super::state::{PageState, SubmitOutcome, Submission, Ticket};
use crate::client::{ApiClient, RequestBody, Transport};
use crate::error::ClientError;
use crate::forms::FormDraft;
use leptos::logging::log;
use leptos::{RwSignal, SignalUpdate};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

/// Somewhere a [`PageState`] lives. Access is short and never spans an
/// await, so a response can land while another request is pending.
pub trait StateHandle<R: Resource> {
    /// Runs `f` on the state; `None` once the state is gone.
    fn with_state<O>(&self, f: impl FnOnce(&mut PageState<R>) -> O) -> Option<O>;
}

impl<R: Resource> StateHandle<R> for Rc<RefCell<PageState<R>>> {
    fn with_state<O>(&self, f: impl FnOnce(&mut PageState<R>) -> O) -> Option<O> {
        let mut state = self.try_borrow_mut().ok()?;
        Some(f(&mut state))
    }
}

// a disposed signal means the view is gone
impl<R: Resource> StateHandle<R> for RwSignal<PageState<R>> {
    fn with_state<O>(&self, f: impl FnOnce(&mut PageState<R>) -> O) -> Option<O> {
        self.try_update(f)
    }
}

/// Drives one CRUD page: issues the requests and folds each response into the
/// page's [`PageState`]. Failures end up in the state's banner or form error;
/// none of these methods return an error to the caller.
pub struct PageController<R, T, H> {
    client: Rc<ApiClient<T>>,
    state: H,
    resource: PhantomData<R>,
}

impl<R, T, H: Clone> Clone for PageController<R, T, H> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            state: self.state.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource, T: Transport, H: StateHandle<R>> PageController<R, T, H> {
    pub fn new(client: Rc<ApiClient<T>>, state: H) -> Self {
        Self {
            client,
            state,
            resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    /// Loads the list (or its first page). On failure the previous list stays
    /// and the banner is raised.
    pub async fn fetch_list(&self) {
        if R::PAGE_SIZE.is_some() {
            self.state.with_state(PageState::restart_pages);
            self.load_more().await;
        } else {
            let Some(ticket) = self.state.with_state(PageState::begin_fetch) else {
                return;
            };
            let result = self.client.list::<R>(R::PATH, R::KEYS).await;
            self.state.with_state(|s| s.finish_fetch(ticket, result));
        }
        self.rerun_server_search().await;
    }

    /// A fresh list invalidates server results; ask again for the active query.
    async fn rerun_server_search(&self) {
        if !matches!(R::SEARCH, SearchMode::Server { .. }) {
            return;
        }
        let query = self.state.with_state(|s| s.query().trim().to_string()).unwrap_or_default();
        if !query.is_empty() {
            self.search(&query).await;
        }
    }

    /// Loads the next page of an infinite-scroll list.
    pub async fn load_more(&self) {
        let Some((ticket, page, limit)) = self.state.with_state(PageState::begin_page).flatten() else {
            return;
        };
        let result = self.client.list_page::<R>(R::PATH, page, limit, R::KEYS).await;
        self.state.with_state(|s| s.finish_page(ticket, result));
    }

    /// Applies a search query right away. Client-side pages only filter;
    /// server-side pages send the query.
    pub async fn search(&self, query: &str) {
        if let Some(ticket) = self.state.with_state(|s| s.set_query(query)).flatten() {
            self.run_search(ticket, query).await;
        }
    }

    /// Like [`search`](Self::search), but a server request only goes out once
    /// typing has paused and this is still the newest keystroke.
    pub async fn search_debounced(&self, debouncer: &Debouncer, query: &str) {
        let keystroke = debouncer.ticket();
        let Some(ticket) = self.state.with_state(|s| s.set_query(query)).flatten() else {
            return;
        };
        if debouncer.settle(keystroke).await {
            self.run_search(ticket, query).await;
        }
    }

    async fn run_search(&self, ticket: Ticket, query: &str) {
        let SearchMode::Server { path } = R::SEARCH else {
            return;
        };
        let result = self.client.search::<R>(R::PATH, path, query.trim(), R::KEYS).await;
        self.state.with_state(|s| s.finish_search(ticket, result));
    }

    /// Validates and sends the open form. Validation failures never reach the
    /// network.
    pub async fn submit(&self, draft: FormDraft) -> SubmitOutcome {
        let submission = match self.state.with_state(|s| s.begin_submit(draft)) {
            Some(Ok(submission)) => submission,
            Some(Err(ClientError::Validation(errors))) => {
                log!("[PAGE] {} form has {} invalid field(s)", R::LABEL, errors.len());
                return SubmitOutcome::Failed;
            }
            Some(Err(err)) => {
                log!("[PAGE] {} form not submitted: {}", R::LABEL, err);
                return SubmitOutcome::Failed;
            }
            None => return SubmitOutcome::Ignored,
        };

        let target = submission.target().map(str::to_string);
        let result = match submission {
            Submission::Create(body) => self.client.create::<R>(R::PATH, body, R::KEYS).await,
            Submission::Update { id, body } => {
                self.client
                    .update::<R>(R::PATH, &id, R::UPDATE, body, R::KEYS)
                    .await
            }
        };

        let outcome = self
            .state
            .with_state(|s| s.finish_submit(target.as_deref(), result))
            .unwrap_or(SubmitOutcome::Ignored);
        if outcome == SubmitOutcome::SavedNeedsRefetch {
            self.fetch_list().await;
        }
        outcome
    }

    /// Deletes one entity. Returns whether it was removed from the list.
    pub async fn delete(&self, id: &str) -> bool {
        if self.state.with_state(|s| s.begin_delete(id)) != Some(true) {
            return false;
        }
        let result = self.client.remove(R::PATH, id).await;
        self.state
            .with_state(|s| s.finish_delete(id, result))
            .unwrap_or(false)
    }

    /// Moves one entity to another status, `PATCH /<resource>/<id>/status`.
    pub async fn update_status(&self, id: &str, status: &str) -> bool {
        if self.state.with_state(|s| s.begin_status_change(id)) != Some(true) {
            return false;
        }
        let path = format!("{}/{}/status", R::PATH, urlencoding::encode(id));
        let body = RequestBody::Json(serde_json::json!({ "status": status }));
        let result = self.client.patch::<R>(&path, body, R::KEYS).await;
        self.state
            .with_state(|s| s.finish_status_change(id, result))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::MemoryTransport;
    use crate::client::ApiConfig;
    use crate::controller::Modal;
    use crate::models::brand::Brand;
    use crate::models::product::Product;
    use crate::models::subscription::Subscription;
    use crate::models::user::User;
    use crate::models::vendor::Vendor;
    use futures::executor::block_on;
    use http::Method;

    type Shared<R> = Rc<RefCell<PageState<R>>>;

    fn controller<R: Resource>(transport: &MemoryTransport) -> (PageController<R, MemoryTransport, Shared<R>>, Shared<R>) {
        let state = Rc::new(RefCell::new(PageState::new()));
        let client = Rc::new(ApiClient::new(ApiConfig::new("/api"), transport.clone()));
        (PageController::new(client, Rc::clone(&state)), state)
    }

    const VENDORS: &str = r#"{"success":true,"data":[
        {"_id":"v1","name":"Fresh Farms","username":"fresh","brandName":"Moo"}
    ]}"#;

    #[test]
    fn vendor_create_adds_one_row_and_closes_modal() {
        let transport = MemoryTransport::new();
        transport.respond(200, VENDORS);
        transport.respond(
            201,
            r#"{"success":true,"data":{"_id":"v2","name":"Acme","username":"acme1","brandName":"AcmeBrand"}}"#,
        );
        let (page, state) = controller::<Vendor>(&transport);
        block_on(page.fetch_list());
        assert_eq!(state.borrow().items().len(), 1);

        state.borrow_mut().open_create();
        let draft = FormDraft::new()
            .with("name", "Acme")
            .with("username", "acme1")
            .with("password", "secret1")
            .with("brandName", "AcmeBrand");
        assert_eq!(block_on(page.submit(draft)), SubmitOutcome::Saved);

        let state = state.borrow();
        assert_eq!(state.modal(), &Modal::Closed);
        let rows = state.visible();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().filter(|v| v.brand_name == "AcmeBrand").count(), 1);

        let sent = transport.requests();
        assert_eq!(sent[1].method, Method::POST);
        assert_eq!(sent[1].url, "/api/vendors");
        match &sent[1].body {
            RequestBody::Json(body) => {
                assert_eq!(body["brandName"], "AcmeBrand");
                assert_eq!(body["password"], "secret1");
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn empty_required_field_never_hits_the_network() {
        let transport = MemoryTransport::new();
        let (page, state) = controller::<Vendor>(&transport);
        state.borrow_mut().open_create();
        let draft = FormDraft::new()
            .with("name", "Acme")
            .with("username", "")
            .with("password", "secret1")
            .with("brandName", "AcmeBrand");
        assert_eq!(block_on(page.submit(draft)), SubmitOutcome::Failed);
        assert!(transport.requests().is_empty());
        assert!(state.borrow().field_errors().get("username").is_some());
    }

    #[test]
    fn failed_fetch_returns_empty_list() {
        let transport = MemoryTransport::new();
        transport.fail(ClientError::Transport("connection refused".into()));
        let (page, state) = controller::<Vendor>(&transport);
        block_on(page.fetch_list());
        assert!(state.borrow().items().is_empty());
        assert!(state.borrow().banner().is_some());
    }

    #[test]
    fn failed_save_keeps_form_open_with_server_message() {
        let transport = MemoryTransport::new();
        transport.respond(409, r#"{"success":false,"message":"Username already taken"}"#);
        let (page, state) = controller::<Vendor>(&transport);
        state.borrow_mut().open_create();
        let draft = FormDraft::new()
            .with("name", "Acme")
            .with("username", "acme1")
            .with("password", "secret1")
            .with("brandName", "AcmeBrand");
        assert_eq!(block_on(page.submit(draft)), SubmitOutcome::Failed);

        let state = state.borrow();
        assert_eq!(state.modal(), &Modal::Create);
        assert_eq!(state.form_error(), Some("Username already taken"));
        assert!(!state.is_submitting());
    }

    #[test]
    fn delete_sends_one_request_and_removes_row() {
        let transport = MemoryTransport::new();
        transport.respond(200, VENDORS);
        transport.respond(200, r#"{"success":true,"message":"Vendor deleted"}"#);
        let (page, state) = controller::<Vendor>(&transport);
        block_on(page.fetch_list());
        assert!(block_on(page.delete("v1")));
        assert!(state.borrow().items().is_empty());
        let sent = transport.requests();
        assert_eq!(sent[1].method, Method::DELETE);
        assert_eq!(sent[1].url, "/api/vendors/v1");
    }

    #[test]
    fn server_search_sends_query() {
        let transport = MemoryTransport::new();
        transport.respond(
            200,
            r#"{"success":true,"data":[{"_id":"u1","name":"Asha","phone":"99"}]}"#,
        );
        let (page, state) = controller::<User>(&transport);
        block_on(page.search("Asha K"));
        assert_eq!(transport.requests()[0].url, "/api/users/search?q=Asha%20K");
        assert_eq!(state.borrow().visible().len(), 1);
    }

    #[test]
    fn client_search_sends_nothing() {
        let transport = MemoryTransport::new();
        let (page, state) = controller::<Vendor>(&transport);
        block_on(page.search("acme"));
        assert!(transport.requests().is_empty());
        assert_eq!(state.borrow().query(), "acme");
    }

    #[test]
    fn unmounted_page_ignores_late_responses() {
        let transport = MemoryTransport::new();
        transport.respond(200, VENDORS);
        let (page, state) = controller::<Vendor>(&transport);
        state.borrow_mut().unmount();
        block_on(page.fetch_list());
        assert!(state.borrow().items().is_empty());
        assert!(state.borrow().banner().is_none());
    }

    #[test]
    fn refetching_resource_reloads_after_save() {
        let transport = MemoryTransport::new();
        transport.respond(201, r#"{"success":true,"data":{"_id":"s1","title":"Daily Milk","price":900,"durationDays":30}}"#);
        transport.respond(200, r#"{"success":true,"data":[{"_id":"s1","title":"Daily Milk","price":900,"durationDays":30}]}"#);
        let (page, state) = controller::<Subscription>(&transport);
        state.borrow_mut().open_create();
        let draft = FormDraft::new()
            .with("title", "Daily Milk")
            .with("description", "500ml every morning")
            .with("price", "900")
            .with("durationDays", "30");
        assert_eq!(block_on(page.submit(draft)), SubmitOutcome::SavedNeedsRefetch);
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.requests()[1].method, Method::GET);
        assert_eq!(state.borrow().items().len(), 1);
    }

    #[test]
    fn refetch_repeats_active_server_search() {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"success":true,"data":[{"_id":"u2","name":"Ben","phone":"99"}]}"#);
        transport.respond(
            200,
            r#"{"success":true,"data":[{"_id":"u1","name":"Asha","phone":"98"},{"_id":"u2","name":"Benjamin","phone":"99"}]}"#,
        );
        transport.respond(200, r#"{"success":true,"data":[{"_id":"u2","name":"Benjamin","phone":"99"}]}"#);
        let (page, state) = controller::<User>(&transport);
        block_on(page.search("ben"));

        block_on(page.fetch_list());
        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["/api/users/search?q=ben", "/api/users", "/api/users/search?q=ben"]);
        let names: Vec<_> = state.borrow().visible().iter().map(|u| u.name.clone()).collect();
        assert_eq!(names, ["Benjamin"]);
    }

    #[test]
    fn edit_saves_with_put_and_replaces_the_edited_row() {
        let transport = MemoryTransport::new();
        transport.respond(
            200,
            r#"{"success":true,"data":[
                {"_id":"v1","name":"Acme","username":"acme","brandName":"A"},
                {"_id":"v2","name":"Moo","username":"moo","brandName":"M"}
            ]}"#,
        );
        transport.respond(200, r#"{"success":true,"data":{"_id":"v1","name":"Acme","username":"acme","brandName":"Renamed"}}"#);
        let (page, state) = controller::<Vendor>(&transport);
        block_on(page.fetch_list());

        state.borrow_mut().open_edit("v1");
        let draft = FormDraft::new()
            .with("name", "Acme")
            .with("username", "acme")
            .with("brandName", "Renamed");
        assert_eq!(block_on(page.submit(draft)), SubmitOutcome::Saved);

        let sent = transport.requests();
        assert_eq!(sent[1].method, Method::PUT);
        assert_eq!(sent[1].url, "/api/vendors/v1");
        let state = state.borrow();
        let rows: Vec<_> = state.items().iter().map(|v| (v.id.as_str(), v.brand_name.as_str())).collect();
        assert_eq!(rows, [("v1", "Renamed"), ("v2", "M")]);
        assert_eq!(state.modal(), &Modal::Closed);
    }

    #[test]
    fn brands_load_page_by_page() {
        let transport = MemoryTransport::new();
        let full_page: Vec<String> = (0..Brand::PAGE_SIZE.unwrap_or(1))
            .map(|i| format!(r#"{{"_id":"b{i}","name":"Brand {i}"}}"#))
            .collect();
        transport.respond(200, &format!(r#"{{"success":true,"data":{{"items":[{}],"totalPages":2}}}}"#, full_page.join(",")));
        transport.respond(200, r#"{"success":true,"data":{"items":[{"_id":"last","name":"Last"}],"totalPages":2}}"#);

        let (page, state) = controller::<Brand>(&transport);
        block_on(page.fetch_list());
        assert!(state.borrow().has_more());
        block_on(page.load_more());
        assert!(!state.borrow().has_more());
        assert_eq!(state.borrow().items().len(), full_page.len() + 1);

        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert!(urls[0].ends_with("brands?page=1&limit=12"));
        assert!(urls[1].ends_with("brands?page=2&limit=12"));

        // exhausted: no further request
        block_on(page.load_more());
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn status_change_patches_and_replaces_row() {
        let transport = MemoryTransport::new();
        transport.respond(
            200,
            r#"{"success":true,"data":[{"_id":"p1","name":"Cow Milk","price":56,"status":"pending"}]}"#,
        );
        transport.respond(
            200,
            r#"{"success":true,"data":{"_id":"p1","name":"Cow Milk","price":56,"status":"approved"}}"#,
        );
        let (page, state) = controller::<Product>(&transport);
        block_on(page.fetch_list());
        assert!(block_on(page.update_status("p1", "approved")));
        assert_eq!(state.borrow().items()[0].status, "approved");

        let sent = transport.requests();
        assert_eq!(sent[1].method, Method::PATCH);
        assert_eq!(sent[1].url, "/api/products/p1/status");

        // unknown ids are not sent
        assert!(!block_on(page.update_status("nope", "approved")));
        assert_eq!(transport.requests().len(), 2);
    }
}
