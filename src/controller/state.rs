//! Page state shared by every CRUD page.
//!
//! The state never performs I/O. Each action is split into a `begin_*` step
//! that flips the loading flag and hands out whatever the request needs, and a
//! `finish_*` step that folds the response back in. List requests carry a
//! [`Ticket`]; a response whose ticket is no longer current (a newer fetch or
//! search started, or the page was unmounted) is dropped.

use super::pagination::Paginator;
use super::resource::{Reconcile, Resource, SearchMode};
use super::search::matches_query;
use crate::client::RequestBody;
use crate::envelope::Page;
use crate::error::ClientError;
use crate::forms::{FieldErrors, FormDraft};
use leptos::logging::{error, log};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Closed,
    Create,
    Edit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What a validated form turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(RequestBody),
    Update { id: String, body: RequestBody },
}

impl Submission {
    /// Id of the row being updated; `None` for a create.
    pub fn target(&self) -> Option<&str> {
        match self {
            Submission::Create(_) => None,
            Submission::Update { id, .. } => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved and spliced into the list.
    Saved,
    /// Saved; the caller should refetch the list.
    SavedNeedsRefetch,
    /// The server refused; the form stays open with `form_error` set.
    Failed,
    /// The page was gone by the time the answer arrived.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState<R: Resource> {
    items: Vec<R>,
    query: String,
    server_results: Option<Vec<R>>,
    status_filter: Option<String>,
    modal: Modal,
    field_errors: FieldErrors,
    form_error: Option<String>,
    banner: Option<String>,
    fetching: bool,
    submitting: bool,
    busy: BTreeSet<String>,
    list_seq: u64,
    mounted: bool,
    paginator: Option<Paginator>,
}

impl<R: Resource> Default for PageState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> PageState<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            server_results: None,
            status_filter: None,
            modal: Modal::Closed,
            field_errors: FieldErrors::default(),
            form_error: None,
            banner: None,
            fetching: false,
            submitting: false,
            busy: BTreeSet::new(),
            list_seq: 0,
            mounted: true,
            paginator: R::PAGE_SIZE.map(Paginator::new),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status_filter(&self) -> Option<&str> {
        self.status_filter.as_deref()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True while a delete or status change for `id` is in flight.
    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.contains(id)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn has_more(&self) -> bool {
        self.paginator.as_ref().is_some_and(Paginator::has_more)
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The rows to render: search results or the full list, narrowed by the
    /// client-side query and the status filter.
    /// Until server results arrive the loaded list is filtered locally.
    pub fn visible(&self) -> Vec<&R> {
        let server_search = matches!(R::SEARCH, SearchMode::Server { .. });
        let results = match &self.server_results {
            Some(results) if server_search && !self.query.trim().is_empty() => Some(results),
            _ => None,
        };
        let showing_results = results.is_some();
        let base: &[R] = results.map_or(self.items.as_slice(), Vec::as_slice);
        base.iter()
            .filter(|item| showing_results || matches_query(&item.search_fields(), &self.query))
            .filter(|item| match &self.status_filter {
                Some(wanted) => item
                    .status()
                    .is_some_and(|s| s.eq_ignore_ascii_case(wanted)),
                None => true,
            })
            .collect()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn set_status_filter(&mut self, status: Option<String>) {
        self.status_filter = status.filter(|s| !s.trim().is_empty());
    }

    /// Stops every outstanding response from touching this state.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.list_seq += 1;
        log!("[PAGE] {} page unmounted", R::LABEL);
    }

    fn next_ticket(&mut self) -> Ticket {
        self.list_seq += 1;
        Ticket(self.list_seq)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.0 == self.list_seq
    }

    // ---- list ----

    pub fn begin_fetch(&mut self) -> Ticket {
        self.fetching = true;
        if let Some(paginator) = self.paginator.as_mut() {
            paginator.reset();
        }
        self.next_ticket()
    }

    /// Folds a list response in. Returns false when the response was stale.
    /// A failure keeps the previous list and raises the banner.
    pub fn finish_fetch(&mut self, ticket: Ticket, result: Result<Vec<R>, ClientError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.fetching = false;
        match result {
            Ok(items) => {
                log!("[PAGE] Loaded {} {} rows", items.len(), R::LABEL);
                self.items = items;
                // results of an older list; the query is re-run against the new one
                self.server_results = None;
                self.banner = None;
            }
            Err(err) => self.report(err),
        }
        true
    }

    /// Next page to load, with its ticket. `None` when there is nothing left
    /// or a load is already running.
    pub fn begin_page(&mut self) -> Option<(Ticket, u32, u32)> {
        if self.fetching {
            return None;
        }
        let (page, limit) = {
            let paginator = self.paginator.as_ref()?;
            (paginator.next_request()?, paginator.limit())
        };
        self.fetching = true;
        Some((self.next_ticket(), page, limit))
    }

    /// Drops loaded pages so the next `begin_page` starts from page one.
    /// Cancels any page still loading.
    pub fn restart_pages(&mut self) {
        if let Some(paginator) = self.paginator.as_mut() {
            paginator.reset();
            self.items.clear();
        }
        self.fetching = false;
        self.next_ticket();
    }

    pub fn finish_page(&mut self, ticket: Ticket, result: Result<Page<R>, ClientError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.fetching = false;
        match result {
            Ok(page) => {
                match self.paginator.as_mut() {
                    Some(paginator) => paginator.absorb(&mut self.items, page, R::id),
                    None => self.items.extend(page.items),
                }
                self.server_results = None;
                self.banner = None;
            }
            Err(err) => self.report(err),
        }
        true
    }

    // ---- search ----

    /// Records the query. For server-side search returns the ticket the
    /// request must carry, or `None` when nothing needs to be sent.
    pub fn set_query(&mut self, query: &str) -> Option<Ticket> {
        self.query = query.to_string();
        match R::SEARCH {
            SearchMode::Client => None,
            SearchMode::Server { .. } if query.trim().is_empty() => {
                // cancel any search still in flight and show the full list
                self.server_results = None;
                self.fetching = false;
                self.next_ticket();
                None
            }
            SearchMode::Server { .. } => {
                self.fetching = true;
                Some(self.next_ticket())
            }
        }
    }

    pub fn finish_search(&mut self, ticket: Ticket, result: Result<Vec<R>, ClientError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.fetching = false;
        match result {
            Ok(found) => self.server_results = Some(found),
            Err(err) => {
                self.server_results = Some(Vec::new());
                self.report(err);
            }
        }
        true
    }

    // ---- modal and form ----

    pub fn open_create(&mut self) {
        self.modal = Modal::Create;
        self.reset_form();
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.modal = Modal::Edit(id.to_string());
        self.reset_form();
        true
    }

    /// A save still in flight keeps `submitting` set; its answer lands on
    /// the row it was sent for.
    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.reset_form();
    }

    fn modal_for(target: Option<&str>) -> Modal {
        match target {
            None => Modal::Create,
            Some(id) => Modal::Edit(id.to_string()),
        }
    }

    fn reset_form(&mut self) {
        self.field_errors = FieldErrors::default();
        self.form_error = None;
    }

    /// Validates the draft against the open modal's schema. Nothing is sent
    /// when this fails; the errors are kept for inline display.
    pub fn begin_submit(&mut self, draft: FormDraft) -> Result<Submission, ClientError> {
        let (schema, target) = match &self.modal {
            Modal::Closed => {
                return Err(ClientError::Unexpected("no form is open".into()));
            }
            Modal::Create => (R::schema(), None),
            Modal::Edit(id) => (R::edit_schema(), Some(id.clone())),
        };
        if self.submitting {
            return Err(ClientError::Unexpected("a save is already in progress".into()));
        }
        if let Err(errors) = schema.validate(&draft) {
            self.field_errors = errors.clone();
            return Err(ClientError::Validation(errors));
        }

        self.field_errors = FieldErrors::default();
        self.form_error = None;
        self.submitting = true;
        let body = draft.into_body(&schema);
        Ok(match target {
            None => Submission::Create(body),
            Some(id) => Submission::Update { id, body },
        })
    }

    /// Folds in the answer to the submission for `target` (see
    /// [`Submission::target`]). The modal is only touched if it still shows
    /// that form; otherwise a failure goes to the banner.
    pub fn finish_submit(&mut self, target: Option<&str>, result: Result<R, ClientError>) -> SubmitOutcome {
        if !self.mounted {
            return SubmitOutcome::Ignored;
        }
        self.submitting = false;
        let form_open = self.modal == Self::modal_for(target);
        let saved = match result {
            Ok(saved) => saved,
            Err(err) if form_open => {
                error!("[PAGE] Saving {} failed: {}", R::LABEL, err);
                self.form_error = Some(err.banner_message());
                return SubmitOutcome::Failed;
            }
            Err(err) => {
                self.report(err);
                return SubmitOutcome::Failed;
            }
        };

        if form_open {
            self.modal = Modal::Closed;
            self.reset_form();
        }

        if R::RECONCILE == Reconcile::Refetch {
            return SubmitOutcome::SavedNeedsRefetch;
        }
        let row = target.map_or_else(|| saved.id().to_string(), str::to_string);
        if !self.replace(&row, saved.clone()) {
            self.items.push(saved);
        }
        SubmitOutcome::Saved
    }

    /// Swaps the row with id `target` for `saved`, in the list and in any
    /// search results. Returns false when the list had no such row.
    pub fn replace(&mut self, target: &str, saved: R) -> bool {
        if let Some(results) = self.server_results.as_mut() {
            if let Some(existing) = results.iter_mut().find(|item| item.id() == target) {
                *existing = saved.clone();
            }
        }
        match self.items.iter_mut().find(|item| item.id() == target) {
            Some(existing) => {
                *existing = saved;
                true
            }
            None => false,
        }
    }

    // ---- status changes ----

    pub fn begin_status_change(&mut self, id: &str) -> bool {
        self.find(id).is_some() && self.busy.insert(id.to_string())
    }

    pub fn finish_status_change(&mut self, id: &str, result: Result<R, ClientError>) -> bool {
        if !self.mounted {
            return false;
        }
        self.busy.remove(id);
        match result {
            Ok(saved) => self.replace(id, saved),
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    // ---- delete ----

    /// Marks `id` as being deleted. False when a delete for it is already
    /// running.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        self.busy.insert(id.to_string())
    }

    /// Removes exactly `id` on success. Returns whether it was removed.
    pub fn finish_delete(&mut self, id: &str, result: Result<(), ClientError>) -> bool {
        if !self.mounted {
            return false;
        }
        self.busy.remove(id);
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                if let Some(results) = self.server_results.as_mut() {
                    results.retain(|item| item.id() != id);
                }
                if self.modal == Modal::Edit(id.to_string()) {
                    self.close_modal();
                }
                true
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    fn report(&mut self, err: ClientError) {
        error!("[PAGE] {} request failed: {}", R::LABEL, err);
        self.banner = Some(err.banner_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Product;
    use crate::models::user::User;
    use crate::models::vendor::Vendor;

    fn vendor(id: &str, name: &str, brand: &str) -> Vendor {
        Vendor {
            id: id.into(),
            name: name.into(),
            username: name.to_lowercase(),
            password: None,
            brand_name: brand.into(),
            phone: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(vendors: Vec<Vendor>) -> PageState<Vendor> {
        let mut state = PageState::new();
        let ticket = state.begin_fetch();
        assert!(state.finish_fetch(ticket, Ok(vendors)));
        state
    }

    #[test]
    fn failed_fetch_keeps_previous_rows_and_raises_banner() {
        let mut state = loaded(vec![vendor("1", "Acme", "AcmeBrand")]);
        let ticket = state.begin_fetch();
        assert!(state.is_fetching());
        state.finish_fetch(ticket, Err(ClientError::Transport("offline".into())));
        assert!(!state.is_fetching());
        assert_eq!(state.items().len(), 1);
        assert!(state.banner().is_some());

        state.dismiss_banner();
        assert_eq!(state.banner(), None);
    }

    #[test]
    fn failed_first_fetch_leaves_list_empty() {
        let mut state: PageState<Vendor> = PageState::new();
        let ticket = state.begin_fetch();
        state.finish_fetch(
            ticket,
            Err(ClientError::Server {
                status: 500,
                message: "Database down".into(),
            }),
        );
        assert!(state.items().is_empty());
        assert_eq!(state.banner(), Some("Database down"));
    }

    #[test]
    fn stale_fetch_is_dropped() {
        let mut state: PageState<Vendor> = PageState::new();
        let old = state.begin_fetch();
        let new = state.begin_fetch();
        assert!(state.finish_fetch(new, Ok(vec![vendor("2", "New", "N")])));
        assert!(!state.finish_fetch(old, Ok(vec![vendor("1", "Old", "O")])));
        assert_eq!(state.items()[0].id, "2");
    }

    #[test]
    fn responses_after_unmount_are_ignored() {
        let mut state: PageState<Vendor> = PageState::new();
        let ticket = state.begin_fetch();
        state.unmount();
        assert!(!state.finish_fetch(ticket, Ok(vec![vendor("1", "Acme", "A")])));
        assert!(state.items().is_empty());
        assert_eq!(state.finish_submit(None, Ok(vendor("1", "Acme", "A"))), SubmitOutcome::Ignored);
    }

    #[test]
    fn client_search_filters_declared_fields_only() {
        let mut state = loaded(vec![
            vendor("1", "Acme", "AcmeBrand"),
            vendor("2", "Fresh Farms", "Moo"),
            vendor("3", "Dairy Co", "acmeish"),
        ]);
        assert_eq!(state.set_query("ACME"), None);
        let ids: Vec<_> = state.visible().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        state.set_query("");
        assert_eq!(state.visible().len(), 3);
    }

    #[test]
    fn server_search_results_replace_list_until_cleared() {
        let mut state: PageState<User> = PageState::new();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![User::sample("u1", "Asha"), User::sample("u2", "Ben")]));

        let ticket = state.set_query("ben").expect("server search needs a request");
        state.finish_search(ticket, Ok(vec![User::sample("u2", "Ben")]));
        assert_eq!(state.visible().len(), 1);

        // clearing cancels anything in flight
        let in_flight = state.set_query("be").unwrap();
        assert_eq!(state.set_query(""), None);
        assert!(!state.finish_search(in_flight, Ok(Vec::new())));
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn newer_keystroke_supersedes_older_search() {
        let mut state: PageState<User> = PageState::new();
        let first = state.set_query("a").unwrap();
        let second = state.set_query("as").unwrap();
        assert!(state.finish_search(second, Ok(vec![User::sample("u1", "Asha")])));
        assert!(!state.finish_search(first, Ok(Vec::new())));
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn status_filter_combines_with_query() {
        let mut state: PageState<Product> = PageState::new();
        let ticket = state.begin_fetch();
        state.finish_fetch(
            ticket,
            Ok(vec![
                Product::sample("p1", "Cow Milk", "approved"),
                Product::sample("p2", "Buffalo Milk", "pending"),
                Product::sample("p3", "Paneer", "pending"),
            ]),
        );
        state.set_status_filter(Some("Pending".into()));
        assert_eq!(state.visible().len(), 2);
        state.set_query("milk");
        let ids: Vec<_> = state.visible().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2"]);
        state.set_status_filter(None);
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn invalid_draft_is_blocked_before_sending() {
        let mut state: PageState<Vendor> = PageState::new();
        state.open_create();
        let draft = FormDraft::new().with("name", "Acme");
        let err = state.begin_submit(draft).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(state.field_errors().get("username").is_some());
        assert!(!state.is_submitting());
        assert_eq!(state.modal(), &Modal::Create);
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut state = loaded(vec![vendor("1", "Acme", "A"), vendor("2", "Moo", "M")]);
        assert!(state.open_edit("2"));
        let submission = state
            .begin_submit(
                FormDraft::new()
                    .with("name", "Moo")
                    .with("username", "moo")
                    .with("brandName", "MooMoo"),
            )
            .unwrap();
        assert!(matches!(submission, Submission::Update { ref id, .. } if id == "2"));
        assert_eq!(
            state.finish_submit(submission.target(), Ok(vendor("2", "Moo", "MooMoo"))),
            SubmitOutcome::Saved
        );
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.items()[1].brand_name, "MooMoo");
        assert_eq!(state.modal(), &Modal::Closed);
    }

    #[test]
    fn failed_submit_keeps_form_open() {
        let mut state: PageState<Vendor> = PageState::new();
        state.open_create();
        state
            .begin_submit(
                FormDraft::new()
                    .with("name", "Acme")
                    .with("username", "acme1")
                    .with("password", "secret1")
                    .with("brandName", "AcmeBrand"),
            )
            .unwrap();
        let outcome = state.finish_submit(None, Err(ClientError::Server {
            status: 409,
            message: "Username already exists".into(),
        }));
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(state.form_error(), Some("Username already exists"));
        assert_eq!(state.modal(), &Modal::Create);
        assert!(!state.is_submitting());

        state.close_modal();
        assert_eq!(state.form_error(), None);
    }

    fn edit_draft(name: &str) -> FormDraft {
        FormDraft::new()
            .with("name", name)
            .with("username", name.to_lowercase())
            .with("brandName", name)
    }

    #[test]
    fn late_save_lands_on_the_row_it_was_sent_for() {
        let mut state = loaded(vec![vendor("1", "Acme", "A"), vendor("2", "Moo", "M")]);
        assert!(state.open_edit("1"));
        let first = state.begin_submit(edit_draft("Acme")).unwrap();

        // cancel while the save is in flight, then start editing another row
        state.close_modal();
        assert!(state.open_edit("2"));
        assert!(state.is_submitting());
        assert!(state.begin_submit(edit_draft("Moo")).is_err());

        let outcome = state.finish_submit(first.target(), Ok(vendor("1", "Acme", "Renamed")));
        assert_eq!(outcome, SubmitOutcome::Saved);
        let rows: Vec<_> = state.items().iter().map(|v| (v.id.as_str(), v.brand_name.as_str())).collect();
        assert_eq!(rows, [("1", "Renamed"), ("2", "M")]);
        assert_eq!(state.modal(), &Modal::Edit("2".into()));
        assert!(!state.is_submitting());
    }

    #[test]
    fn late_failure_goes_to_banner_not_the_other_form() {
        let mut state = loaded(vec![vendor("1", "Acme", "A"), vendor("2", "Moo", "M")]);
        state.open_edit("1");
        let first = state.begin_submit(edit_draft("Acme")).unwrap();
        state.close_modal();
        state.open_create();

        let outcome = state.finish_submit(
            first.target(),
            Err(ClientError::Server {
                status: 409,
                message: "Username already exists".into(),
            }),
        );
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(state.form_error(), None);
        assert_eq!(state.banner(), Some("Username already exists"));
        assert_eq!(state.modal(), &Modal::Create);
    }

    #[test]
    fn refetch_drops_search_results_of_the_old_list() {
        let mut state: PageState<User> = PageState::new();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![User::sample("u1", "Asha"), User::sample("u2", "Ben")]));
        let ticket = state.set_query("ben").unwrap();
        state.finish_search(ticket, Ok(vec![User::sample("u2", "Ben")]));

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![User::sample("u1", "Asha"), User::sample("u2", "Benjamin")]));
        let names: Vec<_> = state.visible().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Benjamin"]);
    }

    #[test]
    fn delete_removes_exactly_one_id() {
        let mut state = loaded(vec![
            vendor("1", "A", "A"),
            vendor("2", "B", "B"),
            vendor("3", "C", "C"),
        ]);
        assert!(state.begin_delete("2"));
        assert!(!state.begin_delete("2"));
        assert!(state.is_busy("2"));
        assert!(state.finish_delete("2", Ok(())));
        let ids: Vec<_> = state.items().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(!state.is_busy("2"));
    }

    #[test]
    fn failed_delete_keeps_row() {
        let mut state = loaded(vec![vendor("1", "A", "A")]);
        state.begin_delete("1");
        assert!(!state.finish_delete("1", Err(ClientError::Transport("reset".into()))));
        assert_eq!(state.items().len(), 1);
        assert!(state.banner().is_some());
    }
}
