use crate::client::UpdateMethod;
use crate::forms::{FormDraft, Schema};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Where a page's search runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    /// Case-insensitive substring filter over the loaded list.
    Client,
    /// `GET /<resource>/<path>?q=`, debounced by the view.
    Server { path: &'static str },
}

/// How the list catches up after a successful create or update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reconcile {
    /// Append the created entity or replace the edited one in place.
    Splice,
    /// Reload the whole list from the server.
    Refetch,
}

/// One admin resource: its endpoint, how it is searched and saved, how it is
/// shown in a table and what its form looks like.
pub trait Resource: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Path under the API base, e.g. `vendors`.
    const PATH: &'static str;
    /// Singular name used in headings and buttons.
    const LABEL: &'static str;
    /// Envelope keys this resource's endpoints use besides `data`.
    const KEYS: &'static [&'static str] = &[];
    const UPDATE: UpdateMethod = UpdateMethod::Put;
    const SEARCH: SearchMode = SearchMode::Client;
    const RECONCILE: Reconcile = Reconcile::Splice;
    /// Page size for infinite scroll; `None` loads the whole list at once.
    const PAGE_SIZE: Option<u32> = None;
    /// Whether rows get an edit action. Some collections are create/delete only.
    const EDITABLE: bool = true;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &str;

    /// Fields matched by client-side search.
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Option<&str> {
        None
    }

    /// One string per entry in [`Resource::COLUMNS`].
    fn cells(&self) -> Vec<String>;

    fn schema() -> Schema;

    fn edit_schema() -> Schema {
        Self::schema()
    }

    /// Prefills the edit form.
    fn to_draft(&self) -> FormDraft;
}
