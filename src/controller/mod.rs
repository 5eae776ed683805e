pub mod cancel;
pub mod page;
pub mod pagination;
pub mod resource;
pub mod search;
pub mod state;

pub use cancel::InFlight;
pub use page::{PageController, StateHandle};
pub use pagination::Paginator;
pub use resource::{Reconcile, Resource, SearchMode};
pub use search::{matches_query, Debouncer, SEARCH_DEBOUNCE_MS};
pub use state::{Modal, PageState, SubmitOutcome, Submission, Ticket};
