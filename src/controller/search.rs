use std::cell::Cell;
use std::rc::Rc;

/// Delay between the last keystroke and a server-side search.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Case-insensitive substring match over `fields`. An empty query matches
/// everything.
pub fn matches_query(fields: &[&str], query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| field.to_lowercase().contains(&needle))
}

/// Hands out a ticket per keystroke; after the delay only the newest ticket
/// may go on to issue the request.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    latest: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Waits out the delay and reports whether this keystroke is still the
    /// newest one.
    pub async fn settle(&self, ticket: u64) -> bool {
        gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
        self.is_latest(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_query(&["Acme"], ""));
        assert!(matches_query(&["Acme"], "   "));
        assert!(matches_query(&[], ""));
    }

    #[test]
    fn substring_is_case_insensitive() {
        assert!(matches_query(&["Fresh Farms", "fresh@farm.io"], "FARMS"));
        assert!(matches_query(&["Fresh Farms", "9876543210"], "6543"));
        assert!(!matches_query(&["Fresh Farms"], "dairy"));
    }

    #[test]
    fn only_newest_keystroke_survives() {
        let debouncer = Debouncer::new();
        let first = debouncer.ticket();
        let second = debouncer.clone().ticket();
        assert!(!debouncer.is_latest(first));
        assert!(debouncer.is_latest(second));
    }
}
